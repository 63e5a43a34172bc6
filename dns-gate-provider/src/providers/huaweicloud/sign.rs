//! Huawei Cloud SDK-HMAC-SHA256 signature

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;
use crate::utils::log_sanitizer::truncate_for_log;

/// AK/SK pair used to sign one request.
pub(crate) struct SdkSigner<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
}

impl SdkSigner<'_> {
    /// Generate Huawei Cloud SDK signature
    /// Reference: <https://support.huaweicloud.com/devg-apisign/api-sign-algorithm-005.html>
    pub(crate) fn sign(
        &self,
        method: &str,
        uri: &str,
        query: &str,
        headers: &[(&str, &str)],
        payload: &str,
        timestamp: &str,
    ) -> String {
        // 1. URI normalization: make sure it ends with "/"
        let canonical_uri = if uri.ends_with('/') {
            uri.to_string()
        } else {
            format!("{uri}/")
        };

        // 2. Query String sorting (in ascending order by parameter name)
        let canonical_query = if query.is_empty() {
            String::new()
        } else {
            let mut params: Vec<&str> = query.split('&').collect();
            params.sort_unstable();
            params.join("&")
        };

        // 3. Construct the standard request header
        let mut sorted_headers: Vec<_> = headers.iter().collect();
        sorted_headers.sort_by_key(|(k, _)| k.to_lowercase());

        let canonical_headers: String =
            sorted_headers
                .iter()
                .fold(String::new(), |mut acc, (k, v)| {
                    let _ = writeln!(acc, "{}:{}", k.to_lowercase(), v.trim());
                    acc
                });

        let signed_headers: String = sorted_headers
            .iter()
            .map(|(k, _)| k.to_lowercase())
            .collect::<Vec<_>>()
            .join(";");

        // 4. Payload hash + canonical request
        let hashed_payload = hex::encode(Sha256::digest(payload.as_bytes()));
        let canonical_request = format!(
            "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{hashed_payload}"
        );

        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        // 5. String to sign (3-line format)
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!("SDK-HMAC-SHA256\n{timestamp}\n{hashed_canonical_request}");

        // 6. Signature uses the SK directly
        let signature = hex::encode(hmac_sha256(
            self.secret_key.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        format!(
            "SDK-HMAC-SHA256 Access={}, SignedHeaders={signed_headers}, Signature={signature}",
            self.access_key
        )
    }
}
