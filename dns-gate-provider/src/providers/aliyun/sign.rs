//! 阿里云 ACS3-HMAC-SHA256 签名

use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;

use super::{ALIYUN_DNS_VERSION, EMPTY_BODY_SHA256};

/// ACS3 签名所需的凭证与 host
pub(crate) struct AcsSigner<'a> {
    pub access_key_id: &'a str,
    pub access_key_secret: &'a str,
    pub host: &'a str,
}

impl AcsSigner<'_> {
    /// 生成 ACS3-HMAC-SHA256 签名
    /// 参考: <https://www.alibabacloud.com/help/zh/sdk/product-overview/v3-request-structure-and-signature>
    pub(crate) fn sign(
        &self,
        action: &str,
        query_string: &str,
        timestamp: &str,
        nonce: &str,
    ) -> String {
        let host = self.host;
        // 1. 构造规范化请求头 (使用空 body 的 hash)
        let canonical_headers = format!(
            "host:{host}\nx-acs-action:{action}\nx-acs-content-sha256:{EMPTY_BODY_SHA256}\nx-acs-date:{timestamp}\nx-acs-signature-nonce:{nonce}\nx-acs-version:{ALIYUN_DNS_VERSION}\n"
        );

        let signed_headers =
            "host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version";

        // 2. 构造规范化请求 (RPC 风格: 参数在 query string 中)
        let canonical_request = format!(
            "POST\n/\n{query_string}\n{canonical_headers}\n{signed_headers}\n{EMPTY_BODY_SHA256}"
        );

        log::debug!("CanonicalRequest:\n{canonical_request}");

        // 3. 构造待签名字符串
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!("ACS3-HMAC-SHA256\n{hashed_canonical_request}");

        log::debug!("StringToSign:\n{string_to_sign}");

        // 4. 计算签名
        let signature = hex::encode(hmac_sha256(
            self.access_key_secret.as_bytes(),
            string_to_sign.as_bytes(),
        ));

        // 5. 构造 Authorization 头
        format!(
            "ACS3-HMAC-SHA256 Credential={},SignedHeaders={},Signature={}",
            self.access_key_id, signed_headers, signature
        )
    }
}

#[cfg(test)]
mod tests {
    use super::AcsSigner;

    const TS: &str = "2024-01-15T08:00:00Z";

    fn signer<'a>(key_id: &'a str, key_secret: &'a str) -> AcsSigner<'a> {
        AcsSigner {
            access_key_id: key_id,
            access_key_secret: key_secret,
            host: "alidns.cn-hangzhou.aliyuncs.com",
        }
    }

    fn signature_of(auth: &str) -> &str {
        auth.rsplit("Signature=").next().unwrap_or_default()
    }

    #[test]
    fn authorization_lists_credential_and_headers() {
        let auth = signer("LTAI5tKey", "secret").sign("AddDomainRecord", "", TS, "n-1");
        assert!(auth.starts_with("ACS3-HMAC-SHA256 Credential=LTAI5tKey,"));
        assert!(auth.contains(
            "SignedHeaders=host;x-acs-action;x-acs-content-sha256;x-acs-date;x-acs-signature-nonce;x-acs-version,"
        ));
        let sig = signature_of(&auth);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn nonce_and_query_feed_the_signature() {
        let s = signer("id", "secret");
        let base = s.sign("UpdateDomainRecord", "RecordId=1", TS, "n-1");
        let other_nonce = s.sign("UpdateDomainRecord", "RecordId=1", TS, "n-2");
        let other_query = s.sign("UpdateDomainRecord", "RecordId=2", TS, "n-1");
        assert_ne!(signature_of(&base), signature_of(&other_nonce));
        assert_ne!(signature_of(&base), signature_of(&other_query));
        assert_eq!(base, s.sign("UpdateDomainRecord", "RecordId=1", TS, "n-1"));
    }

    #[test]
    fn host_is_part_of_the_canonical_request() {
        let public = signer("id", "secret");
        let local = AcsSigner {
            host: "127.0.0.1:8080",
            ..signer("id", "secret")
        };
        assert_ne!(
            signature_of(&public.sign("DeleteDomainRecord", "", TS, "n")),
            signature_of(&local.sign("DeleteDomainRecord", "", TS, "n"))
        );
    }

    #[test]
    fn sign_snapshot() {
        let auth = signer("LTAI5tTestKeyId", "TestSecretKey123456").sign(
            "DescribeDomainRecords",
            "DomainName=example.com",
            TS,
            "test-nonce-12345",
        );
        let expected = "ACS3-HMAC-SHA256 \
             Credential=LTAI5tTestKeyId,\
             SignedHeaders=host;x-acs-action;x-acs-content-sha256;\
             x-acs-date;x-acs-signature-nonce;x-acs-version,\
             Signature=9c4173ede0946854e402679d086862a853ada5d1b83c34216ede75a499d50afd";
        assert_eq!(auth, expected, "snapshot regression: full output changed");
    }
}
