//! Adapter 公共工具函数

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

// ============ HMAC-SHA256 ============

/// HMAC-SHA256 计算（供 aliyun/dnspod/huaweicloud 签名使用）
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length, so this never takes the else branch.
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return Vec::new();
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

// ============ 零值即未设置 ============

/// `0` 表示交给 vendor 默认值
pub fn non_zero_u32(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

pub fn non_zero_u16(value: u16) -> Option<u16> {
    (value != 0).then_some(value)
}

/// 空白字符串视为未设置
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 将完整域名转换为相对名称
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com." + "example.com" -> "@"
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = normalize_domain_name(full_name);
    let zone = normalize_domain_name(zone_name);

    if full == zone {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full
    }
}

/// 将相对名称转换为完整域名，已是完整域名时原样返回（去掉末尾的点）
/// 如: "www" + "example.com" -> "www.example.com"
/// 如: "@" + "example.com" -> "example.com"
pub fn relative_to_full_name(name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let name = normalize_domain_name(name);

    if name == "@" || name.is_empty() || name == zone {
        zone
    } else if name.ends_with(&format!(".{zone}")) {
        name
    } else {
        format!("{name}.{zone}")
    }
}
