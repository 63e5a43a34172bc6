//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use dns_gate_provider::{
    AdapterFactory, DefaultAdapterFactory, DnsRecord, DomainCredential, Transport,
    TransportConfig, VendorTag,
};
use serde_json::Value;
use wiremock::MockServer;

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub const TEST_DOMAIN: &str = "example.com";

// ============ Mock server ============

/// Factory whose every vendor endpoint points at the mock server.
pub fn mock_factory(server: &MockServer) -> DefaultAdapterFactory {
    let config = TransportConfig::default().with_base_url(&server.uri());
    let transport = Transport::new(&config).expect("构建 HTTP transport 失败");
    DefaultAdapterFactory::new(transport)
}

/// Credential for [`TEST_DOMAIN`] with dummy keys.
pub fn mock_credential(vendor: VendorTag) -> DomainCredential {
    DomainCredential::new(vendor, TEST_DOMAIN, "test-id", "test-secret")
}

/// JSON bodies of every received request, in arrival order. Empty bodies are skipped.
pub async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|req| !req.body.is_empty())
        .filter_map(|req| serde_json::from_slice(&req.body).ok())
        .collect()
}

/// Query pairs of every received request, in arrival order.
pub async fn request_queries(server: &MockServer) -> Vec<Vec<(String, String)>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|req| {
            req.url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .collect()
}

/// Number of requests the server has seen.
pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

// ============ Live vendor ============

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装真实 vendor 的 factory 和凭证
pub struct TestContext {
    pub factory: DefaultAdapterFactory,
    pub credential: DomainCredential,
}

impl TestContext {
    fn from_env(vendor: VendorTag, id_var: &str, secret_var: &str) -> Option<Self> {
        let auth_id = env::var(id_var).ok()?;
        let auth_secret = env::var(secret_var).ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let transport = Transport::new(&TransportConfig::default()).ok()?;

        Some(Self {
            factory: DefaultAdapterFactory::new(transport),
            credential: DomainCredential::new(vendor, domain, auth_id, auth_secret),
        })
    }

    /// 创建 Cloudflare 测试上下文
    pub fn cloudflare() -> Option<Self> {
        Self::from_env(VendorTag::Cloudflare, "CLOUDFLARE_ZONE_ID", "CLOUDFLARE_API_TOKEN")
    }

    /// 创建 Aliyun 测试上下文
    pub fn aliyun() -> Option<Self> {
        Self::from_env(
            VendorTag::Aliyun,
            "ALIYUN_ACCESS_KEY_ID",
            "ALIYUN_ACCESS_KEY_SECRET",
        )
    }

    /// 创建 `DNSPod` 测试上下文
    pub fn dnspod() -> Option<Self> {
        Self::from_env(VendorTag::Dnspod, "DNSPOD_SECRET_ID", "DNSPOD_SECRET_KEY")
    }

    /// 创建 Huaweicloud 测试上下文
    pub fn huaweicloud() -> Option<Self> {
        Self::from_env(
            VendorTag::Huawei,
            "HUAWEICLOUD_ACCESS_KEY_ID",
            "HUAWEICLOUD_SECRET_ACCESS_KEY",
        )
    }

    /// 创建 TXT 测试记录并返回其 id
    pub async fn create_test_record(&self) -> Option<String> {
        let mut adapter = self.factory.record_adapter(self.credential.clone()).ok()?;
        adapter.set_record(
            DnsRecord::new("TXT", generate_test_record_name(), "integration-test").with_ttl(600),
        );
        adapter.create().await.ok()?;
        Some(adapter.id().to_string())
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, record_id: &str) {
        if let Ok(mut adapter) = self.factory.record_adapter(self.credential.clone()) {
            if adapter.read(record_id).await.is_ok() {
                let _ = adapter.delete().await;
            }
        }
    }
}

/// Create → read → update → list → delete against a live vendor.
pub async fn run_live_round_trip(ctx: TestContext) {
    let record_id = require_some!(ctx.create_test_record().await, "创建测试记录失败");

    let mut adapter = ctx
        .factory
        .record_adapter(ctx.credential.clone())
        .expect("创建 adapter 失败");
    require_ok!(adapter.read(&record_id).await, "读取测试记录失败");
    let mut record = adapter.record();
    assert_eq!(record.record_type, "TXT");
    assert_eq!(record.content, "integration-test");

    record.content = "integration-test-updated".to_string();
    adapter.set_record(record);
    let update = adapter.update().await;
    if update.is_err() {
        ctx.cleanup_record(&record_id).await;
    }
    require_ok!(update, "更新测试记录失败");

    let mut list = ctx
        .factory
        .list_adapter(ctx.credential.clone())
        .expect("创建 list adapter 失败");
    require_ok!(list.list().await, "列出记录失败");
    let current_id = adapter.id().to_string();
    let selected = list.select_by_ids(std::slice::from_ref(&current_id));
    ctx.cleanup_record(&current_id).await;

    let selected = require_ok!(selected, "按 id 选择记录失败");
    assert_eq!(selected[0].content, "integration-test-updated");
}
