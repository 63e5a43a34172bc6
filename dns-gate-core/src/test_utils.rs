//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dns_gate_provider::{
    AdapterFactory, DnsRecord, DomainCredential, ProviderError, RecordAdapter, RecordListAdapter,
    Result as ProviderResult, VendorTag,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CredentialLookup, PendingChangeRepository};
use crate::types::{ActionStatus, DomainContext, DomainRole, PendingChange, Requester};

pub const TEST_DOMAIN: &str = "example.com";

pub fn test_credential(vendor: VendorTag) -> DomainCredential {
    DomainCredential::new(vendor, TEST_DOMAIN, "test-id", "test-secret")
}

pub fn test_domain(icp_gated: bool) -> DomainContext {
    DomainContext::new("domain-1", icp_gated, test_credential(VendorTag::Aliyun))
}

pub fn requester(role: DomainRole) -> Requester {
    Requester::new("user-7", role)
}

// ===== MockPendingChangeRepository =====

pub struct MockPendingChangeRepository {
    changes: RwLock<HashMap<String, PendingChange>>,
    /// 如果 Some，save 时返回此错误
    save_error: RwLock<Option<String>>,
    /// 如果 Some，update_status 时返回此错误
    status_error: RwLock<Option<String>>,
}

impl MockPendingChangeRepository {
    pub fn new() -> Self {
        Self {
            changes: RwLock::new(HashMap::new()),
            save_error: RwLock::new(None),
            status_error: RwLock::new(None),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn set_status_error(&self, err: Option<String>) {
        *self.status_error.write().await = err;
    }

    pub async fn len(&self) -> usize {
        self.changes.read().await.len()
    }
}

#[async_trait]
impl PendingChangeRepository for MockPendingChangeRepository {
    async fn save(&self, change: &PendingChange) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.changes
            .write()
            .await
            .insert(change.id.clone(), change.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<PendingChange>> {
        Ok(self.changes.read().await.get(id).cloned())
    }

    async fn find_by_domain(&self, domain_id: &str) -> CoreResult<Vec<PendingChange>> {
        let mut changes: Vec<PendingChange> = self
            .changes
            .read()
            .await
            .values()
            .filter(|c| c.domain_id == domain_id)
            .cloned()
            .collect();
        changes.sort_by_key(|c| c.created_at);
        Ok(changes)
    }

    async fn update_status(&self, id: &str, status: ActionStatus) -> CoreResult<()> {
        if let Some(ref msg) = *self.status_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let mut store = self.changes.write().await;
        let change = store
            .get_mut(id)
            .ok_or_else(|| CoreError::ChangeNotFound(id.to_string()))?;
        change.status = status;
        Ok(())
    }
}

// ===== MockCredentialLookup =====

pub struct MockCredentialLookup {
    credentials: RwLock<HashMap<String, DomainCredential>>,
}

impl MockCredentialLookup {
    pub fn new() -> Self {
        Self {
            credentials: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, domain_id: &str, credential: DomainCredential) {
        self.credentials
            .write()
            .await
            .insert(domain_id.to_string(), credential);
    }
}

#[async_trait]
impl CredentialLookup for MockCredentialLookup {
    async fn find_credential(&self, domain_id: &str) -> CoreResult<Option<DomainCredential>> {
        Ok(self.credentials.read().await.get(domain_id).cloned())
    }
}

// ===== MockAdapterFactory =====

#[derive(Default)]
struct FactoryState {
    calls: Vec<String>,
    issued: usize,
    failure: Option<ProviderError>,
}

/// Factory whose adapters record every vendor call instead of making it.
#[derive(Clone, Default)]
pub struct MockAdapterFactory {
    state: Arc<Mutex<FactoryState>>,
}

impl MockAdapterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vendor calls made so far, e.g. `"create"` or `"read rec-1"`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The next vendor call fails with `err`.
    pub fn fail_next(&self, err: ProviderError) {
        self.state.lock().unwrap().failure = Some(err);
    }
}

impl AdapterFactory for MockAdapterFactory {
    fn record_adapter(&self, credential: DomainCredential) -> ProviderResult<Box<dyn RecordAdapter>> {
        Ok(Box::new(MockAdapter {
            vendor: credential.vendor,
            record: DnsRecord::default(),
            state: Arc::clone(&self.state),
        }))
    }

    fn list_adapter(
        &self,
        credential: DomainCredential,
    ) -> ProviderResult<Box<dyn RecordListAdapter>> {
        Ok(Box::new(MockListAdapter {
            vendor: credential.vendor,
        }))
    }
}

struct MockAdapter {
    vendor: VendorTag,
    record: DnsRecord,
    state: Arc<Mutex<FactoryState>>,
}

impl MockAdapter {
    fn enter(&self, call: String) -> ProviderResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state.failure.take().map_or(Ok(()), Err)
    }

    fn next_id(&self) -> String {
        let mut state = self.state.lock().unwrap();
        state.issued += 1;
        format!("mock-{}", state.issued)
    }
}

#[async_trait]
impl RecordAdapter for MockAdapter {
    fn vendor(&self) -> VendorTag {
        self.vendor
    }

    fn id(&self) -> &str {
        &self.record.id
    }

    fn record(&self) -> DnsRecord {
        self.record.clone()
    }

    fn set_record(&mut self, record: DnsRecord) {
        let id = if record.id.is_empty() {
            std::mem::take(&mut self.record.id)
        } else {
            record.id.clone()
        };
        self.record = DnsRecord { id, ..record };
    }

    async fn create(&mut self) -> ProviderResult<()> {
        self.enter("create".to_string())?;
        self.record.id = self.next_id();
        Ok(())
    }

    async fn read(&mut self, id: &str) -> ProviderResult<()> {
        self.enter(format!("read {id}"))?;
        self.record.id = id.to_string();
        Ok(())
    }

    async fn update(&mut self) -> ProviderResult<()> {
        self.enter(format!("update {}", self.record.id))
    }

    async fn delete(&mut self) -> ProviderResult<()> {
        self.enter(format!("delete {}", self.record.id))
    }
}

struct MockListAdapter {
    vendor: VendorTag,
}

#[async_trait]
impl RecordListAdapter for MockListAdapter {
    fn vendor(&self) -> VendorTag {
        self.vendor
    }

    async fn list(&mut self) -> ProviderResult<()> {
        Ok(())
    }

    fn records(&self) -> Vec<DnsRecord> {
        Vec::new()
    }
}
