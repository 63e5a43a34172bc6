//! Cloudflare `RecordAdapter` / `RecordListAdapter` 实现

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;
use crate::providers::common::{
    full_name_to_relative, non_zero_u16, non_zero_u32, relative_to_full_name,
};
use crate::traits::{ErrorContext, RecordAdapter, RecordListAdapter};
use crate::types::{DnsRecord, VendorTag, custom_fields};

use super::types::{CloudflareRecord, RecordBody};
use super::{CloudflareAdapter, CloudflareClient, CloudflareListAdapter, MAX_PAGE_SIZE, is_proxiable};

impl CloudflareClient {
    fn to_dns_record(&self, record: &CloudflareRecord) -> DnsRecord {
        let mut dns = DnsRecord {
            id: record.id.clone(),
            record_type: record.record_type.clone(),
            name: full_name_to_relative(&record.name, &self.credential.domain_name),
            content: record.content.clone(),
            ttl: record.ttl,
            priority: record.priority.unwrap_or(0),
            comment: record.comment.clone(),
            ..DnsRecord::default()
        };
        if let Some(proxied) = record.proxied {
            dns.vendor_custom_fields
                .insert(custom_fields::PROXIED.to_string(), Value::Bool(proxied));
        }
        if let Some(data) = &record.data {
            dns.vendor_custom_fields
                .insert(custom_fields::DATA.to_string(), data.clone());
        }
        dns
    }

    fn body<'a>(&self, record: &'a CloudflareRecord) -> RecordBody<'a> {
        RecordBody {
            record_type: &record.record_type,
            name: relative_to_full_name(&record.name, &self.credential.domain_name),
            content: &record.content,
            ttl: non_zero_u32(record.ttl),
            priority: record.priority.and_then(non_zero_u16),
            proxied: record.proxied.filter(|_| is_proxiable(&record.record_type)),
            comment: record.comment.as_deref(),
            data: record.data.as_ref(),
        }
    }
}

fn from_dns_record(record: DnsRecord) -> CloudflareRecord {
    let proxied = record.custom_bool(custom_fields::PROXIED);
    let data = record
        .vendor_custom_fields
        .get(custom_fields::DATA)
        .filter(|v| v.is_object())
        .cloned();
    CloudflareRecord {
        id: record.id,
        record_type: record.record_type,
        name: record.name,
        content: record.content,
        ttl: record.ttl,
        priority: non_zero_u16(record.priority),
        proxied,
        comment: record.comment,
        data,
    }
}

impl CloudflareAdapter {
    /// Replaces the state with a record returned by the vendor.
    fn store(&mut self, record: CloudflareRecord) {
        let id = if record.id.is_empty() {
            std::mem::take(&mut self.record.id)
        } else {
            record.id
        };
        // Names come back fully qualified; keep the relative form like other adapters.
        self.record = CloudflareRecord {
            id,
            name: full_name_to_relative(&record.name, &self.client.credential.domain_name),
            ..record
        };
    }
}

#[async_trait]
impl RecordAdapter for CloudflareAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Cloudflare
    }

    fn id(&self) -> &str {
        &self.record.id
    }

    fn record(&self) -> DnsRecord {
        self.client.to_dns_record(&self.record)
    }

    fn set_record(&mut self, record: DnsRecord) {
        let previous_id = std::mem::take(&mut self.record.id);
        self.record = from_dns_record(record);
        if self.record.id.is_empty() {
            self.record.id = previous_id;
        }
    }

    async fn create(&mut self) -> Result<()> {
        let body = self.client.body(&self.record);
        let ctx = ErrorContext::for_record("", &self.record.name);
        let created: CloudflareRecord = self
            .client
            .request(Method::POST, "/dns_records", Some(&body), ctx)
            .await?;
        self.store(created);
        Ok(())
    }

    async fn read(&mut self, id: &str) -> Result<()> {
        let ctx = ErrorContext::for_record(id, "");
        let record: CloudflareRecord = self
            .client
            .request::<_, ()>(Method::GET, &format!("/dns_records/{id}"), None, ctx)
            .await?;
        self.store(record);
        Ok(())
    }

    async fn update(&mut self) -> Result<()> {
        let body = self.client.body(&self.record);
        let ctx = ErrorContext::for_record(&self.record.id, &self.record.name);
        let updated: CloudflareRecord = self
            .client
            .request(
                Method::PUT,
                &format!("/dns_records/{}", self.record.id),
                Some(&body),
                ctx,
            )
            .await?;
        self.store(updated);
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        let ctx = ErrorContext::for_record(&self.record.id, &self.record.name);
        let _deleted: Value = self
            .client
            .request::<_, ()>(
                Method::DELETE,
                &format!("/dns_records/{}", self.record.id),
                None,
                ctx,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordListAdapter for CloudflareListAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Cloudflare
    }

    async fn list(&mut self) -> Result<()> {
        self.records = self
            .client
            .request::<_, ()>(
                Method::GET,
                &format!("/dns_records?per_page={MAX_PAGE_SIZE}"),
                None,
                ErrorContext::default(),
            )
            .await?;
        Ok(())
    }

    fn records(&self) -> Vec<DnsRecord> {
        self.records
            .iter()
            .map(|r| self.client.to_dns_record(r))
            .collect()
    }
}
