//! `DNSPod` `RecordAdapter` / `RecordListAdapter` 实现

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::providers::common::{non_blank, non_zero_u16, non_zero_u32};
use crate::traits::{ErrorContext, RecordAdapter, RecordListAdapter};
use crate::types::{DnsRecord, VendorTag, custom_fields};

use super::types::{
    CreateRecordRequest, CreateRecordResponse, DescribeRecordListRequest, DescribeRecordResponse,
    DnspodRecord, EmptyResponse, ModifyRecordRemarkRequest, ModifyRecordRequest, RecordIdRequest,
    RecordListResponse,
};
use super::{
    DEFAULT_RECORD_LINE, DEFAULT_STATUS, DnspodAdapter, DnspodClient, DnspodListAdapter,
    MAX_PAGE_SIZE,
};

fn to_dns_record(record: &DnspodRecord) -> DnsRecord {
    let mut dns = DnsRecord {
        id: record.id.clone(),
        record_type: record.record_type.clone(),
        name: record.sub_domain.clone(),
        content: record.value.clone(),
        ttl: record.ttl,
        priority: record.mx,
        comment: record.remark.clone(),
        ..DnsRecord::default()
    };
    for (key, value) in [
        (custom_fields::LINE, &record.line),
        (custom_fields::STATUS, &record.status),
    ] {
        if let Some(value) = value {
            dns.vendor_custom_fields
                .insert(key.to_string(), Value::String(value.clone()));
        }
    }
    dns
}

fn from_dns_record(record: DnsRecord) -> DnspodRecord {
    DnspodRecord {
        line: non_blank(record.custom_str(custom_fields::LINE)),
        status: non_blank(record.custom_str(custom_fields::STATUS)),
        id: record.id,
        sub_domain: record.name,
        record_type: record.record_type,
        value: record.content,
        ttl: record.ttl,
        mx: record.priority,
        remark: record.comment,
    }
}

/// 解析数字形式的记录 ID
fn parse_record_id(id: &str) -> Result<u64> {
    id.parse().map_err(|_| ProviderError::NotFound {
        provider: "dnspod".to_string(),
        record_id: id.to_string(),
        raw_message: Some("invalid DNS record id".to_string()),
    })
}

impl DnspodClient {
    /// 备注更新失败不影响主操作，只记录日志
    async fn modify_remark_best_effort(&self, record_id: u64, record: &DnspodRecord) {
        let Some(remark) = record.remark.as_deref() else {
            return;
        };
        let req = ModifyRecordRemarkRequest {
            domain: &self.credential.domain_name,
            record_id,
            remark,
        };
        let ctx = ErrorContext::for_record(&record.id, &record.sub_domain);
        if let Err(e) = self
            .request::<EmptyResponse, _>("ModifyRecordRemark", &req, ctx)
            .await
        {
            log::warn!("[dnspod] Ignoring remark update failure for record {record_id}: {e}");
        }
    }
}

#[async_trait]
impl RecordAdapter for DnspodAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Dnspod
    }

    fn id(&self) -> &str {
        &self.record.id
    }

    fn record(&self) -> DnsRecord {
        to_dns_record(&self.record)
    }

    fn set_record(&mut self, record: DnsRecord) {
        let previous_id = std::mem::take(&mut self.record.id);
        self.record = from_dns_record(record);
        if self.record.id.is_empty() {
            self.record.id = previous_id;
        }
    }

    async fn create(&mut self) -> Result<()> {
        let req = CreateRecordRequest {
            domain: &self.client.credential.domain_name,
            sub_domain: &self.record.sub_domain,
            record_type: &self.record.record_type,
            record_line: self.record.line.as_deref().unwrap_or(DEFAULT_RECORD_LINE),
            value: &self.record.value,
            ttl: non_zero_u32(self.record.ttl),
            mx: non_zero_u16(self.record.mx),
            status: self.record.status.as_deref().unwrap_or(DEFAULT_STATUS),
        };
        let ctx = ErrorContext::for_record("", &self.record.sub_domain);
        let response: CreateRecordResponse = self.client.request("CreateRecord", &req, ctx).await?;
        self.record.id = response.record_id.to_string();
        Ok(())
    }

    async fn read(&mut self, id: &str) -> Result<()> {
        let record_id = parse_record_id(id)?;
        let req = RecordIdRequest {
            domain: &self.client.credential.domain_name,
            record_id,
        };
        let ctx = ErrorContext::for_record(id, "");
        let response: DescribeRecordResponse =
            self.client.request("DescribeRecord", &req, ctx).await?;
        self.record = response.record_info.into();
        Ok(())
    }

    async fn update(&mut self) -> Result<()> {
        let record_id = parse_record_id(&self.record.id)?;
        let req = ModifyRecordRequest {
            domain: &self.client.credential.domain_name,
            record_id,
            sub_domain: &self.record.sub_domain,
            record_type: &self.record.record_type,
            record_line: self.record.line.as_deref().unwrap_or(DEFAULT_RECORD_LINE),
            value: &self.record.value,
            ttl: non_zero_u32(self.record.ttl),
            mx: non_zero_u16(self.record.mx),
            status: self.record.status.as_deref().unwrap_or(DEFAULT_STATUS),
        };
        let ctx = ErrorContext::for_record(&self.record.id, &self.record.sub_domain);
        let _: EmptyResponse = self.client.request("ModifyRecord", &req, ctx).await?;

        self.client
            .modify_remark_best_effort(record_id, &self.record)
            .await;
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        let record_id = parse_record_id(&self.record.id)?;
        let req = RecordIdRequest {
            domain: &self.client.credential.domain_name,
            record_id,
        };
        let ctx = ErrorContext::for_record(&self.record.id, &self.record.sub_domain);
        let _: EmptyResponse = self.client.request("DeleteRecord", &req, ctx).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordListAdapter for DnspodListAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Dnspod
    }

    async fn list(&mut self) -> Result<()> {
        let req = DescribeRecordListRequest {
            domain: &self.client.credential.domain_name,
            limit: MAX_PAGE_SIZE,
        };
        // An empty zone answers with NoDataOfRecord instead of an empty list.
        let response: RecordListResponse = match self
            .client
            .request("DescribeRecordList", &req, ErrorContext::default())
            .await
        {
            Ok(response) => response,
            Err(ProviderError::NotFound { .. }) => RecordListResponse {
                record_list: Vec::new(),
            },
            Err(e) => return Err(e),
        };
        self.records = response
            .record_list
            .into_iter()
            .map(DnspodRecord::from)
            .collect();
        Ok(())
    }

    fn records(&self) -> Vec<DnsRecord> {
        self.records.iter().map(to_dns_record).collect()
    }
}
