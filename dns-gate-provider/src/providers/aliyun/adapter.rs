//! 阿里云 `RecordAdapter` / `RecordListAdapter` 实现

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::providers::common::{non_blank, non_zero_u16, non_zero_u32};
use crate::traits::{ErrorContext, RecordAdapter, RecordListAdapter};
use crate::types::{DnsRecord, VendorTag, custom_fields};

use super::types::{
    AddDomainRecordRequest, AliyunRecord, DescribeDomainRecordsRequest,
    DescribeDomainRecordsResponse, EmptyResponse, RecordIdRequest, RecordIdResponse,
    UpdateDomainRecordRemarkRequest, UpdateDomainRecordRequest,
};
use super::{AliyunAdapter, AliyunClient, AliyunListAdapter, DEFAULT_LINE, MAX_PAGE_SIZE};

fn to_dns_record(record: &AliyunRecord) -> DnsRecord {
    let mut dns = DnsRecord {
        id: record.record_id.clone(),
        record_type: record.record_type.clone(),
        name: record.rr.clone(),
        content: record.value.clone(),
        ttl: record.ttl,
        priority: record.priority.unwrap_or(0),
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

fn from_dns_record(record: DnsRecord) -> AliyunRecord {
    AliyunRecord {
        line: non_blank(record.custom_str(custom_fields::LINE)),
        status: non_blank(record.custom_str(custom_fields::STATUS)),
        record_id: record.id,
        rr: record.name,
        record_type: record.record_type,
        value: record.content,
        ttl: record.ttl,
        priority: non_zero_u16(record.priority),
        remark: record.comment,
    }
}

impl AliyunClient {
    /// 备注更新失败不影响主操作，只记录日志
    async fn update_remark_best_effort(&self, record: &AliyunRecord) {
        let Some(remark) = record.remark.as_deref() else {
            return;
        };
        let req = UpdateDomainRecordRemarkRequest {
            record_id: &record.record_id,
            remark,
        };
        let ctx = ErrorContext::for_record(&record.record_id, &record.rr);
        if let Err(e) = self
            .request::<EmptyResponse, _>("UpdateDomainRecordRemark", &req, ctx)
            .await
        {
            log::warn!(
                "[aliyun] Ignoring remark update failure for record {}: {e}",
                record.record_id
            );
        }
    }
}

#[async_trait]
impl RecordAdapter for AliyunAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Aliyun
    }

    fn id(&self) -> &str {
        &self.record.record_id
    }

    fn record(&self) -> DnsRecord {
        to_dns_record(&self.record)
    }

    fn set_record(&mut self, record: DnsRecord) {
        let previous_id = std::mem::take(&mut self.record.record_id);
        self.record = from_dns_record(record);
        if self.record.record_id.is_empty() {
            self.record.record_id = previous_id;
        }
    }

    async fn create(&mut self) -> Result<()> {
        let req = AddDomainRecordRequest {
            domain_name: &self.client.credential.domain_name,
            rr: &self.record.rr,
            record_type: &self.record.record_type,
            value: &self.record.value,
            ttl: non_zero_u32(self.record.ttl),
            priority: self.record.priority.and_then(non_zero_u16),
            line: self.record.line.clone(),
        };
        let ctx = ErrorContext::for_record("", &self.record.rr);
        let response: RecordIdResponse = self.client.request("AddDomainRecord", &req, ctx).await?;
        self.record.record_id = response.record_id;

        self.client.update_remark_best_effort(&self.record).await;
        Ok(())
    }

    async fn read(&mut self, id: &str) -> Result<()> {
        let req = RecordIdRequest { record_id: id };
        let ctx = ErrorContext::for_record(id, "");
        self.record = self
            .client
            .request("DescribeDomainRecordInfo", &req, ctx)
            .await?;
        Ok(())
    }

    async fn update(&mut self) -> Result<()> {
        let req = UpdateDomainRecordRequest {
            record_id: &self.record.record_id,
            rr: &self.record.rr,
            record_type: &self.record.record_type,
            value: &self.record.value,
            ttl: non_zero_u32(self.record.ttl),
            priority: self.record.priority.and_then(non_zero_u16),
            line: self
                .record
                .line
                .clone()
                .unwrap_or_else(|| DEFAULT_LINE.to_string()),
        };
        let ctx = ErrorContext::for_record(&self.record.record_id, &self.record.rr);
        match self
            .client
            .request::<EmptyResponse, _>("UpdateDomainRecord", &req, ctx)
            .await
        {
            Ok(_) => {}
            // The vendor already holds the requested state.
            Err(ProviderError::Conflict { raw_message, .. }) => {
                log::info!(
                    "[aliyun] Record {} unchanged: {}",
                    self.record.record_id,
                    raw_message.unwrap_or_default()
                );
            }
            Err(e) => return Err(e),
        }

        self.client.update_remark_best_effort(&self.record).await;
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        let req = RecordIdRequest {
            record_id: &self.record.record_id,
        };
        let ctx = ErrorContext::for_record(&self.record.record_id, &self.record.rr);
        let _: EmptyResponse = self
            .client
            .request("DeleteDomainRecord", &req, ctx)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RecordListAdapter for AliyunListAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Aliyun
    }

    async fn list(&mut self) -> Result<()> {
        let req = DescribeDomainRecordsRequest {
            domain_name: &self.client.credential.domain_name,
            page_number: 1,
            page_size: MAX_PAGE_SIZE,
        };
        let response: DescribeDomainRecordsResponse = self
            .client
            .request("DescribeDomainRecords", &req, ErrorContext::default())
            .await?;
        self.records = response
            .domain_records
            .and_then(|w| w.record)
            .unwrap_or_default();
        Ok(())
    }

    fn records(&self) -> Vec<DnsRecord> {
        self.records.iter().map(to_dns_record).collect()
    }
}
