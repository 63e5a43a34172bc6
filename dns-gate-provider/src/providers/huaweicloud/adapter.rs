//! 华为云 `RecordAdapter` / `RecordListAdapter` 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::{full_name_to_relative, non_zero_u32};
use crate::traits::{ErrorContext, ProviderErrorMapper, RecordAdapter, RecordListAdapter};
use crate::types::{DnsRecord, VendorTag};

use super::codec::{decode_value, encode_value, format_name};
use super::identity::{decode_id, encode_id, fingerprint, ids_for, locate};
use super::types::{
    HuaweiRecord, ListRecordSetsResponse, ListZonesResponse, RecordSet, RecordSetBody,
};
use super::{HuaweiAdapter, HuaweiClient, HuaweiListAdapter, MAX_PAGE_SIZE};

fn to_dns_record(record: &HuaweiRecord, domain: &str) -> DnsRecord {
    DnsRecord {
        id: record.id.clone(),
        record_type: record.record_type.clone(),
        name: full_name_to_relative(&record.name, domain),
        content: record.content.clone(),
        ttl: record.ttl,
        priority: record.priority,
        comment: record.description.clone(),
        ..DnsRecord::default()
    }
}

fn from_dns_record(record: DnsRecord) -> HuaweiRecord {
    HuaweiRecord {
        id: record.id,
        name: record.name,
        record_type: record.record_type,
        content: record.content,
        ttl: record.ttl,
        priority: record.priority,
        description: record.comment,
    }
}

/// Logical record for `recordset.records[index]` with its compound id.
fn record_at(recordset: &RecordSet, index: usize, id: String) -> HuaweiRecord {
    let (content, priority) = decode_value(&recordset.record_type, &recordset.records[index]);
    HuaweiRecord {
        id,
        name: recordset.name.clone(),
        record_type: recordset.record_type.clone(),
        content,
        ttl: recordset.ttl.unwrap_or(0),
        priority,
        description: recordset.description.clone(),
    }
}

impl HuaweiClient {
    fn record_not_found(&self, record_id: &str, detail: &str) -> ProviderError {
        ProviderError::NotFound {
            provider: self.provider_name().to_string(),
            record_id: record_id.to_string(),
            raw_message: Some(detail.to_string()),
        }
    }

    /// 按域名查找公网 zone id
    async fn find_zone_id(&self) -> Result<String> {
        let domain = &self.credential.domain_name;
        let query = format!("type=public&name={}", urlencoding::encode(domain));
        let response: ListZonesResponse =
            self.get("/v2/zones", &query, ErrorContext::default()).await?;

        let expected = format!("{domain}.");
        response
            .zones
            .into_iter()
            .find(|zone| zone.name == expected)
            .map(|zone| zone.id)
            .ok_or_else(|| ProviderError::Vendor {
                provider: self.provider_name().to_string(),
                raw_code: None,
                raw_message: format!("invalid domain name to get zone id: {domain}"),
            })
    }

    /// 按 (name, type) 精确查找记录集
    async fn search_recordset(
        &self,
        zone_id: &str,
        fqdn: &str,
        record_type: &str,
    ) -> Result<Option<RecordSet>> {
        let query = format!(
            "name={}&type={}&search_mode=equal",
            urlencoding::encode(fqdn),
            urlencoding::encode(record_type)
        );
        let path = format!("/v2/zones/{zone_id}/recordsets");
        let ctx = ErrorContext::for_record("", fqdn);
        let response: ListRecordSetsResponse = self.get(&path, &query, ctx).await?;
        Ok(response
            .recordsets
            .into_iter()
            .find(|rs| rs.name == fqdn && rs.record_type == record_type))
    }

    async fn show_recordset(
        &self,
        zone_id: &str,
        recordset_id: &str,
        record_id: &str,
    ) -> Result<RecordSet> {
        let path = format!("/v2/zones/{zone_id}/recordsets/{recordset_id}");
        self.get(&path, "", ErrorContext::for_record(record_id, ""))
            .await
    }

    async fn put_recordset(
        &self,
        zone_id: &str,
        recordset_id: &str,
        body: &RecordSetBody<'_>,
        ctx: ErrorContext,
    ) -> Result<RecordSet> {
        let path = format!("/v2/zones/{zone_id}/recordsets/{recordset_id}");
        self.put(&path, body, ctx).await
    }

    /// 删除记录集中的一个值；只剩一个值时删除整个记录集
    async fn remove_value(
        &self,
        zone_id: &str,
        recordset: &RecordSet,
        index: usize,
        record_id: &str,
    ) -> Result<()> {
        let ctx = ErrorContext::for_record(record_id, &recordset.name);
        if recordset.records.len() == 1 {
            let path = format!("/v2/zones/{zone_id}/recordsets/{}", recordset.id);
            return self.delete(&path, ctx).await;
        }

        let mut records = recordset.records.clone();
        records.remove(index);
        let body = RecordSetBody {
            name: &recordset.name,
            record_type: &recordset.record_type,
            ttl: recordset.ttl,
            records: &records,
            description: recordset.description.as_deref(),
        };
        self.put_recordset(zone_id, &recordset.id, &body, ctx)
            .await?;
        Ok(())
    }
}

impl HuaweiAdapter {
    async fn zone_id(&mut self) -> Result<String> {
        if let Some(zone_id) = &self.zone_id {
            return Ok(zone_id.clone());
        }
        let zone_id = self.client.find_zone_id().await?;
        self.zone_id = Some(zone_id.clone());
        Ok(zone_id)
    }

    /// Recordset owning the current id, plus the position of its value.
    async fn resolve(&mut self) -> Result<(String, RecordSet, usize)> {
        let id = self.record.id.clone();
        let Some((recordset_id, target)) = decode_id(&id) else {
            return Err(self
                .client
                .record_not_found(&id, "'id' is not a valid record id"));
        };

        let zone_id = self.zone_id().await?;
        let cached = self
            .source
            .as_ref()
            .filter(|rs| rs.id == recordset_id)
            .cloned();
        let recordset = match cached {
            Some(recordset) => recordset,
            None => {
                let fetched = self
                    .client
                    .show_recordset(&zone_id, recordset_id, &id)
                    .await?;
                self.source = Some(fetched.clone());
                fetched
            }
        };

        let index = locate(&recordset.records, target)
            .ok_or_else(|| self.client.record_not_found(&id, "DNS record is not found"))?;
        Ok((zone_id, recordset, index))
    }

    /// Appends to the existing recordset for (name, type) or creates a new one.
    async fn create_value(&mut self) -> Result<()> {
        let zone_id = self.zone_id().await?;
        let fqdn = format_name(&self.record.name, &self.client.credential.domain_name);
        let value = encode_value(
            &self.record.record_type,
            &self.record.content,
            self.record.priority,
        );
        let ctx = ErrorContext::for_record("", &fqdn);

        let existing = self
            .client
            .search_recordset(&zone_id, &fqdn, &self.record.record_type)
            .await?;

        let (response, sent) = match existing {
            Some(recordset) => {
                // No single-value add: resubmit the whole list.
                let mut records = recordset.records;
                records.push(value);
                let body = RecordSetBody {
                    name: &fqdn,
                    record_type: &self.record.record_type,
                    ttl: non_zero_u32(self.record.ttl),
                    records: &records,
                    description: self.record.description.as_deref(),
                };
                let response = self
                    .client
                    .put_recordset(&zone_id, &recordset.id, &body, ctx)
                    .await?;
                (response, records)
            }
            None => {
                let records = vec![value];
                let body = RecordSetBody {
                    name: &fqdn,
                    record_type: &self.record.record_type,
                    ttl: non_zero_u32(self.record.ttl),
                    records: &records,
                    description: self.record.description.as_deref(),
                };
                let path = format!("/v2/zones/{zone_id}/recordsets");
                let response: RecordSet = self.client.post(&path, &body, ctx).await?;
                (response, records)
            }
        };

        // The new value is the last one submitted.
        let values = if response.records.len() == sent.len() {
            &response.records
        } else {
            &sent
        };
        self.record.id = encode_id(&response.id, &fingerprint(values, values.len() - 1));
        self.record.name = response.name;
        if let Some(ttl) = response.ttl {
            self.record.ttl = ttl;
        }
        self.record.description = response.description;
        self.source = None;
        Ok(())
    }
}

#[async_trait]
impl RecordAdapter for HuaweiAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Huawei
    }

    fn id(&self) -> &str {
        &self.record.id
    }

    fn record(&self) -> DnsRecord {
        to_dns_record(&self.record, &self.client.credential.domain_name)
    }

    fn set_record(&mut self, record: DnsRecord) {
        let previous_id = std::mem::take(&mut self.record.id);
        self.record = from_dns_record(record);
        if self.record.id.is_empty() {
            self.record.id = previous_id;
        } else if self.record.id != previous_id {
            self.source = None;
        }
    }

    async fn create(&mut self) -> Result<()> {
        self.create_value().await
    }

    async fn read(&mut self, id: &str) -> Result<()> {
        if self.record.id != id {
            self.source = None;
        }
        self.record.id = id.to_string();

        let (_, recordset, index) = self.resolve().await?;
        self.record = record_at(&recordset, index, id.to_string());
        Ok(())
    }

    async fn update(&mut self) -> Result<()> {
        let (zone_id, recordset, index) = self.resolve().await?;
        let fqdn = format_name(&self.record.name, &self.client.credential.domain_name);

        if fqdn != recordset.name || self.record.record_type != recordset.record_type {
            // Cross-recordset move: add under the new (name, type), then drop the old value.
            let old_id = std::mem::take(&mut self.record.id);
            self.source = None;
            self.create_value().await?;
            log::debug!(
                "[huawei] Moved {old_id} to {}; removing the old value",
                self.record.id
            );
            return self
                .client
                .remove_value(&zone_id, &recordset, index, &old_id)
                .await;
        }

        let mut records = recordset.records.clone();
        records[index] = encode_value(
            &self.record.record_type,
            &self.record.content,
            self.record.priority,
        );
        let body = RecordSetBody {
            name: &recordset.name,
            record_type: &recordset.record_type,
            ttl: non_zero_u32(self.record.ttl).or(recordset.ttl),
            records: &records,
            description: self.record.description.as_deref(),
        };
        let ctx = ErrorContext::for_record(&self.record.id, &recordset.name);
        let response = self
            .client
            .put_recordset(&zone_id, &recordset.id, &body, ctx)
            .await?;

        let values = if response.records.len() == records.len() {
            &response.records
        } else {
            &records
        };
        self.record.id = encode_id(&response.id, &fingerprint(values, index));
        if let Some(ttl) = response.ttl {
            self.record.ttl = ttl;
        }
        self.source = None;
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        let (zone_id, recordset, index) = self.resolve().await?;
        self.client
            .remove_value(&zone_id, &recordset, index, &self.record.id)
            .await?;
        self.source = None;
        Ok(())
    }
}

#[async_trait]
impl RecordListAdapter for HuaweiListAdapter {
    fn vendor(&self) -> VendorTag {
        VendorTag::Huawei
    }

    async fn list(&mut self) -> Result<()> {
        let zone_id = self.client.find_zone_id().await?;
        let path = format!("/v2/zones/{zone_id}/recordsets");
        let query = format!("limit={MAX_PAGE_SIZE}");
        let response: ListRecordSetsResponse = self
            .client
            .get(&path, &query, ErrorContext::default())
            .await?;

        // TODO: line-type metadata is not part of the fingerprint; verify ordering against
        // recordsets that carry multiple resolution lines.
        self.records = response
            .recordsets
            .iter()
            .flat_map(|recordset| {
                ids_for(&recordset.id, &recordset.records)
                    .into_iter()
                    .enumerate()
                    .map(move |(index, id)| record_at(recordset, index, id))
            })
            .collect();
        Ok(())
    }

    fn records(&self) -> Vec<DnsRecord> {
        let domain = &self.client.credential.domain_name;
        self.records
            .iter()
            .map(|record| to_dns_record(record, domain))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recordset(values: &[&str]) -> RecordSet {
        RecordSet {
            id: "rs1".to_string(),
            name: "www.example.com.".to_string(),
            record_type: "A".to_string(),
            ttl: Some(300),
            records: values.iter().map(|s| (*s).to_string()).collect(),
            description: None,
        }
    }

    #[test]
    fn record_at_decodes_mx_priority() {
        let rs = RecordSet {
            record_type: "MX".to_string(),
            ..recordset(&["10 mx1.example.com.", "20 mx2.example.com."])
        };
        let record = record_at(&rs, 1, "HWrs1@x".to_string());
        assert_eq!(record.content, "mx2.example.com.");
        assert_eq!(record.priority, 20);
        assert_eq!(record.ttl, 300);
    }

    #[test]
    fn dns_record_uses_relative_name() {
        let record = record_at(&recordset(&["1.1.1.1"]), 0, "HWrs1@x".to_string());
        let dns = to_dns_record(&record, "example.com");
        assert_eq!(dns.name, "www");
        assert_eq!(dns.content, "1.1.1.1");
    }

    #[test]
    fn apex_name_maps_to_at() {
        let rs = RecordSet {
            name: "example.com.".to_string(),
            ..recordset(&["1.1.1.1"])
        };
        let dns = to_dns_record(&record_at(&rs, 0, String::new()), "example.com");
        assert_eq!(dns.name, "@");
    }

    #[test]
    fn set_record_keeps_id_when_incoming_is_empty() {
        let mut adapter = HuaweiAdapter::new(
            crate::types::DomainCredential::new(VendorTag::Huawei, "example.com", "ak", "sk"),
            crate::http_client::Transport::new(&crate::config::TransportConfig::default())
                .unwrap(),
        );
        adapter.source = Some(recordset(&["1.1.1.1"]));
        adapter.set_record(DnsRecord {
            id: "HWrs1@00".to_string(),
            ..DnsRecord::new("A", "www", "1.1.1.1")
        });
        assert!(adapter.source.is_none());

        adapter.source = Some(recordset(&["1.1.1.1"]));
        adapter.set_record(DnsRecord::new("A", "www", "2.2.2.2"));
        assert_eq!(adapter.id(), "HWrs1@00");
        assert!(adapter.source.is_some());
    }
}
