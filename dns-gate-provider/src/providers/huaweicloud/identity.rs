//! Compound record identity for Huawei recordsets.
//!
//! Huawei only assigns ids to recordsets, which bundle every value sharing a
//! `(name, type)` pair. A logical record is addressed as
//! `"HW" + recordset_id + "@" + fingerprint`, where the fingerprint is the
//! first 6 bytes of the value's SHA-256 digest followed by one byte counting
//! identical values earlier in the list, all hex encoded.
//!
//! Fingerprints are recomputed from the current value list on every lookup,
//! so an id survives reads and sibling deletes of other values, but not an
//! edit of its own value.

use sha2::{Digest, Sha256};

const ID_PREFIX: &str = "HW";
const ID_SEPARATOR: char = '@';
const DIGEST_PREFIX_LEN: usize = 6;

/// Fingerprint of `values[index]`.
///
/// `index` must be in bounds.
pub(crate) fn fingerprint(values: &[String], index: usize) -> String {
    let value = &values[index];
    let duplicate_order = values[..index].iter().filter(|v| *v == value).count();

    let digest = Sha256::digest(value.as_bytes());
    let mut bytes = digest[..DIGEST_PREFIX_LEN].to_vec();
    // Saturates past 255 identical values, far above vendor recordset limits.
    bytes.push(u8::try_from(duplicate_order).unwrap_or(u8::MAX));
    hex::encode(bytes)
}

/// Builds the opaque id for one value of a recordset.
pub(crate) fn encode_id(recordset_id: &str, fingerprint: &str) -> String {
    format!("{ID_PREFIX}{recordset_id}{ID_SEPARATOR}{fingerprint}")
}

/// Splits an opaque id into `(recordset_id, fingerprint)`.
///
/// Returns `None` unless the id carries the `HW` prefix and exactly one `@`
/// with non-empty parts on both sides.
pub(crate) fn decode_id(id: &str) -> Option<(&str, &str)> {
    let rest = id.strip_prefix(ID_PREFIX)?;
    let mut parts = rest.split(ID_SEPARATOR);
    let (recordset_id, fingerprint) = (parts.next()?, parts.next()?);
    if parts.next().is_some() || recordset_id.is_empty() || fingerprint.is_empty() {
        return None;
    }
    Some((recordset_id, fingerprint))
}

/// Position of the value whose fingerprint equals `target`.
pub(crate) fn locate(values: &[String], target: &str) -> Option<usize> {
    (0..values.len()).find(|&i| fingerprint(values, i) == target)
}

/// Opaque ids for every value of a recordset, in list order.
pub(crate) fn ids_for(recordset_id: &str, values: &[String]) -> Vec<String> {
    (0..values.len())
        .map(|i| encode_id(recordset_id, &fingerprint(values, i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn fingerprint_is_seven_hex_bytes() {
        let fp = fingerprint(&values(&["1.1.1.1"]), 0);
        assert_eq!(fp.len(), 14);
        assert!(fp.ends_with("00"));
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn duplicates_get_distinct_fingerprints() {
        let vals = values(&["a", "a", "b"]);
        let first = fingerprint(&vals, 0);
        let second = fingerprint(&vals, 1);
        assert_ne!(first, second);
        assert_eq!(first[..12], second[..12]);
        assert!(second.ends_with("01"));
    }

    #[test]
    fn every_position_resolves_to_itself() {
        let vals = values(&["a", "b", "a", "c", "a", "b"]);
        for i in 0..vals.len() {
            assert_eq!(locate(&vals, &fingerprint(&vals, i)), Some(i));
        }
    }

    #[test]
    fn unchanged_value_survives_sibling_delete() {
        let before = values(&["1.1.1.1", "2.2.2.2", "3.3.3.3"]);
        let fp = fingerprint(&before, 2);
        let after = values(&["1.1.1.1", "3.3.3.3"]);
        assert_eq!(locate(&after, &fp), Some(1));
    }

    #[test]
    fn edited_value_is_no_longer_found() {
        let fp = fingerprint(&values(&["1.1.1.1"]), 0);
        assert_eq!(locate(&values(&["9.9.9.9"]), &fp), None);
    }

    #[test]
    fn id_round_trips() {
        let id = encode_id("ff80808275", "0123456789abcd");
        assert_eq!(id, "HWff80808275@0123456789abcd");
        assert_eq!(decode_id(&id), Some(("ff80808275", "0123456789abcd")));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for id in ["", "HW", "12345", "HWabc", "HW@fp", "HWabc@", "HWa@b@c", "hwabc@fp"] {
            assert_eq!(decode_id(id), None, "{id} should not decode");
        }
    }

    #[test]
    fn ids_for_lists_one_per_value() {
        let ids = ids_for("rs1", &values(&["a", "a", "b"]));
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert!(ids.iter().all(|id| id.starts_with("HWrs1@")));
    }
}
