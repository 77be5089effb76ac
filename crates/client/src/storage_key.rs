//! Storage attributes key codec.
//!
//! The stock-query side packs the attribute values identifying one stock lot
//! into a single string. Two reserved keys stand for aggregates instead of a
//! concrete attribute combination. These constants are a shared contract with
//! that side and must match its encoding exactly.

use serde::{Deserialize, Serialize};

use dispo_core::{AttributeValueId, DomainError, DomainResult};

/// Key of rows that aggregate stock over every attribute combination.
pub const STORAGE_ATTRIBUTES_KEY_ALL: &str = "<ALL_STORAGE_ATTRIBUTES_KEYS>";

/// Key of rows that aggregate stock over combinations not otherwise tracked.
pub const STORAGE_ATTRIBUTES_KEY_OTHER: &str = "<OTHER_STORAGE_ATTRIBUTES_KEYS>";

/// Separates attribute value ids inside a packed key.
pub const STORAGE_ATTRIBUTES_KEY_DELIMITER: char = ',';

/// Attribute scope of one available-stock group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupKind {
    AllStorageKeys,
    OtherStorageKeys,
    AttributeSet,
}

/// Result of decoding a storage attributes key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedKey {
    pub kind: GroupKind,
    /// In key order; empty unless `kind` is [`GroupKind::AttributeSet`].
    pub attribute_value_ids: Vec<AttributeValueId>,
}

impl DecodedKey {
    fn sentinel(kind: GroupKind) -> Self {
        Self {
            kind,
            attribute_value_ids: Vec::new(),
        }
    }
}

/// Classify a key by its sentinel value only. Never fails.
pub fn classify_key(key: &str) -> GroupKind {
    match key {
        STORAGE_ATTRIBUTES_KEY_ALL => GroupKind::AllStorageKeys,
        STORAGE_ATTRIBUTES_KEY_OTHER => GroupKind::OtherStorageKeys,
        _ => GroupKind::AttributeSet,
    }
}

/// Decode a storage attributes key into its kind and attribute value ids.
///
/// An empty key is not a sentinel and decodes to an attribute set with no
/// values. Consumers may rely on that, so it is kept and logged.
pub fn decode_key(key: &str) -> DomainResult<DecodedKey> {
    let kind = classify_key(key);
    if kind != GroupKind::AttributeSet {
        return Ok(DecodedKey::sentinel(kind));
    }

    if key.is_empty() {
        tracing::warn!("empty storage attributes key decoded as attribute set without values");
        return Ok(DecodedKey::sentinel(GroupKind::AttributeSet));
    }

    let attribute_value_ids = key
        .split(STORAGE_ATTRIBUTES_KEY_DELIMITER)
        .map(|token| {
            token
                .parse::<AttributeValueId>()
                .map_err(|_| DomainError::invalid_key_format(token, key))
        })
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(DecodedKey {
        kind,
        attribute_value_ids,
    })
}

/// Pack attribute value ids into a storage attributes key.
///
/// An empty id list encodes to the empty key, which decodes back to an
/// attribute set without values (never to a sentinel).
pub fn encode_key(ids: impl IntoIterator<Item = AttributeValueId>) -> String {
    let mut key = String::new();
    for (i, id) in ids.into_iter().enumerate() {
        if i > 0 {
            key.push(STORAGE_ATTRIBUTES_KEY_DELIMITER);
        }
        key.push_str(&id.to_string());
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispo_core::ErrorKind;

    fn ids(raw: &[i32]) -> Vec<AttributeValueId> {
        raw.iter().copied().map(AttributeValueId::new).collect()
    }

    #[test]
    fn all_sentinel_decodes_to_all_storage_keys() {
        let decoded = decode_key(STORAGE_ATTRIBUTES_KEY_ALL).unwrap();
        assert_eq!(decoded.kind, GroupKind::AllStorageKeys);
        assert!(decoded.attribute_value_ids.is_empty());
    }

    #[test]
    fn other_sentinel_decodes_to_other_storage_keys() {
        let decoded = decode_key(STORAGE_ATTRIBUTES_KEY_OTHER).unwrap();
        assert_eq!(decoded.kind, GroupKind::OtherStorageKeys);
        assert!(decoded.attribute_value_ids.is_empty());
    }

    #[test]
    fn packed_ids_keep_key_order() {
        let decoded = decode_key("12,45,7").unwrap();
        assert_eq!(decoded.kind, GroupKind::AttributeSet);
        assert_eq!(decoded.attribute_value_ids, ids(&[12, 45, 7]));
    }

    #[test]
    fn duplicate_ids_are_not_collapsed() {
        let decoded = decode_key("7,7").unwrap();
        assert_eq!(decoded.attribute_value_ids, ids(&[7, 7]));
    }

    #[test]
    fn non_integer_token_is_invalid_key_format() {
        let err = decode_key("12,abc").unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidKeyFormat {
                token: "abc".to_string(),
                key: "12,abc".to_string(),
            }
        );
        assert!(err.to_string().contains("\"abc\""));
    }

    #[test]
    fn empty_inner_token_is_invalid_key_format() {
        let err = decode_key("12,,7").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidKeyFormat { token, .. } if token.is_empty()
        ));
    }

    #[test]
    fn sentinel_lookalikes_are_parsed_as_attribute_sets() {
        let err = decode_key(" <ALL_STORAGE_ATTRIBUTES_KEYS>").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidKeyFormat { .. }));
        assert_eq!(classify_key("<all_storage_attributes_keys>"), GroupKind::AttributeSet);
    }

    #[test]
    fn empty_key_is_an_attribute_set_without_values() {
        let decoded = decode_key("").unwrap();
        assert_eq!(decoded.kind, GroupKind::AttributeSet);
        assert!(decoded.attribute_value_ids.is_empty());
    }

    #[test]
    fn encode_joins_with_delimiter() {
        assert_eq!(encode_key(ids(&[12, 45, 7])), "12,45,7");
        assert_eq!(encode_key(ids(&[3])), "3");
        assert_eq!(encode_key(Vec::new()), "");
    }

    #[test]
    fn group_kind_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&GroupKind::OtherStorageKeys).unwrap();
        assert_eq!(json, "\"OTHER_STORAGE_KEYS\"");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: n integer tokens decode to an attribute set of n ids, in order.
            #[test]
            fn integer_tokens_decode_in_order(raw in proptest::collection::vec(any::<i32>(), 1..16)) {
                let key = raw.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",");

                let decoded = decode_key(&key).unwrap();

                prop_assert_eq!(decoded.kind, GroupKind::AttributeSet);
                prop_assert_eq!(decoded.attribute_value_ids, ids(&raw));
            }

            /// Property: any non-integer token fails, naming that token.
            #[test]
            fn non_integer_token_is_named(
                prefix in proptest::collection::vec(any::<i32>(), 0..5),
                bad in "[a-z]{1,8}",
            ) {
                let mut tokens: Vec<String> = prefix.iter().map(|id| id.to_string()).collect();
                tokens.push(bad.clone());
                let key = tokens.join(",");

                let err = decode_key(&key).unwrap_err();

                prop_assert_eq!(
                    err.kind(),
                    &ErrorKind::InvalidKeyFormat { token: bad, key: key.clone() }
                );
            }

            /// Property: encoding then decoding yields the same ids.
            #[test]
            fn encoded_ids_decode_back(raw in proptest::collection::vec(any::<i32>(), 1..16)) {
                let decoded = decode_key(&encode_key(ids(&raw))).unwrap();
                prop_assert_eq!(decoded.attribute_value_ids, ids(&raw));
            }
        }
    }
}
