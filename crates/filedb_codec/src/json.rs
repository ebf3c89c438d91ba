//! JSON encoding of the `{count, data}` envelope.

use crate::container::DataContainer;
use crate::error::{CodecError, CodecResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Output formatting for encoded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// Single-line output with no insignificant whitespace.
    #[default]
    Compact,
    /// Indented, human-editable output.
    Pretty,
}

/// Borrowed view used for encoding so `count` is always derived from `data`.
#[derive(Serialize)]
struct Envelope<'a, T> {
    count: u64,
    data: &'a [T],
}

/// Encode a container to JSON bytes.
///
/// The `count` field is taken from the live record sequence, not from
/// `container.count`, so a stale count is never written.
///
/// # Errors
///
/// Returns `EncodingFailed` if a record cannot be serialized.
pub fn encode_container<T: Serialize>(
    container: &DataContainer<T>,
    style: JsonStyle,
) -> CodecResult<Vec<u8>> {
    encode_records(&container.data, style)
}

/// Encode a record slice as a complete document.
///
/// # Errors
///
/// Returns `EncodingFailed` if a record cannot be serialized.
pub fn encode_records<T: Serialize>(records: &[T], style: JsonStyle) -> CodecResult<Vec<u8>> {
    let envelope = Envelope {
        count: records.len() as u64,
        data: records,
    };

    let result = match style {
        JsonStyle::Compact => serde_json::to_vec(&envelope),
        JsonStyle::Pretty => serde_json::to_vec_pretty(&envelope),
    };

    result.map_err(|e| CodecError::encoding_failed(e.to_string()))
}

/// Decode JSON bytes into a container.
///
/// # Errors
///
/// Returns:
/// - `DecodingFailed` if the bytes are not a `{count, data}` document whose
///   records match `T`
/// - `CountMismatch` if `count` differs from the number of records
pub fn decode_container<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<DataContainer<T>> {
    let container: DataContainer<T> =
        serde_json::from_slice(bytes).map_err(|e| CodecError::decoding_failed(e.to_string()))?;

    if !container.is_consistent() {
        return Err(CodecError::CountMismatch {
            declared: container.count,
            actual: container.data.len() as u64,
        });
    }

    Ok(container)
}

/// Returns the bytes of a document holding zero records.
///
/// # Errors
///
/// Returns `EncodingFailed` only if JSON serialization itself fails.
pub fn empty_document(style: JsonStyle) -> CodecResult<Vec<u8>> {
    encode_records::<serde_json::Value>(&[], style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        #[serde(rename = "_id")]
        id: String,
        qty: u32,
    }

    fn item(id: &str, qty: u32) -> Item {
        Item {
            id: id.to_string(),
            qty,
        }
    }

    #[test]
    fn compact_layout() {
        let container = DataContainer::from_records(vec![item("a", 1)]);
        let bytes = encode_container(&container, JsonStyle::Compact).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"count":1,"data":[{"_id":"a","qty":1}]}"#
        );
    }

    #[test]
    fn pretty_decodes_identically() {
        let container = DataContainer::from_records(vec![item("a", 1), item("b", 2)]);
        let bytes = encode_container(&container, JsonStyle::Pretty).unwrap();
        assert!(bytes.contains(&b'\n'));

        let decoded: DataContainer<Item> = decode_container(&bytes).unwrap();
        assert_eq!(decoded, container);
    }

    #[test]
    fn stale_count_is_never_encoded() {
        let mut container = DataContainer::from_records(vec![item("a", 1)]);
        container.data.push(item("b", 2));
        assert_eq!(container.count, 1);

        let bytes = encode_container(&container, JsonStyle::Compact).unwrap();
        let decoded: DataContainer<Item> = decode_container(&bytes).unwrap();
        assert_eq!(decoded.count, 2);
    }

    #[test]
    fn decode_rejects_count_mismatch() {
        let bytes = br#"{"count":3,"data":[{"_id":"a","qty":1}]}"#;
        let err = decode_container::<Item>(bytes).unwrap_err();
        assert_eq!(
            err,
            CodecError::CountMismatch {
                declared: 3,
                actual: 1
            }
        );
    }

    #[test]
    fn decode_rejects_wrong_record_shape() {
        let bytes = br#"{"count":1,"data":[{"_id":"a","qty":"lots"}]}"#;
        let err = decode_container::<Item>(bytes).unwrap_err();
        assert!(matches!(err, CodecError::DecodingFailed { .. }));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_container::<Item>(b"not json").unwrap_err();
        assert!(matches!(err, CodecError::DecodingFailed { .. }));
    }

    #[test]
    fn decode_rejects_missing_fields() {
        let err = decode_container::<Item>(br#"{"data":[]}"#).unwrap_err();
        assert!(matches!(err, CodecError::DecodingFailed { .. }));
    }

    #[test]
    fn empty_document_decodes_for_any_record_type() {
        let bytes = empty_document(JsonStyle::Compact).unwrap();
        assert_eq!(bytes, br#"{"count":0,"data":[]}"#);

        let decoded: DataContainer<Item> = decode_container(&bytes).unwrap();
        assert!(decoded.is_empty());
    }
}
