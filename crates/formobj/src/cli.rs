//! Logic behind the `formobj-flatten` and `formobj-inflate` binaries.
//!
//! - `formobj-flatten` — JSON document → JSON array of `[path, value]` pairs
//! - `formobj-inflate` — JSON array of `[path, value]` pairs → JSON document

use formobj_path::{PathError, PathMode};
use serde_json::Value as Json;
use thiserror::Error;

use crate::decode::{decode_wire, DecodeError, DecodeOptions};
use crate::encode::encode_checked;
use crate::json::{mapping_to_json, to_json};
use crate::leaf::Leaf;
use crate::value::{Mapping, Value};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid field list: {0}")]
    Fields(String),
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("{0}")]
    Path(#[from] PathError),
}

/// Encode a JSON document into a pretty-printed `[[path, value], ...]` array.
pub fn flatten_json(json: &str) -> Result<String, CliError> {
    let doc: Json = serde_json::from_str(json)?;
    let pairs: Vec<Json> = encode_checked(&Value::from(doc))?
        .into_iter()
        .map(|field| {
            Json::Array(vec![
                Json::String(field.wire_name()),
                to_json(&Value::Leaf(field.value)),
            ])
        })
        .collect();
    Ok(serde_json::to_string_pretty(&Json::Array(pairs))?)
}

/// Decode a `[[path, value], ...]` array into a pretty-printed JSON document.
pub fn inflate_json(json: &str, mode: PathMode) -> Result<String, CliError> {
    let doc: Json = serde_json::from_str(json)?;
    let Json::Array(entries) = doc else {
        return Err(CliError::Fields("expected a JSON array".to_string()));
    };

    let mut pairs = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        match entry {
            Json::Array(pair) => match pair.as_slice() {
                [Json::String(name), Json::String(value)] => {
                    pairs.push((name.clone(), Leaf::scalar(value.clone())));
                }
                _ => return Err(CliError::Fields(format!("entry {i} is not a [path, value] pair"))),
            },
            _ => return Err(CliError::Fields(format!("entry {i} is not a [path, value] pair"))),
        }
    }

    let options = DecodeOptions {
        path_mode: mode,
        ..DecodeOptions::bounded()
    };
    let root = decode_wire(pairs, Mapping::new(), &options).map_err(|failure| failure.error)?;
    Ok(serde_json::to_string_pretty(&mapping_to_json(&root))?)
}

/// Installs a stderr `tracing` subscriber filtered by `RUST_LOG`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formobj=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flatten_nested_document() {
        let out = flatten_json(r#"{"a": {"b": "1"}, "c": ["2", {"d": "3"}]}"#).unwrap();
        let v: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(
            v,
            json!([["a[b]", "1"], ["c[^]", "2"], ["c[^][d]", "3"]])
        );
    }

    #[test]
    fn flatten_stringifies_numbers() {
        let out = flatten_json(r#"{"n": 42, "t": true, "z": null}"#).unwrap();
        let v: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(v, json!([["n", "42"], ["t", "true"]]));
    }

    #[test]
    fn flatten_rejects_unrepresentable_keys() {
        let err = flatten_json(r#"{"a": {"^": "1"}}"#).unwrap_err();
        assert!(matches!(err, CliError::Path(PathError::UnrepresentableKey(_))));
    }

    #[test]
    fn inflate_pairs() {
        let out = inflate_json(
            r#"[["prop1[]", "v1"], ["prop1[][]", "v2"], ["prop1[][]", "v3"]]"#,
            PathMode::Strict,
        )
        .unwrap();
        let v: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(v, json!({"prop1": ["v1", ["v2", "v3"]]}));
    }

    #[test]
    fn flatten_then_inflate() {
        let doc = json!({"a": [{"x": "1", "y": "2"}, {"z": "3"}], "b": [["4"], ["5", "6"]]});
        let flat = flatten_json(&doc.to_string()).unwrap();
        let out = inflate_json(&flat, PathMode::Strict).unwrap();
        let v: Json = serde_json::from_str(&out).unwrap();
        assert_eq!(v, doc);
    }

    #[test]
    fn inflate_rejects_bad_input() {
        assert!(matches!(inflate_json("{}", PathMode::Strict), Err(CliError::Fields(_))));
        assert!(matches!(inflate_json(r#"[["a"]]"#, PathMode::Strict), Err(CliError::Fields(_))));
        assert!(matches!(inflate_json("nope", PathMode::Strict), Err(CliError::Json(_))));

        let err = inflate_json(r#"[["a[", "1"]]"#, PathMode::Strict).unwrap_err();
        assert!(matches!(err, CliError::Decode(DecodeError { index: 0, .. })));
        assert!(inflate_json(r#"[["a[", "1"]]"#, PathMode::Lenient).is_ok());
    }

    #[test]
    fn inflate_applies_bounded_limits() {
        let name = format!("a{}", "[b]".repeat(crate::decode::BOUNDED_MAX_DEPTH));
        let input = Json::Array(vec![json!([name, "1"])]).to_string();
        let err = inflate_json(&input, PathMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            CliError::Decode(DecodeError {
                source: crate::decode::InjectError::TooDeep { .. },
                ..
            })
        ));
    }
}
