//! Schema-driven mapping between the flat attribute form and the wire form.
//!
//! The flat form is what configuration and state hold: every nested object
//! is a list of blocks, and a oneof slot is a block with at most one of its
//! variant attributes populated. The wire form is the API JSON, where nested
//! objects are plain objects and the chosen variant is a single key.
//!
//! [`expand`] goes flat → wire, [`flatten`] goes wire → flat. Both walk a
//! [`BlockSchema`] and know nothing about dashboards; the typed helpers
//! [`expand_typed`] and [`flatten_typed`] add the serde step to and from the
//! client models.
//!
//! # Invariants
//! - A variant is present when its value is a non-empty list (block and list
//!   attributes) or a non-null value (leaves)
//! - A `null` block element is an empty block `{}`
//! - Local and computed-only attributes are never written to the wire
//! - Every nested wire object comes back as a one-element list
//! - Unknown keys are fatal in blocks that declare oneof groups, where any
//!   of them may be a new variant, and ignored elsewhere

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::error::ConversionError;
use crate::schema::{AttributeType, BlockSchema, ValueType};

pub type FlatMap = Map<String, Value>;

pub(crate) fn child(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

pub(crate) fn index(path: &str, i: usize) -> String {
    format!("{path}.{i}")
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "block",
    }
}

/// Whether an attribute value selects its variant.
pub(crate) fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Convert a scalar to `value_type`.
///
/// Integers are accepted for floats, and integral floats for integers.
pub(crate) fn coerce(
    value_type: ValueType,
    value: &Value,
    path: &str,
) -> Result<Value, ConversionError> {
    let coerced = match value_type {
        ValueType::String => value.as_str().map(|s| Value::String(s.to_string())),
        ValueType::Bool => value.as_bool().map(Value::Bool),
        ValueType::Int => value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .map(Value::from),
        ValueType::Float => value.as_f64().and_then(Number::from_f64).map(Value::Number),
    };
    coerced.ok_or_else(|| ConversionError::TypeMismatch {
        path: path.to_string(),
        expected: value_type.as_str(),
        found: kind_of(value),
    })
}

pub(crate) fn as_list<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], ConversionError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(ConversionError::TypeMismatch {
            path: path.to_string(),
            expected: "list",
            found: kind_of(other),
        }),
    }
}

/// A block element; `None` stands for the empty block.
pub(crate) fn as_block<'a>(
    value: &'a Value,
    path: &str,
) -> Result<Option<&'a FlatMap>, ConversionError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(object) => Ok(Some(object)),
        other => Err(ConversionError::TypeMismatch {
            path: path.to_string(),
            expected: "block",
            found: kind_of(other),
        }),
    }
}

/// Names of the variants that are set, per oneof group with more than one.
pub(crate) fn conflicting_variants(block: &BlockSchema, flat: &FlatMap) -> Vec<Vec<String>> {
    block
        .oneofs
        .iter()
        .map(|group| {
            group
                .variants
                .iter()
                .filter(|variant| is_present(flat.get(**variant)))
                .map(|variant| variant.to_string())
                .collect::<Vec<_>>()
        })
        .filter(|set| set.len() > 1)
        .collect()
}

fn missing_variant(block: &BlockSchema, path: &str) -> ConversionError {
    ConversionError::MissingVariant {
        path: path.to_string(),
        variants: block.union_variants().iter().map(|v| v.to_string()).collect(),
    }
}

/// Map a flat block to its wire object.
pub fn expand(
    block: &BlockSchema,
    flat: &FlatMap,
    path: &str,
) -> Result<FlatMap, ConversionError> {
    if let Some(variants) = conflicting_variants(block, flat).into_iter().next() {
        return Err(ConversionError::MultipleVariants {
            path: path.to_string(),
            variants,
        });
    }

    let mut wire = Map::new();
    for attr in block.attributes.iter().filter(|attr| attr.is_sent()) {
        let attr_path = child(path, attr.name);
        let Some(value) = flat.get(attr.name).filter(|value| !value.is_null()) else {
            if attr.is_required() {
                return Err(ConversionError::MissingRequired { path: attr_path });
            }
            continue;
        };

        match &attr.kind {
            AttributeType::Leaf(value_type) => {
                wire.insert(attr.wire_key().to_string(), coerce(*value_type, value, &attr_path)?);
            }
            AttributeType::List(value_type) => {
                let items = as_list(value, &attr_path)?;
                if items.is_empty() {
                    if attr.is_required() {
                        return Err(ConversionError::MissingRequired { path: attr_path });
                    }
                    continue;
                }
                let coerced = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| coerce(*value_type, item, &index(&attr_path, i)))
                    .collect::<Result<Vec<_>, _>>()?;
                wire.insert(attr.wire_key().to_string(), Value::Array(coerced));
            }
            AttributeType::Block { schema, max_items } => {
                let items = as_list(value, &attr_path)?;
                if let Some(max) = *max_items
                    && items.len() > max
                {
                    return Err(ConversionError::TooManyItems {
                        path: attr_path,
                        max,
                        found: items.len(),
                    });
                }
                if items.is_empty() {
                    if attr.is_required() {
                        return Err(ConversionError::MissingRequired { path: attr_path });
                    }
                    continue;
                }

                let mut objects = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let item_path = index(&attr_path, i);
                    let empty = Map::new();
                    let element = as_block(item, &item_path)?.unwrap_or(&empty);
                    let object = expand(schema, element, &item_path)?;
                    // A union element with no variant only stands for "absent"
                    // in an optional single-item slot.
                    if schema.is_union() && object.is_empty() {
                        if *max_items == Some(1) && !attr.is_required() {
                            continue;
                        }
                        return Err(missing_variant(schema, &item_path));
                    }
                    objects.push(Value::Object(object));
                }

                if *max_items == Some(1) {
                    if let Some(object) = objects.pop() {
                        wire.insert(attr.wire_key().to_string(), object);
                    }
                } else {
                    wire.insert(attr.wire_key().to_string(), Value::Array(objects));
                }
            }
        }
    }
    Ok(wire)
}

/// Map a wire object back to its flat block.
pub fn flatten(
    block: &BlockSchema,
    wire: &FlatMap,
    path: &str,
) -> Result<FlatMap, ConversionError> {
    for key in wire.keys() {
        if block
            .attribute_by_wire_key(key)
            .is_some_and(|attr| !attr.local)
        {
            continue;
        }
        if block.has_oneofs() {
            return Err(ConversionError::UnrecognizedSubtype {
                path: path.to_string(),
                key: key.clone(),
            });
        }
        tracing::debug!(path = %path, key = %key, "Ignoring unknown attribute in response");
    }

    let mut flat = Map::new();
    for attr in block.attributes.iter().filter(|attr| !attr.local) {
        let Some(value) = wire.get(attr.wire_key()).filter(|value| !value.is_null()) else {
            continue;
        };
        let attr_path = child(path, attr.name);

        let flat_value = match &attr.kind {
            AttributeType::Leaf(value_type) => coerce(*value_type, value, &attr_path)?,
            AttributeType::List(value_type) => Value::Array(
                as_list(value, &attr_path)?
                    .iter()
                    .enumerate()
                    .map(|(i, item)| coerce(*value_type, item, &index(&attr_path, i)))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            AttributeType::Block { schema, .. } => {
                let elements: &[Value] = match value {
                    Value::Object(_) => std::slice::from_ref(value),
                    other => as_list(other, &attr_path)?,
                };
                let mut blocks = Vec::with_capacity(elements.len());
                for (i, element) in elements.iter().enumerate() {
                    let item_path = index(&attr_path, i);
                    let empty = Map::new();
                    let object = as_block(element, &item_path)?.unwrap_or(&empty);
                    blocks.push(Value::Object(flatten(schema, object, &item_path)?));
                }
                Value::Array(blocks)
            }
        };
        flat.insert(attr.name.to_string(), flat_value);
    }
    Ok(flat)
}

/// [`expand`] followed by decoding into a client model.
pub fn expand_typed<T: DeserializeOwned>(
    block: &BlockSchema,
    flat: &FlatMap,
    path: &str,
) -> Result<T, ConversionError> {
    let wire = expand(block, flat, path)?;
    serde_json::from_value(Value::Object(wire)).map_err(|e| ConversionError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Encoding a client model followed by [`flatten`].
pub fn flatten_typed<T: Serialize>(
    block: &BlockSchema,
    value: &T,
    path: &str,
) -> Result<FlatMap, ConversionError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(wire)) => flatten(block, &wire, path),
        Ok(other) => Err(ConversionError::Encode {
            path: path.to_string(),
            message: format!("expected an object, got {}", kind_of(&other)),
        }),
        Err(e) => Err(ConversionError::Encode {
            path: path.to_string(),
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;
    use serde_json::json;

    fn object(value: Value) -> FlatMap {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn selection() -> BlockSchema {
        BlockSchema::union(
            "selection",
            vec![
                Attribute::block("all", BlockSchema::default()),
                Attribute::block("list", BlockSchema::new(vec![Attribute::strings("values")])),
            ],
        )
    }

    fn widget() -> BlockSchema {
        BlockSchema::new(vec![
            Attribute::string("owner").local(),
            Attribute::string("widget_id").computed().wire_name("id"),
            Attribute::string("title").required(),
            Attribute::int("height"),
            Attribute::float("ratio"),
            Attribute::strings("tags"),
            Attribute::block("selection", selection()),
            Attribute::block("required_selection", selection()).required(),
            Attribute::string("relative"),
            Attribute::block("absolute", BlockSchema::new(vec![Attribute::string("from")])),
        ])
        .with_oneof("time", vec!["relative", "absolute"])
    }

    fn minimal() -> FlatMap {
        object(json!({ "title": "t", "required_selection": [{ "all": [null] }] }))
    }

    #[test]
    fn test_expand_copies_leaves_with_coercion() {
        let mut flat = minimal();
        flat.insert("height".into(), json!(4.0));
        flat.insert("ratio".into(), json!(1));
        flat.insert("tags".into(), json!(["a", "b"]));

        let wire = expand(&widget(), &flat, "").unwrap();
        assert_eq!(wire["height"], json!(4));
        assert!(wire["height"].is_i64());
        assert!(wire["ratio"].is_f64());
        assert_eq!(wire["tags"], json!(["a", "b"]));
        assert_eq!(wire["required_selection"], json!({ "all": {} }));
    }

    #[test]
    fn test_expand_skips_local_and_computed() {
        let mut flat = minimal();
        flat.insert("owner".into(), json!("me"));
        flat.insert("widget_id".into(), json!("w-1"));

        let wire = expand(&widget(), &flat, "").unwrap();
        assert!(!wire.contains_key("owner"));
        assert!(!wire.contains_key("id"));
        assert!(!wire.contains_key("widget_id"));
    }

    #[test]
    fn test_zero_variant_optional_union_is_absent() {
        let mut flat = minimal();
        flat.insert("selection".into(), json!([{}]));

        let wire = expand(&widget(), &flat, "").unwrap();
        assert!(!wire.contains_key("selection"));
    }

    #[test]
    fn test_zero_variant_required_union_is_an_error() {
        let flat = object(json!({ "title": "t", "required_selection": [{}] }));
        let err = expand(&widget(), &flat, "").unwrap_err();
        assert_eq!(
            err,
            ConversionError::MissingVariant {
                path: "required_selection.0".into(),
                variants: vec!["all".into(), "list".into()],
            }
        );
    }

    #[test]
    fn test_missing_required_leaf_reports_path() {
        let flat = object(json!({ "required_selection": [{ "all": [{}] }] }));
        let err = expand(&widget(), &flat, "widgets.0").unwrap_err();
        assert_eq!(
            err,
            ConversionError::MissingRequired {
                path: "widgets.0.title".into()
            }
        );
    }

    #[test]
    fn test_empty_required_list_is_missing() {
        let flat = object(json!({ "title": "t", "required_selection": [] }));
        let err = expand(&widget(), &flat, "").unwrap_err();
        assert_eq!(
            err,
            ConversionError::MissingRequired {
                path: "required_selection".into()
            }
        );
    }

    #[test]
    fn test_multiple_variants_rejected() {
        let mut flat = minimal();
        flat.insert("relative".into(), json!("15m"));
        flat.insert("absolute".into(), json!([{ "from": "now" }]));

        let err = expand(&widget(), &flat, "").unwrap_err();
        assert_eq!(
            err,
            ConversionError::MultipleVariants {
                path: String::new(),
                variants: vec!["relative".into(), "absolute".into()],
            }
        );
    }

    #[test]
    fn test_too_many_items() {
        let mut flat = minimal();
        flat.insert("absolute".into(), json!([{ "from": "a" }, { "from": "b" }]));
        let err = expand(&widget(), &flat, "").unwrap_err();
        assert!(matches!(err, ConversionError::TooManyItems { max: 1, found: 2, .. }));
    }

    #[test]
    fn test_type_mismatch() {
        let mut flat = minimal();
        flat.insert("height".into(), json!("tall"));
        let err = expand(&widget(), &flat, "").unwrap_err();
        assert_eq!(
            err,
            ConversionError::TypeMismatch {
                path: "height".into(),
                expected: "int",
                found: "string",
            }
        );
    }

    #[test]
    fn test_flatten_wraps_objects_in_lists() {
        let wire = object(json!({
            "id": "w-1",
            "title": "t",
            "required_selection": { "list": { "values": ["x"] } },
            "relative": "15m",
        }));

        let flat = flatten(&widget(), &wire, "").unwrap();
        assert_eq!(flat["widget_id"], json!("w-1"));
        assert_eq!(
            flat["required_selection"],
            json!([{ "list": [{ "values": ["x"] }] }])
        );
        assert_eq!(flat["relative"], json!("15m"));
        assert!(!flat.contains_key("absolute"));
    }

    #[test]
    fn test_flatten_rejects_unknown_union_key() {
        let wire = object(json!({
            "title": "t",
            "required_selection": { "none": {} },
        }));
        let err = flatten(&widget(), &wire, "").unwrap_err();
        assert_eq!(err.to_string(), "unrecognized subtype 'none' at required_selection.0");
    }

    #[test]
    fn test_flatten_rejects_unknown_key_next_to_oneof_group() {
        let wire = object(json!({
            "title": "t",
            "required_selection": { "all": {} },
            "sliding": "5m",
        }));
        let err = flatten(&widget(), &wire, "widgets.0").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnrecognizedSubtype {
                path: "widgets.0".into(),
                key: "sliding".into(),
            }
        );
    }

    #[test]
    fn test_flatten_keeps_every_known_variant() {
        let wire = object(json!({
            "title": "t",
            "required_selection": { "all": {} },
            "relative": "15m",
            "absolute": { "from": "now-1h" },
        }));
        let flat = flatten(&widget(), &wire, "").unwrap();
        assert_eq!(flat["relative"], json!("15m"));
        assert_eq!(flat["absolute"], json!([{ "from": "now-1h" }]));
    }

    #[test]
    fn test_flatten_ignores_unknown_keys_in_plain_blocks() {
        let plain = BlockSchema::new(vec![
            Attribute::string("owner").local(),
            Attribute::string("title").required(),
        ]);
        let wire = object(json!({
            "title": "t",
            "owner": "server-side",
            "extra": 1,
        }));
        let flat = flatten(&plain, &wire, "").unwrap();
        assert_eq!(Value::Object(flat), json!({ "title": "t" }));
    }

    #[test]
    fn test_reverse_of_forward_is_identity() {
        let flat = object(json!({
            "title": "t",
            "height": 3,
            "ratio": 0.5,
            "tags": ["a"],
            "selection": [{ "list": [{ "values": ["a", "b"] }] }],
            "required_selection": [{ "all": [{}] }],
            "absolute": [{ "from": "now-1h" }],
        }));

        let wire = expand(&widget(), &flat, "").unwrap();
        let back = flatten(&widget(), &wire, "").unwrap();
        assert_eq!(back, flat);
    }
}
