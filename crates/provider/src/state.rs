//! Resource state: the id plus the flat attribute tree.
//!
//! Change detection follows the usual plan semantics: computed-only values
//! and optional+computed values the configuration leaves unset never count
//! as changes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{FlatMap, is_present};
use crate::schema::{Attribute, AttributeType, BlockSchema, Presence};

/// Stored state of one resource instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    attributes: FlatMap,
}

impl ResourceData {
    /// State for a resource that does not exist yet.
    pub fn from_config(config: FlatMap) -> Self {
        Self {
            id: None,
            attributes: config,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Forget the remote object; the resource no longer exists.
    pub fn clear(&mut self) {
        self.id = None;
        self.attributes.clear();
    }

    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    pub fn attributes(&self) -> &FlatMap {
        &self.attributes
    }

    /// Attribute value; `null` reads as unset.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|value| !value.is_null())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }

    pub fn replace_attributes(&mut self, attributes: FlatMap) {
        self.attributes = attributes;
    }
}

/// Names of top-level attributes whose configured value differs from state.
///
/// Local attributes are compared only when `include_local` is set.
pub fn changed_attributes(
    block: &BlockSchema,
    prior: &FlatMap,
    config: &FlatMap,
    include_local: bool,
) -> Vec<&'static str> {
    block
        .attributes
        .iter()
        .filter(|attr| include_local || !attr.local)
        .filter(|attr| !attr.is_computed_only())
        .filter(|attr| {
            let wanted = effective(attr, config.get(attr.name));
            if !is_present(wanted) && attr.presence == Presence::OptionalComputed {
                return false;
            }
            !values_equal(&attr.kind, effective(attr, prior.get(attr.name)), wanted)
        })
        .map(|attr| attr.name)
        .collect()
}

/// An optional single union with no variant selected never reaches the wire,
/// so it reads as unset.
fn effective<'a>(attr: &Attribute, value: Option<&'a Value>) -> Option<&'a Value> {
    let AttributeType::Block {
        schema,
        max_items: Some(1),
    } = &attr.kind
    else {
        return value;
    };
    if !schema.is_union() || attr.is_required() {
        return value;
    }
    let no_variant = value.and_then(Value::as_array).is_some_and(|items| {
        items.iter().all(|item| {
            item.as_object().is_none_or(|block| {
                schema
                    .attributes
                    .iter()
                    .all(|variant| !is_present(block.get(variant.name)))
            })
        })
    });
    if no_variant { None } else { value }
}

fn values_equal(kind: &AttributeType, prior: Option<&Value>, wanted: Option<&Value>) -> bool {
    match (is_present(prior), is_present(wanted)) {
        (false, false) => return true,
        (true, false) | (false, true) => return false,
        (true, true) => {}
    }
    let (Some(prior), Some(wanted)) = (prior, wanted) else {
        return false;
    };

    match kind {
        AttributeType::Leaf(_) => scalar_equal(prior, wanted),
        AttributeType::List(_) => match (prior.as_array(), wanted.as_array()) {
            (Some(a), Some(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| scalar_equal(x, y))
            }
            _ => false,
        },
        AttributeType::Block { schema, .. } => match (prior.as_array(), wanted.as_array()) {
            (Some(a), Some(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| {
                        let empty = FlatMap::new();
                        let x = x.as_object().unwrap_or(&empty);
                        let y = y.as_object().unwrap_or(&empty);
                        changed_attributes(schema, x, y, true).is_empty()
                    })
            }
            _ => false,
        },
    }
}

/// Numbers compare by value so `0` and `0.0` are the same.
fn scalar_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}
