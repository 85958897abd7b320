//! Declarative schema tables for resources.
//!
//! A [`ResourceSchema`] describes the flat attribute tree of a resource:
//! every leaf, every nested block and every oneof group. The codec and the
//! validator are generic over it, so a resource is defined once as data and
//! never as hand-written conversion code.
//!
//! # Invariants
//! - Attribute names are unique within a block
//! - Every variant named by a [`OneofGroup`] is an attribute of the same block
//! - A block whose attributes are all variants of a single group is a
//!   *union block* (see [`BlockSchema::is_union`])

pub mod dashboard;

use regex::Regex;
use serde_json::{Map, Value, json};

/// Scalar type of a leaf attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Bool,
    Int,
    Float,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
        }
    }
}

/// Shape of an attribute value.
#[derive(Debug, Clone)]
pub enum AttributeType {
    /// A single scalar.
    Leaf(ValueType),
    /// A list of scalars.
    List(ValueType),
    /// A nested block, held in the flat form as a list of objects.
    Block {
        schema: BlockSchema,
        max_items: Option<usize>,
    },
}

/// Who supplies an attribute's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// Assigned by the server, never sent.
    Computed,
    /// May be configured; filled in by the server otherwise.
    OptionalComputed,
}

impl Presence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Presence::Required => "required",
            Presence::Optional => "optional",
            Presence::Computed => "computed",
            Presence::OptionalComputed => "optional_computed",
        }
    }
}

/// Plan-time check applied to a leaf value.
#[derive(Debug, Clone)]
pub enum Validator {
    /// String length in characters, inclusive bounds.
    Length { min: usize, max: usize },
    Pattern(Regex),
    OneOf(&'static [&'static str]),
    IntRange { min: i64, max: i64 },
}

impl Validator {
    /// Compile a pattern validator.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Validator::Pattern)
    }

    /// Check `value`, returning a message describing the failure.
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            Validator::Length { min, max } => {
                let len = value.as_str()?.chars().count();
                (len < *min || len > *max)
                    .then(|| format!("length must be between {min} and {max}, got {len}"))
            }
            Validator::Pattern(regex) => {
                let text = value.as_str()?;
                (!regex.is_match(text))
                    .then(|| format!("must match the pattern {}", regex.as_str()))
            }
            Validator::OneOf(allowed) => {
                let text = value.as_str()?;
                (!allowed.contains(&text)).then(|| {
                    format!("must be one of [{}], got \"{text}\"", allowed.join(", "))
                })
            }
            Validator::IntRange { min, max } => {
                let number = value.as_i64()?;
                (number < *min || number > *max)
                    .then(|| format!("must be between {min} and {max}, got {number}"))
            }
        }
    }

    fn describe(&self) -> Value {
        match self {
            Validator::Length { min, max } => json!({ "length": { "min": min, "max": max } }),
            Validator::Pattern(regex) => json!({ "pattern": regex.as_str() }),
            Validator::OneOf(allowed) => json!({ "one_of": allowed }),
            Validator::IntRange { min, max } => json!({ "range": { "min": min, "max": max } }),
        }
    }
}

/// One attribute of a block.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeType,
    pub presence: Presence,
    /// Resource-side only; never sent to or read from the API.
    pub local: bool,
    /// Changing the value replaces the remote object.
    pub force_new: bool,
    /// Key on the wire when it differs from `name`.
    pub wire_name: Option<&'static str>,
    pub validators: Vec<Validator>,
    pub description: Option<&'static str>,
}

impl Attribute {
    fn new(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
            local: false,
            force_new: false,
            wire_name: None,
            validators: Vec::new(),
            description: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, AttributeType::Leaf(ValueType::String))
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, AttributeType::Leaf(ValueType::Bool))
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, AttributeType::Leaf(ValueType::Int))
    }

    pub fn float(name: &'static str) -> Self {
        Self::new(name, AttributeType::Leaf(ValueType::Float))
    }

    pub fn strings(name: &'static str) -> Self {
        Self::new(name, AttributeType::List(ValueType::String))
    }

    /// A nested block holding at most one element.
    pub fn block(name: &'static str, schema: BlockSchema) -> Self {
        Self::new(
            name,
            AttributeType::Block {
                schema,
                max_items: Some(1),
            },
        )
    }

    /// A nested block holding any number of elements.
    pub fn block_list(name: &'static str, schema: BlockSchema) -> Self {
        Self::new(
            name,
            AttributeType::Block {
                schema,
                max_items: None,
            },
        )
    }

    pub fn required(mut self) -> Self {
        self.presence = Presence::Required;
        self
    }

    pub fn computed(mut self) -> Self {
        self.presence = Presence::Computed;
        self
    }

    pub fn optional_computed(mut self) -> Self {
        self.presence = Presence::OptionalComputed;
        self
    }

    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn wire_name(mut self, wire_name: &'static str) -> Self {
        self.wire_name = Some(wire_name);
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn describe_as(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Key of this attribute in the API payload.
    pub fn wire_key(&self) -> &'static str {
        self.wire_name.unwrap_or(self.name)
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Computed-only attributes are never taken from configuration.
    pub fn is_computed_only(&self) -> bool {
        self.presence == Presence::Computed
    }

    /// Whether the attribute takes part in the request payload.
    pub fn is_sent(&self) -> bool {
        !self.local && !self.is_computed_only()
    }

    fn describe(&self) -> Value {
        let mut out = Map::new();
        match &self.kind {
            AttributeType::Leaf(value_type) => {
                out.insert("type".into(), json!(value_type.as_str()));
            }
            AttributeType::List(value_type) => {
                out.insert("type".into(), json!(["list", value_type.as_str()]));
            }
            AttributeType::Block { schema, max_items } => {
                out.insert("type".into(), json!("block"));
                if let Some(max) = max_items {
                    out.insert("max_items".into(), json!(max));
                }
                out.insert("block".into(), schema.describe());
            }
        }
        out.insert("presence".into(), json!(self.presence.as_str()));
        if self.local {
            out.insert("local".into(), json!(true));
        }
        if self.force_new {
            out.insert("force_new".into(), json!(true));
        }
        if let Some(wire_name) = self.wire_name {
            out.insert("wire_name".into(), json!(wire_name));
        }
        if !self.validators.is_empty() {
            let validators = self.validators.iter().map(Validator::describe).collect();
            out.insert("validators".into(), Value::Array(validators));
        }
        if let Some(description) = self.description {
            out.insert("description".into(), json!(description));
        }
        Value::Object(out)
    }
}

/// Mutually exclusive attributes of one block.
#[derive(Debug, Clone)]
pub struct OneofGroup {
    pub name: &'static str,
    pub variants: Vec<&'static str>,
}

/// Attributes and oneof groups of one block.
#[derive(Debug, Clone, Default)]
pub struct BlockSchema {
    pub attributes: Vec<Attribute>,
    pub oneofs: Vec<OneofGroup>,
}

impl BlockSchema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            oneofs: Vec::new(),
        }
    }

    /// A union block: every attribute is a variant of the group `name`.
    pub fn union(name: &'static str, variants: Vec<Attribute>) -> Self {
        let names = variants.iter().map(|attr| attr.name).collect();
        Self::new(variants).with_oneof(name, names)
    }

    pub fn with_oneof(mut self, name: &'static str, variants: Vec<&'static str>) -> Self {
        self.oneofs.push(OneofGroup { name, variants });
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn attribute_by_wire_key(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.wire_key() == key)
    }

    /// Nested block schema reached by following attribute names.
    pub fn block_at(&self, names: &[&str]) -> Option<&BlockSchema> {
        names
            .iter()
            .try_fold(self, |block, name| match &block.attribute(name)?.kind {
                AttributeType::Block { schema, .. } => Some(schema),
                _ => None,
            })
    }

    /// True when the block is nothing but one oneof group.
    pub fn is_union(&self) -> bool {
        match self.oneofs.as_slice() {
            [group] => {
                group.variants.len() == self.attributes.len()
                    && self
                        .attributes
                        .iter()
                        .all(|attr| group.variants.contains(&attr.name))
            }
            _ => false,
        }
    }

    /// True when at least one oneof group is declared on the block.
    pub fn has_oneofs(&self) -> bool {
        !self.oneofs.is_empty()
    }

    /// Variant names when this is a union block.
    pub fn union_variants(&self) -> &[&'static str] {
        match self.oneofs.as_slice() {
            [group] if self.is_union() => &group.variants,
            _ => &[],
        }
    }

    pub fn describe(&self) -> Value {
        let attributes: Map<String, Value> = self
            .attributes
            .iter()
            .map(|attr| (attr.name.to_string(), attr.describe()))
            .collect();
        let mut out = Map::new();
        out.insert("attributes".into(), Value::Object(attributes));
        if !self.oneofs.is_empty() {
            let groups: Map<String, Value> = self
                .oneofs
                .iter()
                .map(|group| (group.name.to_string(), json!(group.variants)))
                .collect();
            out.insert("oneofs".into(), Value::Object(groups));
        }
        Value::Object(out)
    }
}

/// Schema of a whole resource type.
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub version: u32,
    pub root: BlockSchema,
}

impl ResourceSchema {
    /// JSON description of the schema, in the shape printed by `schema`.
    pub fn describe(&self) -> Value {
        json!({
            "type_name": self.type_name,
            "version": self.version,
            "block": self.root.describe(),
        })
    }
}
