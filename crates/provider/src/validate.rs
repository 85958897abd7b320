//! Plan-time validation of a flat configuration against its schema.
//!
//! Unlike the codec, validation does not stop at the first problem: it walks
//! the whole tree and collects every finding as a [`Diagnostic`].

use std::fmt;

use serde_json::Value;

use crate::codec::{
    FlatMap, as_block, as_list, child, coerce, conflicting_variants, index, is_present, kind_of,
};
use crate::schema::{Attribute, AttributeType, BlockSchema, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Attribute path such as `layout.0.sections.0.rows.0.widgets.0.title`.
    pub path: String,
    pub summary: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let path = if self.path.is_empty() { "<root>" } else { &self.path };
        write!(f, "{severity}: {path}: {}", self.summary)
    }
}

/// Findings of one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, path: impl Into<String>, summary: impl Into<String>) {
        self.0.push(Diagnostic {
            severity: Severity::Error,
            path: path.into(),
            summary: summary.into(),
        });
    }

    pub fn warning(&mut self, path: impl Into<String>, summary: impl Into<String>) {
        self.0.push(Diagnostic {
            severity: Severity::Warning,
            path: path.into(),
            summary: summary.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {diagnostic}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validate a flat block and everything below it.
pub fn validate(block: &BlockSchema, flat: &FlatMap) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    validate_block(block, flat, "", &mut diagnostics);
    diagnostics
}

fn validate_block(block: &BlockSchema, flat: &FlatMap, path: &str, diags: &mut Diagnostics) {
    for key in flat.keys() {
        if block.attribute(key).is_none() {
            diags.error(child(path, key), "unsupported attribute");
        }
    }

    for variants in conflicting_variants(block, flat) {
        diags.error(
            path,
            format!("only one of [{}] may be set", variants.join(", ")),
        );
    }

    for attr in &block.attributes {
        let attr_path = child(path, attr.name);
        match flat.get(attr.name).filter(|value| !value.is_null()) {
            Some(value) => validate_attribute(attr, value, &attr_path, diags),
            None if attr.is_required() => diags.error(attr_path, "missing required attribute"),
            None => {}
        }
    }
}

fn validate_attribute(attr: &Attribute, value: &Value, path: &str, diags: &mut Diagnostics) {
    if attr.is_computed_only() {
        diags.warning(path, "value is assigned by the service and will be ignored");
        return;
    }

    match &attr.kind {
        AttributeType::Leaf(value_type) => {
            validate_leaf(attr, *value_type, value, path, diags);
        }
        AttributeType::List(value_type) => match as_list(value, path) {
            Ok(items) => {
                if items.is_empty() && attr.is_required() {
                    diags.error(path, "missing required attribute");
                }
                for (i, item) in items.iter().enumerate() {
                    validate_leaf(attr, *value_type, item, &index(path, i), diags);
                }
            }
            Err(_) => diags.error(path, format!("expected a list, got {}", kind_of(value))),
        },
        AttributeType::Block { schema, max_items } => {
            let items = match as_list(value, path) {
                Ok(items) => items,
                Err(_) => {
                    diags.error(path, format!("expected a list of blocks, got {}", kind_of(value)));
                    return;
                }
            };
            if items.is_empty() && attr.is_required() {
                diags.error(path, "missing required attribute");
            }
            if let Some(max) = *max_items
                && items.len() > max
            {
                diags.error(path, format!("at most {max} item(s) allowed, got {}", items.len()));
            }
            for (i, item) in items.iter().enumerate() {
                let item_path = index(path, i);
                let element = match as_block(item, &item_path) {
                    Ok(element) => element.cloned().unwrap_or_default(),
                    Err(_) => {
                        diags.error(&item_path, format!("expected a block, got {}", kind_of(item)));
                        continue;
                    }
                };
                let union_unset = schema.is_union()
                    && !schema
                        .union_variants()
                        .iter()
                        .any(|variant| is_present(element.get(*variant)));
                if union_unset && (attr.is_required() || *max_items != Some(1)) {
                    diags.error(
                        &item_path,
                        format!(
                            "exactly one of [{}] must be set",
                            schema.union_variants().join(", ")
                        ),
                    );
                }
                validate_block(schema, &element, &item_path, diags);
            }
        }
    }
}

fn validate_leaf(
    attr: &Attribute,
    value_type: ValueType,
    value: &Value,
    path: &str,
    diags: &mut Diagnostics,
) {
    match coerce(value_type, value, path) {
        Ok(coerced) => {
            for validator in &attr.validators {
                if let Some(problem) = validator.check(&coerced) {
                    diags.error(path, problem);
                }
            }
        }
        Err(_) => diags.error(
            path,
            format!("expected {}, got {}", value_type.as_str(), kind_of(value)),
        ),
    }
}
