//! JSON wire form for schema documents.
//!
//! A document is a tree of `{"kind": "...", ...}` objects, one per node.
//! Known kinds carry their attributes under fixed names (`fields`, `item`,
//! `inner`, `options`, `items`, `value`, `values`, `valueType`); unknown
//! kind strings become [`SchemaNode::Other`] rather than an error, so the
//! graceful-unknown contract extends to the wire boundary. Extra attributes
//! on any node are ignored.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::node::{DefaultValue, LiteralValue, SchemaNode};
use crate::path_de;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed schema document: {0}")]
    Decode(#[from] path_de::DecodeError),

    #[error("`{kind}` node is missing its `{attr}` attribute")]
    MissingAttr { kind: &'static str, attr: &'static str },

    #[error("`literal` value must be a string, number, or boolean, got {got}")]
    NonScalarLiteral { got: &'static str },
}

/// Parse a schema node from JSON text. Decode failures carry the JSON path
/// of the offending value.
pub fn node_from_str(src: &str) -> Result<SchemaNode, WireError> {
    let raw: RawNode = path_de::from_str_with_path(src)?;
    raw.build()
}

/// Parse a schema node from an in-memory JSON value.
pub fn node_from_value(value: Value) -> Result<SchemaNode, WireError> {
    let raw: RawNode = path_de::from_value_with_path(value)?;
    raw.build()
}

// ————————————————————————————————————————————————————————————————————————————
// RAW LAYER
// ————————————————————————————————————————————————————————————————————————————

/// Serde-facing shape of one wire node. Every attribute is optional at this
/// layer; `build` enforces per-kind presence so that a missing attribute is
/// reported against the kind that needed it.
#[derive(Debug, Deserialize)]
pub struct RawNode {
    kind: String,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    values: Option<Vec<String>>,
    #[serde(default)]
    fields: Option<IndexMap<String, RawNode>>,
    #[serde(default)]
    item: Option<Box<RawNode>>,
    #[serde(default)]
    inner: Option<Box<RawNode>>,
    #[serde(default)]
    options: Option<Vec<RawNode>>,
    #[serde(default)]
    items: Option<Vec<RawNode>>,
    #[serde(default, rename = "valueType")]
    value_type: Option<Box<RawNode>>,
}

impl RawNode {
    pub fn build(self) -> Result<SchemaNode, WireError> {
        let RawNode {
            kind,
            value,
            values,
            fields,
            item,
            inner,
            options,
            items,
            value_type,
        } = self;

        let node = match kind.as_str() {
            "string" => SchemaNode::String,
            "number" => SchemaNode::Number,
            "boolean" => SchemaNode::Boolean,
            "any" => SchemaNode::Any,
            "unknown" => SchemaNode::Unknown,

            "literal" => {
                let value = value.ok_or(WireError::MissingAttr {
                    kind: "literal",
                    attr: "value",
                })?;
                SchemaNode::Literal(scalar_literal(value)?)
            }

            "enum" => SchemaNode::Enum {
                values: values.ok_or(WireError::MissingAttr {
                    kind: "enum",
                    attr: "values",
                })?,
            },

            "object" => {
                let fields = fields.ok_or(WireError::MissingAttr {
                    kind: "object",
                    attr: "fields",
                })?;
                let mut out = IndexMap::with_capacity(fields.len());
                for (name, raw) in fields {
                    out.insert(name, raw.build()?);
                }
                SchemaNode::Object { fields: out }
            }

            "array" => {
                let item = item.ok_or(WireError::MissingAttr {
                    kind: "array",
                    attr: "item",
                })?;
                SchemaNode::Array {
                    item: Box::new(item.build()?),
                }
            }

            "optional" => SchemaNode::Optional(boxed_inner("optional", inner)?),
            "nullable" => SchemaNode::Nullable(boxed_inner("nullable", inner)?),

            "union" => {
                let options = options.ok_or(WireError::MissingAttr {
                    kind: "union",
                    attr: "options",
                })?;
                SchemaNode::Union {
                    options: options
                        .into_iter()
                        .map(RawNode::build)
                        .collect::<Result<_, _>>()?,
                }
            }

            // Wire defaults are constants; arbitrary producers only exist in
            // the library API.
            "default" => {
                let inner = boxed_inner("default", inner)?;
                let value = value.ok_or(WireError::MissingAttr {
                    kind: "default",
                    attr: "value",
                })?;
                SchemaNode::Default {
                    inner,
                    value: DefaultValue::constant(value),
                }
            }

            "record" => {
                let value_type = value_type.ok_or(WireError::MissingAttr {
                    kind: "record",
                    attr: "valueType",
                })?;
                SchemaNode::Record {
                    value: Box::new(value_type.build()?),
                }
            }

            "effects" => SchemaNode::Effects(boxed_inner("effects", inner)?),

            "tuple" => {
                let items = items.ok_or(WireError::MissingAttr {
                    kind: "tuple",
                    attr: "items",
                })?;
                SchemaNode::Tuple {
                    items: items
                        .into_iter()
                        .map(RawNode::build)
                        .collect::<Result<_, _>>()?,
                }
            }

            // Anything else stays translatable via the fallback arm.
            _ => SchemaNode::Other { kind },
        };
        Ok(node)
    }
}

fn boxed_inner(
    kind: &'static str,
    inner: Option<Box<RawNode>>,
) -> Result<Box<SchemaNode>, WireError> {
    let raw = inner.ok_or(WireError::MissingAttr { kind, attr: "inner" })?;
    Ok(Box::new(raw.build()?))
}

fn scalar_literal(value: Value) -> Result<LiteralValue, WireError> {
    match value {
        Value::String(s) => Ok(LiteralValue::Str(s)),
        Value::Number(n) => Ok(LiteralValue::Num(n)),
        Value::Bool(b) => Ok(LiteralValue::Bool(b)),
        other => Err(WireError::NonScalarLiteral {
            got: json_type_name(&other),
        }),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ------------------------------- Tests ------------------------------------ //
