// Strongly-typed schema nodes. The kind set is closed; everything else
// rides in `Other` so translation stays total.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Number, Value};

/// Zero-argument producer for a `Default` node's value.
///
/// Invoked exactly once per `Default` node each time the tree is translated,
/// at the point the node is visited. Failures inside the producer propagate
/// to the caller unchanged; the translator does not catch them.
pub type DefaultFn = Arc<dyn Fn() -> Value + Send + Sync>;

/// Owner of a `Default` node's producer.
#[derive(Clone)]
pub struct DefaultValue(DefaultFn);

impl DefaultValue {
    /// Producer that clones a fixed value. This is what the wire form builds.
    pub fn constant(value: Value) -> Self {
        Self(Arc::new(move || value.clone()))
    }

    pub fn from_fn(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn produce(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultValue(..)")
    }
}

/// A literal scalar: exactly one string, number, or boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Num(Number),
    Bool(bool),
}

impl LiteralValue {
    /// The descriptor `type` keyword for this scalar's runtime type.
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralValue::Str(_) => "string",
            LiteralValue::Num(_) => "number",
            LiteralValue::Bool(_) => "boolean",
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            LiteralValue::Str(s) => Value::from(s.clone()),
            LiteralValue::Num(n) => Value::Number(n.clone()),
            LiteralValue::Bool(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::Str(s.to_string())
    }
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::Str(s)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}

impl From<i64> for LiteralValue {
    fn from(n: i64) -> Self {
        LiteralValue::Num(Number::from(n))
    }
}

impl From<i32> for LiteralValue {
    fn from(n: i32) -> Self {
        LiteralValue::Num(Number::from(n))
    }
}

impl From<u64> for LiteralValue {
    fn from(n: u64) -> Self {
        LiteralValue::Num(Number::from(n))
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        // Prefer the integer form when exact; non-finite has no JSON encoding.
        if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
            LiteralValue::Num(Number::from(n as i64))
        } else {
            LiteralValue::Num(Number::from_f64(n).unwrap_or_else(|| Number::from(0)))
        }
    }
}

/// A composable description of an expected data shape, as a validation-schema
/// library would build it.
///
/// Trees are strict DAGs: constructors take children by value, so cycles are
/// not constructible from this API and traversal does not guard against them.
/// Nodes are read-only once built; translation never mutates them.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    String,
    Number,
    Boolean,
    Literal(LiteralValue),
    Enum {
        values: Vec<String>,
    },
    Object {
        fields: IndexMap<String, SchemaNode>, // insertion order drives `properties`/`required` order
    },
    Array {
        item: Box<SchemaNode>,
    },
    Optional(Box<SchemaNode>),
    Nullable(Box<SchemaNode>),
    Union {
        options: Vec<SchemaNode>,
    },
    Default {
        inner: Box<SchemaNode>,
        value: DefaultValue,
    },
    Record {
        value: Box<SchemaNode>, // keys are open string keys
    },
    Any,
    Unknown,
    /// Preprocessing/refinement wrapper; shape-transparent.
    Effects(Box<SchemaNode>),
    Tuple {
        items: Vec<SchemaNode>, // fixed arity
    },
    /// Escape hatch for kinds outside the enumerated set, kept for diagnostics.
    Other {
        kind: String,
    },
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTORS
// ————————————————————————————————————————————————————————————————————————————

impl SchemaNode {
    pub fn string() -> Self {
        SchemaNode::String
    }

    pub fn number() -> Self {
        SchemaNode::Number
    }

    pub fn boolean() -> Self {
        SchemaNode::Boolean
    }

    pub fn any() -> Self {
        SchemaNode::Any
    }

    pub fn unknown() -> Self {
        SchemaNode::Unknown
    }

    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        SchemaNode::Literal(value.into())
    }

    pub fn string_enum<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SchemaNode::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, SchemaNode)>,
        S: Into<String>,
    {
        SchemaNode::Object {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn array(item: SchemaNode) -> Self {
        SchemaNode::Array { item: Box::new(item) }
    }

    pub fn record(value: SchemaNode) -> Self {
        SchemaNode::Record { value: Box::new(value) }
    }

    pub fn union<I: IntoIterator<Item = SchemaNode>>(options: I) -> Self {
        SchemaNode::Union {
            options: options.into_iter().collect(),
        }
    }

    pub fn tuple<I: IntoIterator<Item = SchemaNode>>(items: I) -> Self {
        SchemaNode::Tuple {
            items: items.into_iter().collect(),
        }
    }

    pub fn other(kind: impl Into<String>) -> Self {
        SchemaNode::Other { kind: kind.into() }
    }

    /// Wrap in `Optional`: transparent in the node's own descriptor, but the
    /// field drops out of the parent object's `required` list.
    pub fn optional(self) -> Self {
        SchemaNode::Optional(Box::new(self))
    }

    pub fn nullable(self) -> Self {
        SchemaNode::Nullable(Box::new(self))
    }

    /// Attach a default computed by `f` at translation time.
    pub fn default_with(self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        SchemaNode::Default {
            inner: Box::new(self),
            value: DefaultValue::from_fn(f),
        }
    }

    /// Attach a constant default.
    pub fn default_const(self, value: impl Into<Value>) -> Self {
        SchemaNode::Default {
            inner: Box::new(self),
            value: DefaultValue::constant(value.into()),
        }
    }

    /// Mark as refinement/preprocessing-wrapped. Only the structural shape
    /// survives translation.
    pub fn refined(self) -> Self {
        SchemaNode::Effects(Box::new(self))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// REFLECTION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaNode {
    /// The kind tag as a string, i.e. the discriminant a wire document carries.
    /// For `Other` this is whatever tag the foreign producer used.
    pub fn kind_name(&self) -> &str {
        match self {
            SchemaNode::String => "string",
            SchemaNode::Number => "number",
            SchemaNode::Boolean => "boolean",
            SchemaNode::Literal(_) => "literal",
            SchemaNode::Enum { .. } => "enum",
            SchemaNode::Object { .. } => "object",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Optional(_) => "optional",
            SchemaNode::Nullable(_) => "nullable",
            SchemaNode::Union { .. } => "union",
            SchemaNode::Default { .. } => "default",
            SchemaNode::Record { .. } => "record",
            SchemaNode::Any => "any",
            SchemaNode::Unknown => "unknown",
            SchemaNode::Effects(_) => "effects",
            SchemaNode::Tuple { .. } => "tuple",
            SchemaNode::Other { kind } => kind,
        }
    }

    /// Whether a field of this kind is exempt from the parent object's
    /// `required` list.
    ///
    /// True for `Optional`, and for out-of-set kinds whose tag begins with
    /// `Optional` (an optional-like node from a foreign producer still reads
    /// as optional). `Default` does not qualify: a defaulted field stays
    /// required.
    pub fn is_optional(&self) -> bool {
        match self {
            SchemaNode::Optional(_) => true,
            SchemaNode::Other { kind } => kind.starts_with("Optional"),
            _ => false,
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
