//! # Prop Values
//!
//! The runtime values a caller supplies for component props, their kinds,
//! and the literal constants a descriptor can pin a prop to.
//!
//! Values arrive as JSON or YAML documents. Neither format has a function
//! literal, so a function reference is written as a single-key object:
//!
//! ```json
//! { "options": { "$function": "allowedHours" } }
//! ```
//!
//! Every other JSON value maps onto the variant of the same name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Object key that marks a function reference in JSON/YAML value sets.
pub const FUNCTION_KEY: &str = "$function";

/// A supplied value set: prop name (or `@event` listener key) to value.
pub type PropValues = BTreeMap<String, PropValue>;

/// Runtime kind of a supplied value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKind {
    /// The explicit "unset" value.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any JSON number.
    Number,
    /// A string.
    String,
    /// An ordered sequence of values.
    Array,
    /// A string-keyed map of values.
    Object,
    /// A reference to a callable handler.
    Function,
}

impl ValueKind {
    /// Display name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "Boolean",
            Self::Number => "Number",
            Self::String => "String",
            Self::Array => "Array",
            Self::Object => "Object",
            Self::Function => "Function",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kind a prop can declare. `Null` is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// `Boolean`
    Boolean,
    /// `Number`
    Number,
    /// `String`
    String,
    /// `Array` (structural)
    Array,
    /// `Object` (structural)
    Object,
    /// `Function`
    Function,
}

impl PrimitiveKind {
    /// All declarable kinds, in declaration-syntax order.
    pub const ALL: [PrimitiveKind; 6] = [
        Self::Boolean,
        Self::Number,
        Self::String,
        Self::Array,
        Self::Object,
        Self::Function,
    ];

    /// Look up a kind by its declared name (`"Boolean"`, `"Array"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Declared name of the kind.
    pub fn as_str(&self) -> &'static str {
        self.value_kind().as_str()
    }

    /// The runtime kind a value must have to match this primitive.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Boolean => ValueKind::Boolean,
            Self::Number => ValueKind::Number,
            Self::String => ValueKind::String,
            Self::Array => ValueKind::Array,
            Self::Object => ValueKind::Object,
            Self::Function => ValueKind::Function,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value supplied for a prop.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Explicit "unset".
    Null,
    /// A boolean.
    Boolean(bool),
    /// A number.
    Number(Number),
    /// A string.
    String(String),
    /// An array of values.
    Array(Vec<PropValue>),
    /// An object with string keys.
    Object(BTreeMap<String, PropValue>),
    /// A function reference, identified by handler name.
    Function(String),
}

impl PropValue {
    /// Runtime kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Function(_) => ValueKind::Function,
        }
    }

    /// Shorthand for a function reference.
    pub fn function(handler: impl Into<String>) -> Self {
        Self::Function(handler.into())
    }

    /// Convert back to JSON, using the `$function` marker for functions.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Function(name) => {
                let mut map = serde_json::Map::new();
                map.insert(FUNCTION_KEY.to_string(), Value::String(name.clone()));
                Value::Object(map)
            }
        }
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(Value::String(name)) = map.get(FUNCTION_KEY) {
                        return Self::Function(name.clone());
                    }
                }
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// A constant a descriptor can require a value to equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`, the explicit "unset" marker.
    Null,
    /// `true` / `false`.
    Boolean(bool),
    /// A numeric constant.
    Number(Number),
    /// A string constant such as `'submit'`.
    String(String),
}

impl Literal {
    /// Shorthand for a string literal.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Exact equality against a supplied value. Numbers compare by value,
    /// so `1` equals `1.0`.
    pub fn matches(&self, value: &PropValue) -> bool {
        match (self, value) {
            (Self::Null, PropValue::Null) => true,
            (Self::Boolean(a), PropValue::Boolean(b)) => a == b,
            (Self::Number(a), PropValue::Number(b)) => numbers_equal(a, b),
            (Self::String(a), PropValue::String(b)) => a == b,
            _ => false,
        }
    }

    /// Runtime kind of the literal.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
        }
    }
}

/// Exact numeric equality. An integer equals a float only when the float is
/// integral, in range for the integer's type, and the same integer.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (a.is_f64(), b.is_f64()) {
        (false, false) => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => a.as_u64().is_some() && a.as_u64() == b.as_u64(),
        },
        (true, true) => a.as_f64() == b.as_f64(),
        (true, false) => integer_equals_float(b, a),
        (false, true) => integer_equals_float(a, b),
    }
}

fn integer_equals_float(int: &Number, float: &Number) -> bool {
    // 2^63 and 2^64 are exact in f64; the integer types end just below them.
    const I64_END: f64 = 9_223_372_036_854_775_808.0;
    const U64_END: f64 = 18_446_744_073_709_551_616.0;
    let Some(f) = float.as_f64() else {
        return false;
    };
    if f.fract() != 0.0 {
        return false;
    }
    if let Some(i) = int.as_i64() {
        return (-I64_END..I64_END).contains(&f) && f as i64 == i;
    }
    match int.as_u64() {
        Some(u) => (0.0..U64_END).contains(&f) && f as u64 == u,
        None => false,
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) if s.contains('\'') => write!(f, "\"{s}\""),
            Self::String(s) => write!(f, "'{s}'"),
        }
    }
}
