//! Typed parameter and metric values with a canonical string form.
//!
//! Diffing compares the canonical strings, never the typed values, so the
//! rendering here must be referentially transparent: equal values always
//! render to the same string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parameter or metric value as recorded by training code.
///
/// Serialized untagged, so JSON scalars map directly onto variants
/// (`null` → `None`, `true` → `Bool`, `3` → `Int`, `0.5` → `Float`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicitly recorded null.
    None,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Free-form string.
    String(String),
    /// Nested object or array, kept as raw JSON.
    Object(serde_json::Value),
}

impl Value {
    /// Canonical display string used for diffing and rendering.
    ///
    /// Integral floats keep a trailing `.0` so `Float(1.0)` never collides
    /// with `Int(1)`.
    #[must_use]
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Numeric view used for ranking checkpoints.
    ///
    /// Returns `None` for non-numeric values and for NaN.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) if !f.is_nan() => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => {
                let s = x.to_string();
                if x.is_finite() && !s.contains('.') {
                    write!(f, "{s}.0")
                } else {
                    f.write_str(&s)
                }
            }
            Self::String(s) => f.write_str(s),
            Self::Object(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
