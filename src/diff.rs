//! Symmetric key-wise difference of two string maps
//!
//! Keys whose canonical values agree on both sides are dropped; every other
//! key yields a [`DiffEntry`] saying which side(s) hold a value.
//!
//! ```text
//! diff_maps({layers: 2, foo: bar}, {layers: 4})
//!   => {foo: Left(bar), layers: Both(2, 4)}
//! ```

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::value::Value;

/// How one key differs between the left and right map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffEntry {
    /// Only the left map has the key.
    Left(String),
    /// Only the right map has the key.
    Right(String),
    /// Both maps have the key with different values.
    Both {
        /// Left value
        left: String,
        /// Right value
        right: String,
    },
}

impl DiffEntry {
    /// Left value, if present.
    #[must_use]
    pub fn left(&self) -> Option<&str> {
        match self {
            Self::Left(l) | Self::Both { left: l, .. } => Some(l),
            Self::Right(_) => None,
        }
    }

    /// Right value, if present.
    #[must_use]
    pub fn right(&self) -> Option<&str> {
        match self {
            Self::Right(r) | Self::Both { right: r, .. } => Some(r),
            Self::Left(_) => None,
        }
    }

    /// Mirror the entry, as if the two maps had been passed the other way round.
    #[must_use]
    pub fn swap(self) -> Self {
        match self {
            Self::Left(v) => Self::Right(v),
            Self::Right(v) => Self::Left(v),
            Self::Both { left, right } => Self::Both {
                left: right,
                right: left,
            },
        }
    }
}

impl Serialize for DiffEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("DiffEntry", 2)?;
        s.serialize_field("left", &self.left())?;
        s.serialize_field("right", &self.right())?;
        s.end()
    }
}

/// Compute the symmetric difference of two maps.
///
/// The result is keyed in lexicographic order.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use trueno_diff::diff::{diff_maps, DiffEntry};
///
/// let left = BTreeMap::from([("lr".to_string(), "0.1".to_string())]);
/// let right = BTreeMap::from([("lr".to_string(), "0.2".to_string())]);
///
/// let diff = diff_maps(&left, &right);
/// assert_eq!(
///     diff["lr"],
///     DiffEntry::Both { left: "0.1".into(), right: "0.2".into() }
/// );
/// ```
#[must_use]
pub fn diff_maps(
    left: &BTreeMap<String, String>,
    right: &BTreeMap<String, String>,
) -> BTreeMap<String, DiffEntry> {
    let mut result = BTreeMap::new();
    for (key, l) in left {
        match right.get(key) {
            Some(r) if r == l => {}
            Some(r) => {
                result.insert(
                    key.clone(),
                    DiffEntry::Both {
                        left: l.clone(),
                        right: r.clone(),
                    },
                );
            }
            None => {
                result.insert(key.clone(), DiffEntry::Left(l.clone()));
            }
        }
    }
    for (key, r) in right {
        if !left.contains_key(key) {
            result.insert(key.clone(), DiffEntry::Right(r.clone()));
        }
    }
    result
}

/// Render every value of a typed map to its canonical string.
#[must_use]
pub fn string_map(values: &BTreeMap<String, Value>) -> BTreeMap<String, String> {
    values
        .iter()
        .map(|(k, v)| (k.clone(), v.format()))
        .collect()
}
