// src/params/value.rs
// Heterogeneous parameter values held by the groups of a VolParams store.

use serde::Deserialize;
use std::fmt;

/// A single parameter value.
///
/// Parameters in the pipeline are numbers, flags, method names, shift/overlap
/// tuples or sigma arrays, and many of them start out unset (`None`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Unset parameter
    None,
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value (method names, file names)
    Str(String),
    /// Sequence value (tuples, lists of file names)
    Seq(Vec<ParamValue>),
    /// Numeric array compared element-wise, broadcasting scalars (sigma radii).
    /// Lists read from YAML always land in `Seq`.
    Array(Vec<f64>),
}

impl ParamValue {
    /// Returns true when assigning `other` over `self` changes anything.
    ///
    /// Numbers and flags compare by numeric value, so `false` equals `0`.
    /// Sequences compare item by item and differ from any scalar. Arrays are
    /// compared element-wise: a scalar is broadcast over every element and the
    /// result is true if any single comparison differs.
    pub fn differs(&self, other: &ParamValue) -> bool {
        match (self, other) {
            (ParamValue::Seq(a), ParamValue::Seq(b)) => {
                a.len() != b.len() || a.iter().zip(b).any(|(x, y)| x.differs(y))
            }
            (ParamValue::Array(values), other) | (other, ParamValue::Array(values)) => {
                array_differs(values, other)
            }
            (ParamValue::Seq(_), _) | (_, ParamValue::Seq(_)) => true,
            (ParamValue::Int(a), ParamValue::Int(b)) => a != b,
            (a, b) => match (a.numeric(), b.numeric()) {
                (Some(x), Some(y)) => x != y,
                _ => a != b,
            },
        }
    }

    // Numeric view used for comparisons; flags count as 0 and 1
    fn numeric(&self) -> Option<f64> {
        match self {
            ParamValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Whether the parameter is unset
    pub fn is_none(&self) -> bool {
        matches!(self, ParamValue::None)
    }

    /// Numeric view of the value, accepting both integers and floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Integer view of the value; floats are only accepted when integral
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Boolean view of the value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String view of the value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Array view of the value
    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            ParamValue::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Sequence view of the value
    pub fn as_seq(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::Seq(items) => Some(items),
            _ => None,
        }
    }
}

fn array_differs(values: &[f64], other: &ParamValue) -> bool {
    match other {
        ParamValue::Array(others) => {
            values.len() != others.len() || values.iter().zip(others).any(|(x, y)| x != y)
        }
        ParamValue::Seq(items) => {
            values.len() != items.len()
                || values
                    .iter()
                    .zip(items)
                    .any(|(x, item)| ParamValue::Float(*x).differs(item))
        }
        // Broadcast: an empty array produces no comparisons, so nothing differs
        scalar => match scalar.numeric() {
            Some(n) => values.iter().any(|x| *x != n),
            None => true,
        },
    }
}

impl Default for ParamValue {
    fn default() -> Self {
        ParamValue::None
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamValue::None => write!(f, "None"),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{:?}", x),
            ParamValue::Str(s) => write!(f, "'{}'", s),
            ParamValue::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ParamValue::Array(values) => {
                write!(f, "array({:?})", values)
            }
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::None, Into::into)
    }
}

impl<A: Into<ParamValue>, B: Into<ParamValue>> From<(A, B)> for ParamValue {
    fn from((a, b): (A, B)) -> Self {
        ParamValue::Seq(vec![a.into(), b.into()])
    }
}
