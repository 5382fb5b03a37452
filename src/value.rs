//! Data values carried by series rows.
//!
//! A row cell is converted into an optional [`Value`]; `None` marks a
//! missing value. Each value belongs to one [`DataType`], which is what
//! shapes use to decide whether they can render a series.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Kind of data held by a series axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// Continuous numbers.
    Numeric,
    /// Discrete labels.
    Categorical,
    /// Calendar dates or date-times.
    Temporal,
    /// No value was available to classify.
    #[default]
    Unknown,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Numeric => "numeric",
            DataType::Categorical => "categorical",
            DataType::Temporal => "temporal",
            DataType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A single data value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
    /// A date with time of day.
    DateTime(NaiveDateTime),
}

impl Value {
    /// Classify this value.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Number(_) => DataType::Numeric,
            Value::Text(_) => DataType::Categorical,
            Value::Date(_) | Value::DateTime(_) => DataType::Temporal,
        }
    }

    /// Get as f64, or None if not a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as a point in time. Dates are taken at midnight.
    #[must_use]
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Whether this value lies below zero. Non-numeric values never do.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.as_f64().is_some_and(|n| n < 0.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

/// Conversion of a row cell into an optional [`Value`].
///
/// `None` means the cell is missing. NaN numbers are treated as missing.
pub trait Cell {
    /// Read this cell as a value.
    fn to_value(&self) -> Option<Value>;
}

macro_rules! impl_numeric_cell {
    ($($t:ty),*) => {
        $(
            impl Cell for $t {
                #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
                fn to_value(&self) -> Option<Value> {
                    let n = *self as f64;
                    (!n.is_nan()).then_some(Value::Number(n))
                }
            }
        )*
    };
}

impl_numeric_cell!(f64, f32, i32, i64, u32, u64, usize);

impl Cell for str {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.to_string()))
    }
}

impl Cell for String {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Text(self.clone()))
    }
}

impl Cell for NaiveDate {
    fn to_value(&self) -> Option<Value> {
        Some(Value::Date(*self))
    }
}

impl Cell for NaiveDateTime {
    fn to_value(&self) -> Option<Value> {
        Some(Value::DateTime(*self))
    }
}

impl Cell for Value {
    fn to_value(&self) -> Option<Value> {
        match self {
            Value::Number(n) if n.is_nan() => None,
            other => Some(other.clone()),
        }
    }
}

impl<T: Cell> Cell for Option<T> {
    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(Cell::to_value)
    }
}

impl<T: Cell + ?Sized> Cell for &T {
    fn to_value(&self) -> Option<Value> {
        (**self).to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type() {
        assert_eq!(Value::from(1.5).data_type(), DataType::Numeric);
        assert_eq!(Value::from("a").data_type(), DataType::Categorical);
        let d = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        assert_eq!(Value::from(d).data_type(), DataType::Temporal);
        assert_eq!(DataType::default(), DataType::Unknown);
    }

    #[test]
    fn test_number_never_equals_text() {
        assert_ne!(Value::from(5), Value::from("5"));
    }

    #[test]
    fn test_date_as_datetime_is_midnight() {
        let d = NaiveDate::from_ymd_opt(2012, 6, 3).unwrap();
        let dt = Value::Date(d).as_datetime().unwrap();
        assert_eq!(dt, d.and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_cells() {
        assert_eq!(3i32.to_value(), Some(Value::Number(3.0)));
        assert_eq!("foo".to_value(), Some(Value::Text("foo".to_string())));
        assert_eq!(None::<f64>.to_value(), None);
        assert_eq!(Some(2.5).to_value(), Some(Value::Number(2.5)));
        assert_eq!(f64::NAN.to_value(), None);
    }

    #[test]
    fn test_is_negative() {
        assert!(Value::from(-1).is_negative());
        assert!(!Value::from(0).is_negative());
        assert!(!Value::from("-1").is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from("a").to_string(), "\"a\"");
        assert_eq!(DataType::Temporal.to_string(), "temporal");
    }
}
