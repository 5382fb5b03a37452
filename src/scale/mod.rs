//! Scale functions for data-to-pixel mappings.
//!
//! A scale converts a domain value into a pixel position (`project`) or, for
//! scales with bands, a pixel interval (`project_interval`). Three variants
//! cover the data kinds a series can hold:
//!
//! - [`Linear`] for numbers, generic over the numeric type
//! - [`Ordinal`] for categories
//! - [`Temporal`] for dates and date-times
//!
//! [`Scale`] is the closed sum of the three, operating on [`Value`]s.

mod linear;
mod ordinal;
mod temporal;

pub use linear::Linear;
pub use ordinal::Ordinal;
pub use temporal::Temporal;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::series::{Axis, Series};
use crate::value::{DataType, Value};

/// Tick count used when none is requested.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Any scale, dispatching on [`Value`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    /// Numeric scale.
    Linear(Linear<f64>),
    /// Categorical scale.
    Ordinal(Ordinal),
    /// Date/time scale.
    Temporal(Temporal),
}

impl From<Linear<f64>> for Scale {
    fn from(scale: Linear<f64>) -> Self {
        Scale::Linear(scale)
    }
}

impl From<Ordinal> for Scale {
    fn from(scale: Ordinal) -> Self {
        Scale::Ordinal(scale)
    }
}

impl From<Temporal> for Scale {
    fn from(scale: Temporal) -> Self {
        Scale::Temporal(scale)
    }
}

impl Scale {
    /// Create a linear scale over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if `min > max`.
    pub fn linear(min: f64, max: f64) -> Result<Self> {
        Linear::new(min, max).map(Scale::Linear)
    }

    /// Create an ordinal scale over the given categories.
    pub fn ordinal<I, V>(domain: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Scale::Ordinal(Ordinal::new(domain))
    }

    /// Create a temporal scale over date-times.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if `min > max`.
    pub fn temporal(min: NaiveDateTime, max: NaiveDateTime) -> Result<Self> {
        Temporal::new(min, max).map(Scale::Temporal)
    }

    /// Create a temporal scale over calendar dates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if `min > max`.
    pub fn dates(min: NaiveDate, max: NaiveDate) -> Result<Self> {
        Temporal::from_dates(min, max).map(Scale::Temporal)
    }

    /// Build a scale fitting the values a series holds on `axis`.
    ///
    /// Numeric domains are widened to include zero so that bars have a
    /// baseline. Categories keep first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the axis has no values.
    pub fn for_series<R>(series: &Series<R>, axis: Axis) -> Result<Self> {
        let empty = || Error::ScaleDomain(format!("Series has no values on the {axis} axis"));

        match series.data_type(axis) {
            DataType::Numeric => {
                let min = series.min(axis).as_ref().and_then(Value::as_f64).ok_or_else(empty)?;
                let max = series.max(axis).as_ref().and_then(Value::as_f64).ok_or_else(empty)?;
                Scale::linear(min.min(0.0), max.max(0.0))
            }
            DataType::Temporal => {
                let min = series.min(axis).ok_or_else(empty)?;
                let max = series.max(axis).ok_or_else(empty)?;
                match (min, max) {
                    (Value::Date(min), Value::Date(max))
                        if series.values(axis).iter().all(|v| matches!(v, Value::Date(_))) =>
                    {
                        Scale::dates(min, max)
                    }
                    (min, max) => {
                        let min = min.as_datetime().ok_or_else(empty)?;
                        let max = max.as_datetime().ok_or_else(empty)?;
                        Scale::temporal(min, max)
                    }
                }
            }
            DataType::Categorical => {
                let mut categories: Vec<Value> = Vec::new();
                for value in series.values(axis) {
                    if !categories.contains(&value) {
                        categories.push(value);
                    }
                }
                Ok(Scale::Ordinal(Ordinal::new(categories)))
            }
            DataType::Unknown => Err(empty()),
        }
    }

    /// Variant name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Scale::Linear(_) => "linear",
            Scale::Ordinal(_) => "ordinal",
            Scale::Temporal(_) => "temporal",
        }
    }

    /// The kind of data this scale accepts.
    #[must_use]
    pub fn domain_kind(&self) -> DataType {
        match self {
            Scale::Linear(_) => DataType::Numeric,
            Scale::Ordinal(_) => DataType::Categorical,
            Scale::Temporal(_) => DataType::Temporal,
        }
    }

    fn incompatible(&self, value: &Value) -> Error {
        Error::IncompatibleValue {
            scale: self.name(),
            value: value.to_string(),
        }
    }

    /// Project a value into `[range_min, range_max]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleValue`] if the value has the wrong kind
    /// for this scale, or [`Error::NotInDomain`] for an unknown category.
    pub fn project(&self, value: &Value, range_min: f64, range_max: f64) -> Result<f64> {
        match self {
            Scale::Linear(scale) => {
                let v = value.as_f64().ok_or_else(|| self.incompatible(value))?;
                Ok(scale.project(v, range_min, range_max))
            }
            Scale::Ordinal(scale) => scale.project(value, range_min, range_max),
            Scale::Temporal(scale) => {
                let v = value.as_datetime().ok_or_else(|| self.incompatible(value))?;
                Ok(scale.project(v, range_min, range_max))
            }
        }
    }

    /// Project a value to the pixel band it occupies.
    ///
    /// # Errors
    ///
    /// Only ordinal scales have bands; the others return
    /// [`Error::UnsupportedForScale`].
    pub fn project_interval(
        &self,
        value: &Value,
        range_min: f64,
        range_max: f64,
    ) -> Result<(f64, f64)> {
        match self {
            Scale::Ordinal(scale) => scale.project_interval(value, range_min, range_max),
            Scale::Linear(_) | Scale::Temporal(_) => Err(Error::UnsupportedForScale {
                operation: "project_interval",
                scale: self.name(),
            }),
        }
    }

    /// Sample points across the domain, endpoints included.
    ///
    /// `count` defaults to [`DEFAULT_TICK_COUNT`]; ordinal scales ignore it
    /// and return their categories.
    #[must_use]
    pub fn ticks(&self, count: Option<usize>) -> Vec<Value> {
        let count = count.unwrap_or(DEFAULT_TICK_COUNT);
        match self {
            Scale::Linear(scale) => scale.ticks(count).into_iter().map(Value::Number).collect(),
            Scale::Ordinal(scale) => scale.ticks(),
            Scale::Temporal(scale) => scale.ticks(count),
        }
    }

    /// Domain membership test. Values of the wrong kind are never members.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        match self {
            Scale::Linear(scale) => value.as_f64().is_some_and(|v| scale.contains(v)),
            Scale::Ordinal(scale) => scale.contains(value),
            Scale::Temporal(scale) => value.as_datetime().is_some_and(|v| scale.contains(v)),
        }
    }
}
