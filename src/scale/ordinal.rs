use crate::error::{Error, Result};
use crate::value::Value;

/// Fraction of a band left empty on each side of a projected interval.
const BAND_GAP: f64 = 0.05;

/// Ordinal scale: a fixed, ordered sequence of categories.
///
/// The range is split into one equal band per category, in domain order.
/// Categories are matched by exact equality, so a number never matches a
/// text label.
///
/// ```rust
/// use quillplot::scale::Ordinal;
///
/// let scale = Ordinal::new(["a", "b", "c", "d"]);
///
/// assert_eq!(scale.project(&"b".into(), 0.0, 20.0).unwrap(), 7.5);
/// assert_eq!(scale.project_interval(&"b".into(), 0.0, 20.0).unwrap(), (5.25, 9.75));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ordinal {
    domain: Vec<Value>,
}

impl Ordinal {
    /// Create a new ordinal scale. Order is kept as given.
    pub fn new<I, V>(domain: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            domain: domain.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the categories.
    #[must_use]
    pub fn domain(&self) -> &[Value] {
        &self.domain
    }

    fn position(&self, value: &Value) -> Result<usize> {
        self.domain
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| Error::NotInDomain(value.to_string()))
    }

    fn band_width(&self, range_min: f64, range_max: f64) -> f64 {
        (range_max - range_min) / self.domain.len() as f64
    }

    /// Project a category to the midpoint of its band.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInDomain`] if the value is not a category.
    pub fn project(&self, value: &Value, range_min: f64, range_max: f64) -> Result<f64> {
        let index = self.position(value)? as f64;
        let band = self.band_width(range_min, range_max);

        Ok(range_min + index * band + band / 2.0)
    }

    /// Project a category to its band, less a 5% gap on either side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInDomain`] if the value is not a category.
    pub fn project_interval(
        &self,
        value: &Value,
        range_min: f64,
        range_max: f64,
    ) -> Result<(f64, f64)> {
        let index = self.position(value)? as f64;
        let band = self.band_width(range_min, range_max);
        let gap = band * BAND_GAP;

        let start = range_min + index * band + gap;
        let end = range_min + (index + 1.0) * band - gap;
        Ok((start, end))
    }

    /// The categories, unchanged.
    #[must_use]
    pub fn ticks(&self) -> Vec<Value> {
        self.domain.clone()
    }

    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.domain.contains(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_interval_inside_band(
            len in 1usize..30,
            pick in 0usize..30,
            width in 1.0f64..2000.0,
        ) {
            let scale = Ordinal::new((0..len).map(|i| format!("c{i}")));
            let value = Value::from(format!("c{}", pick % len));
            let band = width / len as f64;

            let (start, end) = scale.project_interval(&value, 0.0, width).unwrap();
            let mid = scale.project(&value, 0.0, width).unwrap();
            let k = (pick % len) as f64;

            prop_assert!(start < mid && mid < end);
            prop_assert!(start >= k * band - 1e-9);
            prop_assert!(end <= (k + 1.0) * band + 1e-9);
            prop_assert!(((end - start) - 0.9 * band).abs() < 1e-9);
        }
    }
}
