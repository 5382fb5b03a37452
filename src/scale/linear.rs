use std::cmp::Ordering;

use num_traits::{Num, NumCast};

use crate::error::{Error, Result};

/// Linear scale: affine mapping from a numeric domain to a pixel range.
///
/// `Linear` is generic over its numeric type so that exact types (such as a
/// 128-bit decimal) project without passing through floating point. Any
/// type with the usual arithmetic operators, a partial order and a cast from
/// primitive integers can be used.
///
/// # Zero Spread
///
/// A domain with `min == max` is accepted. Every value at or below `min`
/// projects to the low end of the range, every value above it to the high
/// end.
///
/// # Integer Domains
///
/// Projection computes `max - min` and ticks compute `(max - min) * i` in
/// `T` itself. For primitive integers both must fit in `T`, so a domain such
/// as `i64::MIN..=i64::MAX` overflows; widen to a larger type (or use a
/// float or decimal) for domains that span more than half the type's range.
///
/// # Examples
///
/// ```rust
/// use quillplot::scale::Linear;
///
/// let scale = Linear::new(0.0, 10.0).expect("valid domain");
///
/// assert_eq!(scale.project(2.0, 0.0, 20.0), 4.0);
/// assert_eq!(scale.project(5.0, 10.0, 41.0), 25.5);
/// assert_eq!(scale.ticks(5), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
/// ```
///
/// Values outside the domain are not clamped:
///
/// ```rust
/// use quillplot::scale::Linear;
///
/// let scale = Linear::new(10.0, 40.0).expect("valid domain");
/// assert_eq!(scale.project(4.0, 0.0, 20.0), -4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear<T = f64> {
    min: T,
    max: T,
}

impl<T> Linear<T>
where
    T: Num + NumCast + PartialOrd + Copy,
{
    /// Create a new linear scale over `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if `min > max` or the bounds are not
    /// comparable (NaN).
    pub fn new(min: T, max: T) -> Result<Self> {
        if !matches!(min.partial_cmp(&max), Some(Ordering::Less | Ordering::Equal)) {
            return Err(Error::ScaleDomain(
                "Linear domain minimum must not exceed its maximum".to_string(),
            ));
        }

        Ok(Self { min, max })
    }

    /// Get the domain extent.
    #[must_use]
    pub fn domain(&self) -> (T, T) {
        (self.min, self.max)
    }

    /// Whether the domain has zero spread.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Project a domain value into `[range_min, range_max]`.
    #[must_use]
    pub fn project(&self, value: T, range_min: T, range_max: T) -> T {
        if self.is_degenerate() {
            return if value > self.min { range_max } else { range_min };
        }

        let pos = (value - self.min) / (self.max - self.min);
        range_min + pos * (range_max - range_min)
    }

    /// Produce `count` evenly spaced values from `min` to `max` inclusive.
    ///
    /// A zero-spread domain yields its single value.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<T> {
        if count == 0 {
            return Vec::new();
        }
        if count == 1 || self.is_degenerate() {
            return vec![self.min];
        }

        let Some(intervals) = <T as NumCast>::from(count - 1) else {
            return vec![self.min, self.max];
        };
        let spread = self.max - self.min;

        let mut ticks: Vec<T> = (0..count - 1)
            .filter_map(|i| <T as NumCast>::from(i))
            .map(|i| self.min + spread * i / intervals)
            .collect();
        // The last tick is the exact maximum rather than an accumulated sum.
        ticks.push(self.max);
        ticks
    }

    /// Domain membership test, inclusive at both ends.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}
