use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::{Error, Result};
use crate::value::Value;

/// Upper bound on generated calendar boundaries. Steps that would produce
/// more are never chosen.
const MAX_TICKS: usize = 10_000;

const SECONDS_PER_DAY: f64 = 86_400.0;
/// Mean Gregorian month.
const SECONDS_PER_MONTH: f64 = 2_629_746.0;
/// Mean Gregorian year.
const SECONDS_PER_YEAR: f64 = 31_556_952.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Date,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interval {
    unit: Unit,
    step: u32,
}

impl Interval {
    const fn new(unit: Unit, step: u32) -> Self {
        Self { unit, step }
    }

    fn approx_seconds(self) -> f64 {
        let unit = match self.unit {
            Unit::Second => 1.0,
            Unit::Minute => 60.0,
            Unit::Hour => 3_600.0,
            Unit::Day => SECONDS_PER_DAY,
            Unit::Month => SECONDS_PER_MONTH,
            Unit::Year => SECONDS_PER_YEAR,
        };
        unit * f64::from(self.step)
    }
}

/// Sub-year calendar steps, smallest first.
const INTERVALS: &[Interval] = &[
    Interval::new(Unit::Second, 1),
    Interval::new(Unit::Second, 5),
    Interval::new(Unit::Second, 15),
    Interval::new(Unit::Second, 30),
    Interval::new(Unit::Minute, 1),
    Interval::new(Unit::Minute, 5),
    Interval::new(Unit::Minute, 15),
    Interval::new(Unit::Minute, 30),
    Interval::new(Unit::Hour, 1),
    Interval::new(Unit::Hour, 3),
    Interval::new(Unit::Hour, 6),
    Interval::new(Unit::Hour, 12),
    Interval::new(Unit::Day, 1),
    Interval::new(Unit::Day, 2),
    Interval::new(Unit::Day, 7),
    Interval::new(Unit::Day, 14),
    Interval::new(Unit::Month, 1),
    Interval::new(Unit::Month, 3),
    Interval::new(Unit::Month, 6),
];

/// Temporal scale: a span between two points in time.
///
/// Projection interpolates linearly over elapsed nanoseconds. Ticks fall on
/// calendar boundaries (years, months, days, hours, ...) chosen from the
/// span, always framed by the exact domain endpoints.
///
/// ```rust
/// use chrono::NaiveDate;
/// use quillplot::scale::Temporal;
/// use quillplot::value::Value;
///
/// let start = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap();
/// let scale = Temporal::from_dates(start, end).expect("valid domain");
///
/// let ticks = scale.ticks(5);
/// assert_eq!(ticks.first(), Some(&Value::Date(start)));
/// assert_eq!(ticks.last(), Some(&Value::Date(end)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temporal {
    min: NaiveDateTime,
    max: NaiveDateTime,
    resolution: Resolution,
}

impl Temporal {
    /// Create a temporal scale over date-times.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if `min > max`.
    pub fn new(min: NaiveDateTime, max: NaiveDateTime) -> Result<Self> {
        Self::with_resolution(min, max, Resolution::DateTime)
    }

    /// Create a temporal scale over calendar dates. Ticks are reported as
    /// dates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if `min > max`.
    pub fn from_dates(min: NaiveDate, max: NaiveDate) -> Result<Self> {
        Self::with_resolution(
            min.and_time(NaiveTime::MIN),
            max.and_time(NaiveTime::MIN),
            Resolution::Date,
        )
    }

    fn with_resolution(
        min: NaiveDateTime,
        max: NaiveDateTime,
        resolution: Resolution,
    ) -> Result<Self> {
        if min > max {
            return Err(Error::ScaleDomain(format!(
                "Temporal domain start {min} is after end {max}"
            )));
        }

        Ok(Self {
            min,
            max,
            resolution,
        })
    }

    /// Get the domain extent.
    #[must_use]
    pub fn domain(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.min, self.max)
    }

    /// Project a point in time into `[range_min, range_max]`.
    ///
    /// A zero-length domain behaves like a zero-spread linear scale.
    #[must_use]
    pub fn project(&self, value: NaiveDateTime, range_min: f64, range_max: f64) -> f64 {
        if self.min == self.max {
            return if value > self.min { range_max } else { range_min };
        }

        let span = nanos(self.max - self.min);
        let offset = nanos(value - self.min);
        range_min + offset / span * (range_max - range_min)
    }

    /// Temporal scales have no bands.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::UnsupportedForScale`].
    pub fn project_interval(
        &self,
        _value: NaiveDateTime,
        _range_min: f64,
        _range_max: f64,
    ) -> Result<(f64, f64)> {
        Err(Error::UnsupportedForScale {
            operation: "project_interval",
            scale: "temporal",
        })
    }

    /// Produce calendar-aligned ticks, about `count` of them.
    ///
    /// The first tick is the domain minimum and the last the domain maximum,
    /// exactly. Interior ticks are calendar boundaries of the step closest
    /// to `span / (count - 1)`.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        let mut points = vec![self.min];
        if self.max == self.min {
            return self.to_values(points);
        }

        if count > 2 {
            let span = nanos(self.max - self.min) / 1e9;
            let interval = self.choose_interval(span, count);
            tracing::trace!(?interval, "temporal tick interval");
            points.extend(boundaries(self.min, self.max, interval));
        }

        points.push(self.max);
        self.to_values(points)
    }

    /// Membership test, inclusive at both ends.
    #[must_use]
    pub fn contains(&self, value: NaiveDateTime) -> bool {
        self.min <= value && value <= self.max
    }

    /// Step closest to `span / (count - 1)` among those yielding at most
    /// [`MAX_TICKS`] boundaries over `span` seconds.
    fn choose_interval(&self, span: f64, count: usize) -> Interval {
        let target_seconds = span / (count - 1) as f64;
        let years = nice_years(target_seconds / SECONDS_PER_YEAR);
        let distance = |interval: &Interval| (interval.approx_seconds() / target_seconds).ln().abs();
        let fits = |interval: &Interval| span / interval.approx_seconds() <= MAX_TICKS as f64;

        let best = INTERVALS
            .iter()
            .copied()
            .chain(std::iter::once(Interval::new(Unit::Year, years)))
            .filter(fits)
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .unwrap_or_else(|| {
                let years = (span / SECONDS_PER_YEAR / MAX_TICKS as f64).ceil();
                Interval::new(Unit::Year, years.clamp(1.0, f64::from(u32::MAX)) as u32)
            });

        if self.resolution == Resolution::Date && best.unit < Unit::Day {
            Interval::new(Unit::Day, 1)
        } else {
            best
        }
    }

    fn to_values(&self, points: Vec<NaiveDateTime>) -> Vec<Value> {
        points
            .into_iter()
            .map(|p| match self.resolution {
                Resolution::Date => Value::Date(p.date()),
                Resolution::DateTime => Value::DateTime(p),
            })
            .collect()
    }
}

/// Elapsed time in nanoseconds, through coarser units when the span
/// overflows an `i64` of nanoseconds.
fn nanos(delta: TimeDelta) -> f64 {
    delta
        .num_nanoseconds()
        .map(|ns| ns as f64)
        .or_else(|| delta.num_microseconds().map(|us| us as f64 * 1e3))
        .unwrap_or_else(|| delta.num_milliseconds() as f64 * 1e6)
}

/// Round a year count to 1, 2 or 5 times a power of ten.
fn nice_years(years: f64) -> u32 {
    if years.is_nan() || years <= 1.0 {
        return 1;
    }

    let magnitude = 10f64.powf(years.log10().floor());
    let normalized = years / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };

    (nice * magnitude).min(f64::from(u32::MAX)) as u32
}

/// Index of the calendar unit containing `point`, counted from a fixed epoch.
fn unit_index(point: NaiveDateTime, unit: Unit) -> i64 {
    match unit {
        Unit::Year => i64::from(point.year()),
        Unit::Month => i64::from(point.year()) * 12 + i64::from(point.month0()),
        Unit::Day => i64::from(point.date().num_days_from_ce()),
        Unit::Hour => point.and_utc().timestamp().div_euclid(3_600),
        Unit::Minute => point.and_utc().timestamp().div_euclid(60),
        Unit::Second => point.and_utc().timestamp(),
    }
}

/// First instant of the calendar unit with the given index.
fn unit_start(index: i64, unit: Unit) -> Option<NaiveDateTime> {
    let from_timestamp = |seconds: i64| Some(DateTime::from_timestamp(seconds, 0)?.naive_utc());

    match unit {
        Unit::Year => {
            let year = i32::try_from(index).ok()?;
            Some(NaiveDate::from_ymd_opt(year, 1, 1)?.and_time(NaiveTime::MIN))
        }
        Unit::Month => {
            let year = i32::try_from(index.div_euclid(12)).ok()?;
            let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
            Some(NaiveDate::from_ymd_opt(year, month, 1)?.and_time(NaiveTime::MIN))
        }
        Unit::Day => {
            let days = i32::try_from(index).ok()?;
            Some(NaiveDate::from_num_days_from_ce_opt(days)?.and_time(NaiveTime::MIN))
        }
        Unit::Hour => from_timestamp(index.checked_mul(3_600)?),
        Unit::Minute => from_timestamp(index.checked_mul(60)?),
        Unit::Second => from_timestamp(index),
    }
}

/// Calendar boundaries of `interval` strictly between `min` and `max`.
fn boundaries(min: NaiveDateTime, max: NaiveDateTime, interval: Interval) -> Vec<NaiveDateTime> {
    let step = i64::from(interval.step);
    let mut index = unit_index(min, interval.unit).div_euclid(step) * step;

    let mut points = Vec::new();
    // mean month and year lengths can undercount by one boundary
    while points.len() <= MAX_TICKS {
        let Some(point) = unit_start(index, interval.unit) else {
            break;
        };
        if point >= max {
            break;
        }
        if point > min {
            points.push(point);
        }
        index += step;
    }
    points
}
