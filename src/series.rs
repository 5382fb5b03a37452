//! Series: uniform access to arbitrary row data.
//!
//! A [`Series`] wraps a collection of rows and three axis accessors. Rows
//! are never copied or changed; every call to [`Series::data`] derives
//! fresh [`Datum`]s from them.
//!
//! Rows may be sequences (read by column index), maps (read by column
//! name), or any type read through a caller-supplied accessor.
//!
//! ```rust
//! use quillplot::series::{Axis, Series};
//! use quillplot::value::{DataType, Value};
//!
//! let series = Series::new(vec![(0.0, "foo"), (5.0, "bar")]);
//!
//! assert_eq!(series.data_type(Axis::X), DataType::Numeric);
//! assert_eq!(series.data_type(Axis::Y), DataType::Categorical);
//!
//! let first = series.data(false).next().unwrap();
//! assert_eq!(first.x, Some(Value::Number(0.0)));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::value::{Cell, DataType, Value};

/// Number of leading rows sampled when inferring an axis type.
const INFER_SAMPLE_ROWS: usize = 16;

/// A chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
    /// Grouping axis of a category series.
    Z,
}

impl Axis {
    const fn slot(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// Positional and named lookup into a row.
///
/// Both methods default to `None`, so a custom row type only needs an
/// empty `impl Row for MyRow {}` to be read through [`Key::func`].
pub trait Row {
    /// Value of the column at `index`.
    fn column(&self, _index: usize) -> Option<Value> {
        None
    }

    /// Value of the column called `name`.
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl<T: Cell> Row for Vec<T> {
    fn column(&self, index: usize) -> Option<Value> {
        self.get(index).and_then(Cell::to_value)
    }
}

impl<T: Cell, const N: usize> Row for [T; N] {
    fn column(&self, index: usize) -> Option<Value> {
        self.get(index).and_then(Cell::to_value)
    }
}

impl<A: Cell, B: Cell> Row for (A, B) {
    fn column(&self, index: usize) -> Option<Value> {
        match index {
            0 => self.0.to_value(),
            1 => self.1.to_value(),
            _ => None,
        }
    }
}

impl<A: Cell, B: Cell, C: Cell> Row for (A, B, C) {
    fn column(&self, index: usize) -> Option<Value> {
        match index {
            0 => self.0.to_value(),
            1 => self.1.to_value(),
            2 => self.2.to_value(),
            _ => None,
        }
    }
}

impl<T: Cell> Row for BTreeMap<String, T> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).and_then(Cell::to_value)
    }
}

impl<T: Cell, S: std::hash::BuildHasher> Row for HashMap<String, T, S> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).and_then(Cell::to_value)
    }
}

/// Uniform accessor: `(row, index) -> value`.
pub type Accessor<R> = Arc<dyn Fn(&R, usize) -> Option<Value> + Send + Sync>;

/// How to read one axis from a row.
pub enum Key<R> {
    /// Column position in a sequence row.
    Index(usize),
    /// Column name in a map row.
    Name(String),
    /// Caller-supplied accessor.
    Func(Accessor<R>),
}

impl<R> Key<R> {
    /// Read the column at `index`.
    #[must_use]
    pub fn index(index: usize) -> Self {
        Key::Index(index)
    }

    /// Read the column called `name`.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Key::Name(name.into())
    }

    /// Read values with a function of the row and its index.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&R, usize) -> Option<Value> + Send + Sync + 'static,
    {
        Key::Func(Arc::new(f))
    }
}

impl<R> Clone for Key<R> {
    fn clone(&self) -> Self {
        match self {
            Key::Index(i) => Key::Index(*i),
            Key::Name(n) => Key::Name(n.clone()),
            Key::Func(f) => Key::Func(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Key<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => f.debug_tuple("Index").field(i).finish(),
            Key::Name(n) => f.debug_tuple("Name").field(n).finish(),
            Key::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<R> From<usize> for Key<R> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl<R> From<&str> for Key<R> {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

/// Resolve a key into an accessor, once, at construction.
fn make_key<R: Row + 'static>(key: Key<R>) -> Accessor<R> {
    match key {
        Key::Index(index) => Arc::new(move |row: &R, _| row.column(index)),
        Key::Name(name) => Arc::new(move |row: &R, _| row.field(&name)),
        Key::Func(f) => f,
    }
}

/// Classify an axis from the first non-missing value among early rows.
fn infer_type<R>(rows: &[R], accessor: &Accessor<R>) -> DataType {
    rows.iter()
        .take(INFER_SAMPLE_ROWS)
        .enumerate()
        .find_map(|(i, row)| accessor(row, i))
        .map_or(DataType::Unknown, |v| v.data_type())
}

/// Whether a series carries a grouping axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Plain x/y series.
    Plain,
    /// Series grouped into categories by its z axis.
    Category,
}

/// One normalized data point.
#[derive(Debug, Clone, PartialEq)]
pub struct Datum<'a, R> {
    /// Row position in the source data.
    pub index: usize,
    /// X value, `None` if missing.
    pub x: Option<Value>,
    /// Y value, `None` if missing.
    pub y: Option<Value>,
    /// Z value, `None` if missing.
    pub z: Option<Value>,
    /// The source row.
    pub row: &'a R,
}

/// A data series and its inferred axis types.
pub struct Series<R> {
    rows: Vec<R>,
    keys: [Accessor<R>; 3],
    types: [DataType; 3],
    kind: SeriesKind,
}

impl<R: Row + 'static> Series<R> {
    /// Series reading x from column 0 and y from column 1.
    #[must_use]
    pub fn new(rows: Vec<R>) -> Self {
        Self::with_keys(rows, None, None)
    }

    /// Series with explicit x and y keys; `None` keeps the default column.
    #[must_use]
    pub fn with_keys(rows: Vec<R>, x: Option<Key<R>>, y: Option<Key<R>>) -> Self {
        Self::build(rows, [x, y, None], SeriesKind::Plain)
    }

    /// Category series: z (default column 2) names each row's group.
    #[must_use]
    pub fn categorized(
        rows: Vec<R>,
        x: Option<Key<R>>,
        y: Option<Key<R>>,
        z: Option<Key<R>>,
    ) -> Self {
        Self::build(rows, [x, y, z], SeriesKind::Category)
    }

    fn build(rows: Vec<R>, keys: [Option<Key<R>>; 3], kind: SeriesKind) -> Self {
        let [x, y, z] = keys;
        let keys = [
            make_key(x.unwrap_or(Key::Index(0))),
            make_key(y.unwrap_or(Key::Index(1))),
            make_key(z.unwrap_or(Key::Index(2))),
        ];

        let mut types = [
            infer_type(&rows, &keys[0]),
            infer_type(&rows, &keys[1]),
            DataType::Unknown,
        ];
        if kind == SeriesKind::Category {
            types[2] = infer_type(&rows, &keys[2]);
        }

        tracing::debug!(
            rows = rows.len(),
            ?kind,
            x = %types[0],
            y = %types[1],
            z = %types[2],
            "series created"
        );

        Self {
            rows,
            keys,
            types,
            kind,
        }
    }
}

impl<R> Series<R> {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The source rows.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Plain or category series.
    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Inferred type of an axis.
    #[must_use]
    pub fn data_type(&self, axis: Axis) -> DataType {
        self.types[axis.slot()]
    }

    /// Iterate the data in row order, or reversed.
    ///
    /// Missing values appear as `None`; no row is skipped.
    #[must_use]
    pub fn data(&self, reverse: bool) -> Data<'_, R> {
        Data {
            series: self,
            front: 0,
            back: self.rows.len(),
            reverse,
        }
    }

    fn datum(&self, index: usize) -> Datum<'_, R> {
        let row = &self.rows[index];
        Datum {
            index,
            x: (self.keys[0])(row, index),
            y: (self.keys[1])(row, index),
            z: (self.keys[2])(row, index),
            row,
        }
    }

    /// Non-missing values of an axis, in row order.
    #[must_use]
    pub fn values(&self, axis: Axis) -> Vec<Value> {
        let key = &self.keys[axis.slot()];
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| key(row, i))
            .collect()
    }

    /// Smallest numeric or temporal value of an axis.
    #[must_use]
    pub fn min(&self, axis: Axis) -> Option<Value> {
        self.extreme(axis, std::cmp::Ordering::Less)
    }

    /// Largest numeric or temporal value of an axis.
    #[must_use]
    pub fn max(&self, axis: Axis) -> Option<Value> {
        self.extreme(axis, std::cmp::Ordering::Greater)
    }

    fn extreme(&self, axis: Axis, wanted: std::cmp::Ordering) -> Option<Value> {
        let mut best: Option<Value> = None;
        for value in self.values(axis) {
            let replace = match (&best, &value) {
                (None, Value::Number(_) | Value::Date(_) | Value::DateTime(_)) => true,
                (Some(Value::Number(a)), Value::Number(b)) => b.partial_cmp(a) == Some(wanted),
                (Some(current), candidate) => {
                    match (current.as_datetime(), candidate.as_datetime()) {
                        (Some(a), Some(b)) => b.cmp(&a) == wanted,
                        _ => false,
                    }
                }
                (None, Value::Text(_)) => false,
            };
            if replace {
                best = Some(value);
            }
        }
        best
    }

    /// Distinct z values in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<Value> {
        let mut categories: Vec<Value> = Vec::new();
        for value in self.values(Axis::Z) {
            if !categories.contains(&value) {
                categories.push(value);
            }
        }
        categories
    }
}

impl<R> fmt::Debug for Series<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("rows", &self.rows.len())
            .field("types", &self.types)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Lazy iterator over a series' data. Created by [`Series::data`].
pub struct Data<'a, R> {
    series: &'a Series<R>,
    front: usize,
    back: usize,
    reverse: bool,
}

impl<'a, R> Iterator for Data<'a, R> {
    type Item = Datum<'a, R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = if self.reverse {
            self.back -= 1;
            self.back
        } else {
            self.front += 1;
            self.front - 1
        };
        Some(self.series.datum(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<R> ExactSizeIterator for Data<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_defaults_read_first_columns() {
        let series = Series::new(vec![(0.0, "foo"), (5.0, "bar"), (10.0, "bing")]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.kind(), SeriesKind::Plain);
        assert_eq!(series.data_type(Axis::X), DataType::Numeric);
        assert_eq!(series.data_type(Axis::Y), DataType::Categorical);
        assert_eq!(series.data_type(Axis::Z), DataType::Unknown);

        let data: Vec<_> = series.data(false).collect();
        assert_eq!(data[1].index, 1);
        assert_eq!(data[1].x, Some(Value::Number(5.0)));
        assert_eq!(data[1].y, Some(Value::from("bar")));
        assert_eq!(data[1].z, None);
    }

    #[test]
    fn test_reverse_order() {
        let series = Series::new(vec![(0, 1), (2, 3), (4, 5)]);
        let indexes: Vec<usize> = series.data(true).map(|d| d.index).collect();
        assert_eq!(indexes, vec![2, 1, 0]);
    }

    #[test]
    fn test_data_is_restartable() {
        let series = Series::new(vec![(0, 1), (2, 3)]);
        let first: Vec<_> = series.data(false).collect();
        let second: Vec<_> = series.data(false).collect();
        assert_eq!(first, second);
        assert_eq!(series.data(true).len(), 2);
    }

    #[test]
    fn test_missing_values_are_kept() {
        let series = Series::new(vec![
            (Some(0.0), Some("foo")),
            (None, None),
            (Some(10.0), Some("bing")),
        ]);

        let data: Vec<_> = series.data(false).collect();
        assert_eq!(data.len(), 3);
        assert_eq!(data[1].x, None);
        assert_eq!(data[1].y, None);
    }

    #[test]
    fn test_inference_skips_leading_missing() {
        let series = Series::new(vec![(None, Some(1.0)), (Some("a"), Some(2.0))]);
        assert_eq!(series.data_type(Axis::X), DataType::Categorical);

        let series = Series::new(vec![(None::<f64>, Some(1.0))]);
        assert_eq!(series.data_type(Axis::X), DataType::Unknown);
    }

    #[test]
    fn test_named_keys() {
        let rows: Vec<BTreeMap<String, Value>> = vec![
            BTreeMap::from([
                ("when".to_string(), Value::from(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())),
                ("count".to_string(), Value::from(3)),
            ]),
            BTreeMap::from([("count".to_string(), Value::from(4))]),
        ];
        let series = Series::with_keys(rows, Some(Key::name("when")), Some(Key::name("count")));

        assert_eq!(series.data_type(Axis::X), DataType::Temporal);
        assert_eq!(series.data_type(Axis::Y), DataType::Numeric);
        let data: Vec<_> = series.data(false).collect();
        assert_eq!(data[1].x, None);
        assert_eq!(data[1].y, Some(Value::from(4)));
    }

    #[test]
    fn test_func_keys_on_custom_rows() {
        struct Reading {
            label: &'static str,
            level: f64,
        }
        impl Row for Reading {}

        let rows = vec![
            Reading { label: "a", level: 1.5 },
            Reading { label: "b", level: 2.5 },
        ];
        let series = Series::with_keys(
            rows,
            Some(Key::func(|r: &Reading, i| Some(Value::from(r.level * i as f64)))),
            Some(Key::func(|r: &Reading, _| Some(Value::from(r.label)))),
        );

        let data: Vec<_> = series.data(false).collect();
        assert_eq!(data[0].x, Some(Value::Number(0.0)));
        assert_eq!(data[1].x, Some(Value::Number(2.5)));
        assert_eq!(data[1].y, Some(Value::from("b")));
        assert_eq!(data[1].row.level, 2.5);
    }

    #[test]
    fn test_index_key_on_custom_row_is_missing() {
        struct Opaque;
        impl Row for Opaque {}

        let series = Series::new(vec![Opaque]);
        let datum = series.data(false).next().unwrap();
        assert_eq!(datum.x, None);
        assert_eq!(series.data_type(Axis::X), DataType::Unknown);
    }

    #[test]
    fn test_categorized_infers_z() {
        let series = Series::categorized(
            vec![(1, 2, "north"), (3, 4, "south"), (5, 6, "north")],
            None,
            None,
            None,
        );

        assert_eq!(series.kind(), SeriesKind::Category);
        assert_eq!(series.data_type(Axis::Z), DataType::Categorical);
        assert_eq!(series.categories(), vec![Value::from("north"), Value::from("south")]);
    }

    #[test]
    fn test_min_max() {
        let series = Series::new(vec![(Some(3.0), 1), (None, 2), (Some(-2.0), 3), (Some(7.0), 4)]);
        assert_eq!(series.min(Axis::X), Some(Value::Number(-2.0)));
        assert_eq!(series.max(Axis::X), Some(Value::Number(7.0)));
        assert_eq!(series.values(Axis::X).len(), 3);

        let text = Series::new(vec![("a", 1)]);
        assert_eq!(text.min(Axis::X), None);
    }

    #[test]
    fn test_min_max_dates() {
        let d = |day| NaiveDate::from_ymd_opt(2020, 1, day).unwrap();
        let series = Series::new(vec![(d(5), 1), (d(2), 2), (d(9), 3)]);
        assert_eq!(series.min(Axis::X), Some(Value::Date(d(2))));
        assert_eq!(series.max(Axis::X), Some(Value::Date(d(9))));
    }
}
