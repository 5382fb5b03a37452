//! Shapes: render a series through two scales into SVG primitives.
//!
//! Every shape follows the same contract:
//!
//! - [`validate_series`](Shape::validate_series) rejects a series whose
//!   inferred axis types the shape cannot draw, before any rendering.
//! - [`to_svg`](Shape::to_svg) iterates the series, skips any datum missing
//!   a required axis value, and returns a [`Group`] of primitives.
//!
//! | Shape | Primitive | x axis | y axis |
//! |---|---|---|---|
//! | [`Bars`] | `rect` | magnitude | band |
//! | [`Columns`] | `rect` | band | magnitude |
//! | [`Dots`] | `circle` | position | position |
//! | [`Line`] | `path` | position | position |
//!
//! None of them draw a category series.

mod bars;
mod columns;
mod dots;
mod line;

pub use bars::Bars;
pub use columns::Columns;
pub use dots::Dots;
pub use line::Line;

use std::fmt;
use std::sync::Arc;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::output::Group;
use crate::scale::Scale;
use crate::series::{Axis, Datum, Series, SeriesKind};
use crate::value::{DataType, Value};

// ============================================================================
// Colors
// ============================================================================

/// Per-datum color function: `(x, y, row, index) -> color`.
pub type ColorFn<R> = Arc<dyn Fn(&Value, &Value, &R, usize) -> String + Send + Sync>;

/// Where a shape gets its fill or stroke color.
pub enum ColorSource<R> {
    /// One color for every primitive.
    Fixed(String),
    /// A color computed for each primitive.
    Func(ColorFn<R>),
}

impl<R> ColorSource<R> {
    /// Compute colors with a function of the datum.
    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value, &R, usize) -> String + Send + Sync + 'static,
    {
        ColorSource::Func(Arc::new(f))
    }
}

impl<R> Clone for ColorSource<R> {
    fn clone(&self) -> Self {
        match self {
            ColorSource::Fixed(color) => ColorSource::Fixed(color.clone()),
            ColorSource::Func(f) => ColorSource::Func(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for ColorSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSource::Fixed(color) => f.debug_tuple("Fixed").field(color).finish(),
            ColorSource::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl<R> From<&str> for ColorSource<R> {
    fn from(color: &str) -> Self {
        ColorSource::Fixed(color.to_string())
    }
}

impl<R> From<String> for ColorSource<R> {
    fn from(color: String) -> Self {
        ColorSource::Fixed(color)
    }
}

impl<R> From<Rgba> for ColorSource<R> {
    fn from(color: Rgba) -> Self {
        ColorSource::Fixed(color.to_css())
    }
}

/// A producer of colors for shapes that were given none.
///
/// Any iterator of strings is a palette, so a cycling palette is just
/// `colors.into_iter().cycle()`.
pub trait Palette {
    /// The next color, or `None` once the palette is used up.
    fn next_color(&mut self) -> Option<String>;
}

impl<I: Iterator<Item = String>> Palette for I {
    fn next_color(&mut self) -> Option<String> {
        self.next()
    }
}

/// Color source resolved for one render pass.
enum Fill<'a, R> {
    Fixed(String),
    Func(&'a ColorFn<R>),
}

impl<'a, R> Fill<'a, R> {
    /// Resolve a shape's configured color, drawing from the palette if unset.
    fn resolve<P: Palette + ?Sized>(
        source: &'a Option<ColorSource<R>>,
        palette: &mut P,
    ) -> Result<Self> {
        match source {
            Some(ColorSource::Fixed(color)) => Ok(Fill::Fixed(color.clone())),
            Some(ColorSource::Func(f)) => Ok(Fill::Func(f)),
            None => palette
                .next_color()
                .map(Fill::Fixed)
                .ok_or(Error::PaletteExhausted),
        }
    }

    fn color(&self, x: &Value, y: &Value, row: &R, index: usize) -> String {
        match self {
            Fill::Fixed(color) => color.clone(),
            Fill::Func(f) => f(x, y, row, index),
        }
    }
}

// ============================================================================
// Shared rendering helpers
// ============================================================================

/// Both axis values of a datum, or `None` if either is missing.
fn required<'d, R>(datum: &'d Datum<'_, R>) -> Option<(&'d Value, &'d Value)> {
    match (&datum.x, &datum.y) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => {
            tracing::trace!(index = datum.index, "skipping datum with missing value");
            None
        }
    }
}

/// Pixel position of the zero baseline on a magnitude axis.
///
/// Only linear scales contain zero; other scales start bars at `range_min`.
fn baseline(scale: &Scale, range_min: f64, range_max: f64) -> Result<f64> {
    match scale {
        Scale::Linear(_) => scale.project(&Value::Number(0.0), range_min, range_max),
        Scale::Ordinal(_) | Scale::Temporal(_) => Ok(range_min),
    }
}

/// Shared series check: no category series, and no categorical values on
/// the axes listed in `continuous`.
fn check_series<R>(shape: &'static str, series: &Series<R>, continuous: &[Axis]) -> Result<()> {
    if series.kind() == SeriesKind::Category {
        tracing::debug!(shape, "rejected category series");
        return Err(Error::Validation(format!(
            "{shape} cannot render a category series"
        )));
    }

    for &axis in continuous {
        if series.data_type(axis) == DataType::Categorical {
            tracing::debug!(shape, %axis, "rejected categorical axis");
            return Err(Error::Validation(format!(
                "{shape} cannot render categorical data on the {axis} axis"
            )));
        }
    }

    Ok(())
}

// ============================================================================
// Shape
// ============================================================================

/// Any shape.
#[derive(Debug, Clone)]
pub enum Shape<R> {
    /// Horizontal bars.
    Bars(Bars<R>),
    /// Vertical bars.
    Columns(Columns<R>),
    /// Circles.
    Dots(Dots<R>),
    /// Connected paths.
    Line(Line<R>),
}

impl<R> From<Bars<R>> for Shape<R> {
    fn from(shape: Bars<R>) -> Self {
        Shape::Bars(shape)
    }
}

impl<R> From<Columns<R>> for Shape<R> {
    fn from(shape: Columns<R>) -> Self {
        Shape::Columns(shape)
    }
}

impl<R> From<Dots<R>> for Shape<R> {
    fn from(shape: Dots<R>) -> Self {
        Shape::Dots(shape)
    }
}

impl<R> From<Line<R>> for Shape<R> {
    fn from(shape: Line<R>) -> Self {
        Shape::Line(shape)
    }
}

impl<R> Shape<R> {
    /// Check that this shape can draw `series`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an incompatible series.
    pub fn validate_series(&self, series: &Series<R>) -> Result<()> {
        match self {
            Shape::Bars(shape) => shape.validate_series(series),
            Shape::Columns(shape) => shape.validate_series(series),
            Shape::Dots(shape) => shape.validate_series(series),
            Shape::Line(shape) => shape.validate_series(series),
        }
    }

    /// Render `series` into a `width` x `height` area.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for an incompatible series, scale errors
    /// for values a scale cannot project, and [`Error::PaletteExhausted`]
    /// when no color is configured and the palette is empty.
    pub fn to_svg<P: Palette + ?Sized>(
        &self,
        width: f64,
        height: f64,
        x_scale: &Scale,
        y_scale: &Scale,
        series: &Series<R>,
        palette: &mut P,
    ) -> Result<Group> {
        match self {
            Shape::Bars(shape) => shape.to_svg(width, height, x_scale, y_scale, series, palette),
            Shape::Columns(shape) => shape.to_svg(width, height, x_scale, y_scale, series, palette),
            Shape::Dots(shape) => shape.to_svg(width, height, x_scale, y_scale, series, palette),
            Shape::Line(shape) => shape.to_svg(width, height, x_scale, y_scale, series, palette),
        }
    }
}
