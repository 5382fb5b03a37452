use super::{check_series, required, ColorSource, Fill, Palette};
use crate::error::Result;
use crate::output::{Group, SvgElement};
use crate::scale::Scale;
use crate::series::{Axis, Series};

/// Default circle radius in pixels.
pub const DEFAULT_RADIUS: f64 = 4.0;

/// One circle per datum.
///
/// Positions use plain projection, so an ordinal x scale places each dot at
/// the middle of its band.
#[derive(Debug, Clone)]
pub struct Dots<R> {
    fill: Option<ColorSource<R>>,
    radius: f64,
}

impl<R> Default for Dots<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Dots<R> {
    /// Create dots of [`DEFAULT_RADIUS`], colored from the palette.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fill: None,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Set the fill color or color function.
    #[must_use]
    pub fn fill(mut self, color: impl Into<ColorSource<R>>) -> Self {
        self.fill = Some(color.into());
        self
    }

    /// Set the circle radius.
    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Reject category series and categorical y values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the series
    /// cannot be drawn as dots.
    pub fn validate_series(&self, series: &Series<R>) -> Result<()> {
        check_series("dots", series, &[Axis::Y])
    }

    /// Render one `circle` per row that has both values.
    ///
    /// # Errors
    ///
    /// Fails on an invalid series, a value a scale cannot project, or an
    /// exhausted palette.
    pub fn to_svg<P: Palette + ?Sized>(
        &self,
        width: f64,
        height: f64,
        x_scale: &Scale,
        y_scale: &Scale,
        series: &Series<R>,
        palette: &mut P,
    ) -> Result<Group> {
        self.validate_series(series)?;

        let fill = Fill::resolve(&self.fill, palette)?;
        let mut group = Group::new("series dots");

        for datum in series.data(false) {
            let Some((x, y)) = required(&datum) else {
                continue;
            };

            group.push(SvgElement::Circle {
                cx: x_scale.project(x, 0.0, width)?,
                cy: y_scale.project(y, height, 0.0)?,
                r: self.radius,
                fill: fill.color(x, y, datum.row, datum.index),
            });
        }

        tracing::debug!(
            circles = group.len(),
            skipped = series.len() - group.len(),
            "rendered dots"
        );
        Ok(group)
    }
}
