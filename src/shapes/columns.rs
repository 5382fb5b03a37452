use super::{baseline, check_series, required, ColorSource, Fill, Palette};
use crate::error::Result;
use crate::output::{Group, SvgElement};
use crate::scale::Scale;
use crate::series::{Axis, Series};

/// Vertical bars.
///
/// The transpose of [`Bars`](super::Bars): the x axis gives each column its
/// band and the y axis is the magnitude, growing up from the zero baseline
/// or down for negative values. Rows are drawn in order.
#[derive(Debug, Clone)]
pub struct Columns<R> {
    fill: Option<ColorSource<R>>,
}

impl<R> Default for Columns<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Columns<R> {
    /// Create columns colored from the palette.
    #[must_use]
    pub fn new() -> Self {
        Self { fill: None }
    }

    /// Set the fill color or color function.
    #[must_use]
    pub fn fill(mut self, color: impl Into<ColorSource<R>>) -> Self {
        self.fill = Some(color.into());
        self
    }

    /// Reject category series and categorical y values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the series
    /// cannot be drawn as columns.
    pub fn validate_series(&self, series: &Series<R>) -> Result<()> {
        check_series("columns", series, &[Axis::Y])
    }

    /// Render one `rect` per row that has both values.
    ///
    /// # Errors
    ///
    /// Fails on an invalid series, an x scale without bands, a value a scale
    /// cannot project, or an exhausted palette.
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
        let zero_y = baseline(y_scale, height, 0.0)?;
        let mut group = Group::new("series columns");

        for datum in series.data(false) {
            let Some((x, y)) = required(&datum) else {
                continue;
            };

            let (x1, x2) = x_scale.project_interval(x, 0.0, width)?;
            let proj_y = y_scale.project(y, height, 0.0)?;

            let (column_y, column_height) = if y.is_negative() {
                (zero_y, proj_y - zero_y)
            } else {
                (proj_y, zero_y - proj_y)
            };

            group.push(SvgElement::Rect {
                x: x1,
                y: column_y,
                width: x2 - x1,
                height: column_height,
                fill: fill.color(x, y, datum.row, datum.index),
            });
        }

        tracing::debug!(
            rects = group.len(),
            skipped = series.len() - group.len(),
            "rendered columns"
        );
        Ok(group)
    }
}
