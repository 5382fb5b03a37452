use super::{baseline, check_series, required, ColorSource, Fill, Palette};
use crate::error::Result;
use crate::output::{Group, SvgElement};
use crate::scale::Scale;
use crate::series::{Axis, Series};

/// Horizontal bars.
///
/// The x axis is the magnitude: each bar runs from the zero baseline to the
/// projected x value, leftward for negative values. The y axis gives each
/// bar its band. Rows are drawn last to first, so the first row ends up at
/// the top of the chart.
#[derive(Debug, Clone)]
pub struct Bars<R> {
    fill: Option<ColorSource<R>>,
}

impl<R> Default for Bars<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Bars<R> {
    /// Create bars colored from the palette.
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

    /// Reject category series and categorical x values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the series
    /// cannot be drawn as bars.
    pub fn validate_series(&self, series: &Series<R>) -> Result<()> {
        check_series("bars", series, &[Axis::X])
    }

    /// Render one `rect` per row that has both values.
    ///
    /// # Errors
    ///
    /// Fails on an invalid series, a y scale without bands, a value a scale
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
        let zero_x = baseline(x_scale, 0.0, width)?;
        let mut group = Group::new("series bars");

        for datum in series.data(true) {
            let Some((x, y)) = required(&datum) else {
                continue;
            };

            let (y1, y2) = y_scale.project_interval(y, height, 0.0)?;
            let proj_x = x_scale.project(x, 0.0, width)?;

            let (bar_x, bar_width) = if x.is_negative() {
                (proj_x, zero_x - proj_x)
            } else {
                (zero_x, proj_x - zero_x)
            };

            group.push(SvgElement::Rect {
                x: bar_x,
                y: y2,
                width: bar_width,
                height: y1 - y2,
                fill: fill.color(x, y, datum.row, datum.index),
            });
        }

        tracing::debug!(
            rects = group.len(),
            skipped = series.len() - group.len(),
            "rendered bars"
        );
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::value::Value;

    fn palette() -> std::vec::IntoIter<String> {
        vec!["red".to_string(), "white".to_string(), "blue".to_string()].into_iter()
    }

    fn ordinal() -> Scale {
        Scale::ordinal(["foo", "bar", "bing"])
    }

    fn attr(group: &Group, i: usize, name: &str) -> f64 {
        group.elements()[i]
            .attribute(name)
            .and_then(|v| v.parse().ok())
            .unwrap()
    }

    #[test]
    fn test_to_svg() {
        let series = Series::new(vec![(0, "foo"), (5, "bar"), (10, "bing")]);
        let linear = Scale::linear(0.0, 10.0).unwrap();

        let group = Bars::new()
            .fill("red")
            .to_svg(200.0, 100.0, &linear, &ordinal(), &series, &mut palette())
            .unwrap();

        assert_eq!(group.len(), 3);
        assert_eq!(group.class(), "series bars");
        // last row first
        assert_eq!(attr(&group, 0, "x"), 0.0);
        assert_eq!(attr(&group, 0, "width"), 200.0);
        assert_eq!(attr(&group, 2, "width"), 0.0);
        assert_eq!(attr(&group, 1, "width"), 100.0);
    }

    #[test]
    fn test_band_geometry() {
        let series = Series::new(vec![(5, "foo")]);
        let linear = Scale::linear(0.0, 10.0).unwrap();
        let group = Bars::new()
            .to_svg(200.0, 300.0, &linear, &ordinal(), &series, &mut palette())
            .unwrap();

        // foo occupies the bottom band of an inverted range
        approx::assert_abs_diff_eq!(attr(&group, 0, "y"), 205.0, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(attr(&group, 0, "height"), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nulls() {
        let series = Series::new(vec![
            (Some(0), Some("foo")),
            (None, None),
            (Some(10), Some("bing")),
        ]);
        let linear = Scale::linear(0.0, 10.0).unwrap();

        let group = Bars::new()
            .fill("red")
            .to_svg(200.0, 100.0, &linear, &ordinal(), &series, &mut palette())
            .unwrap();

        assert_eq!(group.len(), 2);
        assert_eq!(attr(&group, 0, "x"), 0.0);
        assert_eq!(attr(&group, 0, "width"), 200.0);
    }

    #[test]
    fn test_zeros() {
        let series = Series::new(vec![
            (Some(0), Some("foo")),
            (Some(0), None),
            (Some(0), Some("bing")),
        ]);
        let linear = Scale::linear(0.0, 0.0).unwrap();

        let group = Bars::new()
            .fill("red")
            .to_svg(200.0, 100.0, &linear, &ordinal(), &series, &mut palette())
            .unwrap();

        assert_eq!(group.len(), 2);
        for i in 0..2 {
            assert_eq!(attr(&group, i, "x"), 0.0);
            assert_eq!(attr(&group, i, "width"), 0.0);
        }
    }

    #[test]
    fn test_negative_values_extend_left() {
        let series = Series::new(vec![(-5, "foo"), (5, "bar")]);
        let linear = Scale::linear(-10.0, 10.0).unwrap();

        let group = Bars::new()
            .to_svg(200.0, 100.0, &linear, &ordinal(), &series, &mut palette())
            .unwrap();

        // bar (positive) is drawn first
        assert_eq!(attr(&group, 0, "x"), 100.0);
        assert_eq!(attr(&group, 0, "width"), 50.0);
        assert_eq!(attr(&group, 1, "x"), 50.0);
        assert_eq!(attr(&group, 1, "width"), 50.0);
    }

    #[test]
    fn test_color_function() {
        let series = Series::new(vec![(1, "foo"), (2, "bar")]);
        let linear = Scale::linear(0.0, 10.0).unwrap();
        let shape = Bars::new().fill(ColorSource::func(|x, y, _, i| format!("{y}-{x}-{i}")));

        let group = shape
            .to_svg(200.0, 100.0, &linear, &ordinal(), &series, &mut std::iter::empty::<String>())
            .unwrap();

        assert_eq!(
            group.elements()[0].attribute("fill").as_deref(),
            Some(r#""bar"-2-1"#)
        );
    }

    #[test]
    fn test_palette_used_when_unset() {
        let series = Series::new(vec![(1, "foo"), (2, "bar")]);
        let linear = Scale::linear(0.0, 10.0).unwrap();
        let mut colors = palette();

        let group = Bars::new()
            .to_svg(200.0, 100.0, &linear, &ordinal(), &series, &mut colors)
            .unwrap();

        for element in &group {
            assert_eq!(element.attribute("fill").as_deref(), Some("red"));
        }
        assert!(matches!(
            Bars::new().to_svg(200.0, 100.0, &linear, &ordinal(), &series, &mut std::iter::empty::<String>()),
            Err(Error::PaletteExhausted)
        ));
    }

    #[test]
    fn test_validate() {
        let shape = Bars::new().fill("red");
        let series = Series::new(vec![vec![Value::from(1), Value::from("foo")]]);
        assert!(shape.validate_series(&series).is_ok());

        let series = Series::new(vec![vec![Value::from("foo"), Value::from(1)]]);
        assert!(matches!(
            shape.validate_series(&series),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_category_series() {
        let series = Series::categorized(vec![(1, "foo", "a")], None, None, None);
        assert!(Bars::new().validate_series(&series).is_err());
    }

    #[test]
    fn test_linear_y_has_no_bands() {
        let series = Series::new(vec![(1, 1)]);
        let linear = Scale::linear(0.0, 10.0).unwrap();
        let result = Bars::new().to_svg(200.0, 100.0, &linear, &linear, &series, &mut palette());
        assert!(matches!(result, Err(Error::UnsupportedForScale { .. })));
    }
}
