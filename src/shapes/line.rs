use std::fmt::Write as FmtWrite;

use super::{check_series, required, ColorSource, Fill, Palette};
use crate::error::Result;
use crate::output::{Group, SvgElement};
use crate::scale::Scale;
use crate::series::{Axis, Series};

/// Connected line through consecutive data.
///
/// A missing value ends the current path; the next present datum starts a
/// new one, so each unbroken run of data becomes its own `path`.
#[derive(Debug, Clone)]
pub struct Line<R> {
    stroke: Option<ColorSource<R>>,
}

impl<R> Default for Line<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Path data and color of the run being built.
struct Run {
    d: String,
    stroke: String,
}

impl Run {
    fn into_element(self) -> SvgElement {
        SvgElement::Path {
            d: self.d,
            stroke: self.stroke,
        }
    }
}

impl<R> Line<R> {
    /// Create a line colored from the palette.
    #[must_use]
    pub fn new() -> Self {
        Self { stroke: None }
    }

    /// Set the stroke color or color function.
    ///
    /// A color function is called once per path, with the first datum of
    /// the path.
    #[must_use]
    pub fn stroke(mut self, color: impl Into<ColorSource<R>>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    /// Reject category series and categorical y values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](crate::Error::Validation) if the series
    /// cannot be drawn as a line.
    pub fn validate_series(&self, series: &Series<R>) -> Result<()> {
        check_series("line", series, &[Axis::Y])
    }

    /// Render one `path` per unbroken run of data.
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

        let stroke = Fill::resolve(&self.stroke, palette)?;
        let mut group = Group::new("series lines");
        let mut run: Option<Run> = None;
        let mut points = 0_usize;

        for datum in series.data(false) {
            let Some((x, y)) = required(&datum) else {
                if let Some(done) = run.take() {
                    group.push(done.into_element());
                }
                continue;
            };

            let proj_x = x_scale.project(x, 0.0, width)?;
            let proj_y = y_scale.project(y, height, 0.0)?;
            points += 1;

            match run.as_mut() {
                Some(current) => {
                    let _ = write!(current.d, " L {proj_x} {proj_y}");
                }
                None => {
                    run = Some(Run {
                        d: format!("M {proj_x} {proj_y}"),
                        stroke: stroke.color(x, y, datum.row, datum.index),
                    });
                }
            }
        }

        if let Some(done) = run {
            group.push(done.into_element());
        }

        tracing::debug!(
            paths = group.len(),
            points,
            skipped = series.len() - points,
            "rendered line"
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

    #[test]
    fn test_linear() {
        let series = Series::new(vec![(0, 0), (5, 5), (10, 10)]);
        let linear = Scale::linear(0.0, 10.0).unwrap();

        let group = Line::new()
            .stroke("red")
            .to_svg(200.0, 100.0, &linear, &linear, &series, &mut palette())
            .unwrap();

        assert_eq!(group.len(), 1);
        assert_eq!(group.class(), "series lines");
        assert_eq!(
            group.elements()[0],
            SvgElement::Path {
                d: "M 0 100 L 100 50 L 200 0".to_string(),
                stroke: "red".to_string(),
            }
        );
    }

    #[test]
    fn test_ordinal() {
        let series = Series::new(vec![("foo", 0), ("bar", 5), ("bing", 10)]);
        let linear = Scale::linear(0.0, 10.0).unwrap();
        let ordinal = Scale::ordinal(["foo", "bar", "bing"]);

        let group = Line::new()
            .stroke("red")
            .to_svg(300.0, 100.0, &ordinal, &linear, &series, &mut palette())
            .unwrap();

        assert_eq!(group.len(), 1);
        assert_eq!(
            group.elements()[0].attribute("d").as_deref(),
            Some("M 50 100 L 150 50 L 250 0")
        );
    }

    #[test]
    fn test_nulls() {
        let series = Series::new(vec![(Some(0), Some(0)), (None, None), (Some(10), Some(10))]);
        let linear = Scale::linear(0.0, 10.0).unwrap();

        let group = Line::new()
            .stroke("red")
            .to_svg(200.0, 100.0, &linear, &linear, &series, &mut palette())
            .unwrap();

        assert_eq!(group.len(), 2);
        assert_eq!(group.elements()[0].attribute("d").as_deref(), Some("M 0 100"));
        assert_eq!(group.elements()[1].attribute("d").as_deref(), Some("M 200 0"));
    }

    #[test]
    fn test_leading_and_trailing_nulls() {
        let series = Series::new(vec![
            (None, None),
            (Some(1), Some(1)),
            (Some(2), Some(2)),
            (None, None),
            (None, None),
        ]);
        let linear = Scale::linear(0.0, 10.0).unwrap();

        let group = Line::new()
            .to_svg(200.0, 100.0, &linear, &linear, &series, &mut palette())
            .unwrap();
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_all_missing_renders_nothing() {
        let series = Series::new(vec![(None::<f64>, None::<f64>)]);
        let linear = Scale::linear(0.0, 10.0).unwrap();

        let group = Line::new()
            .to_svg(200.0, 100.0, &linear, &linear, &series, &mut palette())
            .unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn test_color_function_once_per_path() {
        let series = Series::new(vec![
            (Some(0), Some(1)),
            (Some(1), Some(2)),
            (None, None),
            (Some(3), Some(4)),
        ]);
        let linear = Scale::linear(0.0, 10.0).unwrap();

        let group = Line::new()
            .stroke(ColorSource::func(|_, _, _, i| format!("c{i}")))
            .to_svg(200.0, 100.0, &linear, &linear, &series, &mut palette())
            .unwrap();

        let strokes: Vec<String> = group
            .iter()
            .filter_map(|e| e.attribute("stroke"))
            .collect();
        assert_eq!(strokes, vec!["c0", "c3"]);
    }

    #[test]
    fn test_palette_color() {
        let series = Series::new(vec![(1, 1), (2, 2)]);
        let linear = Scale::linear(0.0, 10.0).unwrap();
        let mut colors = palette();
        colors.next();

        let group = Line::new()
            .to_svg(200.0, 100.0, &linear, &linear, &series, &mut colors)
            .unwrap();
        assert_eq!(group.elements()[0].attribute("stroke").as_deref(), Some("white"));
    }

    #[test]
    fn test_validate() {
        let shape = Line::new().stroke("red");
        let series = Series::new(vec![vec![Value::from(1), Value::from(1)]]);
        assert!(shape.validate_series(&series).is_ok());

        let series = Series::new(vec![vec![Value::from(1), Value::from("foo")]]);
        assert!(matches!(
            shape.validate_series(&series),
            Err(Error::Validation(_))
        ));
    }
}
