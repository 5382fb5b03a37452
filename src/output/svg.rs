//! SVG primitives.
//!
//! Coordinates are unitless pixels. Colors are stored as CSS text so any
//! value the caller's color source produces passes through unchanged.

use std::fmt::Write as FmtWrite;

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: String,
    },
    /// Circle
    Circle { cx: f64, cy: f64, r: f64, fill: String },
    /// Unfilled path (SVG path data)
    Path { d: String, stroke: String },
}

impl SvgElement {
    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            SvgElement::Rect { .. } => "rect",
            SvgElement::Circle { .. } => "circle",
            SvgElement::Path { .. } => "path",
        }
    }

    /// Attribute names and values, in output order.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            SvgElement::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => vec![
                ("x", x.to_string()),
                ("y", y.to_string()),
                ("width", width.to_string()),
                ("height", height.to_string()),
                ("fill", fill.clone()),
            ],
            SvgElement::Circle { cx, cy, r, fill } => vec![
                ("cx", cx.to_string()),
                ("cy", cy.to_string()),
                ("r", r.to_string()),
                ("fill", fill.clone()),
            ],
            SvgElement::Path { d, stroke } => vec![
                ("d", d.clone()),
                ("fill", "none".to_string()),
                ("stroke", stroke.clone()),
            ],
        }
    }

    /// Value of one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    /// Render as a self-closing SVG tag.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(96);
        out.push('<');
        out.push_str(self.tag());
        for (name, value) in self.attributes() {
            let _ = write!(out, r#" {name}="{}""#, escape_attribute(&value));
        }
        out.push_str("/>");
        out
    }
}

/// Escape XML special characters in an attribute value.
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// A `<g>` element holding the primitives of one rendered series.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    class: String,
    elements: Vec<SvgElement>,
}

impl Group {
    /// Create an empty group with a class attribute.
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            elements: Vec::new(),
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Class attribute.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Elements in drawing order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate elements in drawing order.
    pub fn iter(&self) -> std::slice::Iter<'_, SvgElement> {
        self.elements.iter()
    }

    /// Render the group and its children, one element per line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(64 + self.elements.len() * 96);
        let _ = writeln!(svg, r#"<g class="{}">"#, escape_attribute(&self.class));
        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element.render());
        }
        svg.push_str("</g>\n");
        svg
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a SvgElement;
    type IntoIter = std::slice::Iter<'a, SvgElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for Group {
    type Item = SvgElement;
    type IntoIter = std::vec::IntoIter<SvgElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
