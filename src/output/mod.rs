//! Drawable primitives produced by shapes.
//!
//! Elements render to SVG fragment text. Wrapping fragments in a root
//! `<svg>` document is left to the caller.

mod svg;

pub use svg::{Group, SvgElement};
