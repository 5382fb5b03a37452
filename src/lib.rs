//! # Quillplot
//!
//! Declarative charting core: map tabular data through scales into SVG
//! primitives.
//!
//! ## Features
//!
//! - **Scales**: linear (generic over exact numeric types), ordinal, and
//!   calendar-aware temporal
//! - **Series**: uniform access to sequence rows, map rows, or any row type
//!   through accessor functions, with per-axis type inference
//! - **Shapes**: bars, columns, dots and lines rendered to `rect`, `circle`
//!   and `path` elements
//!
//! ## Quick Start
//!
//! ```rust
//! use quillplot::prelude::*;
//!
//! let series = Series::new(vec![("foo", 3.0), ("bar", 7.5), ("bing", 10.0)]);
//! let x = Scale::ordinal(["foo", "bar", "bing"]);
//! let y = Scale::linear(0.0, 10.0)?;
//!
//! let columns = Columns::new().fill(Rgba::BLUE);
//! let group = columns.to_svg(300.0, 200.0, &x, &y, &series, &mut std::iter::empty::<String>())?;
//!
//! assert_eq!(group.len(), 3);
//! println!("{}", group.render());
//! # Ok::<(), quillplot::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for values, colors and primitives

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Modules
// ============================================================================

/// Cell values and data type classification.
pub mod value;

/// Row data wrapped for charting.
pub mod series;

// ============================================================================
// Mapping Modules
// ============================================================================

/// Scale functions for data-to-pixel mappings.
pub mod scale;

/// Color types.
pub mod color;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Chart shapes.
pub mod shapes;

/// SVG primitives.
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for quillplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use quillplot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::error::{Error, Result};
    pub use crate::output::{Group, SvgElement};
    pub use crate::scale::{Linear, Ordinal, Scale, Temporal};
    pub use crate::series::{Axis, Datum, Key, Row, Series, SeriesKind};
    pub use crate::shapes::{Bars, ColorSource, Columns, Dots, Line, Palette, Shape};
    pub use crate::value::{Cell, DataType, Value};
}
