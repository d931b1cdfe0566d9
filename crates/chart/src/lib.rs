//! Live line chart of the sample buffer.
//!
//! The chart is a pure function of the buffer and the style: every new
//! sample clears the canvas cache and the next frame re-plots the whole
//! buffer, oldest sample on the left.

pub mod colors;
pub mod geometry;
pub mod plotter;
pub mod scene;
pub mod style;
mod view;

pub use colors::Color;
pub use geometry::{nice_ticks, Bounds, Projection, Series};
pub use plotter::Plotter;
pub use scene::{Scene, Tick};
pub use style::ChartStyle;
