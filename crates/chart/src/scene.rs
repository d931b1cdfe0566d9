use crate::geometry::{format_tick, nice_ticks, Bounds, Projection, Series};
use iced::{Point, Rectangle, Size};
use scope_core::SampleBuffer;

/// Space reserved around the plot area for tick labels.
const MARGIN_LEFT:   f32 = 56.0;
const MARGIN_RIGHT:  f32 = 16.0;
const MARGIN_TOP:    f32 = 16.0;
const MARGIN_BOTTOM: f32 = 32.0;

const X_TICKS: usize = 8;
const Y_TICKS: usize = 6;

/// An axis tick: screen coordinate along its axis plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f32,
    pub label:    String,
}

/// Everything one frame of the chart draws, in screen coordinates.
///
/// Built from scratch each time; two scenes composed from the same buffer
/// and size are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// The plot rectangle inside the label margins.
    pub area:    Rectangle,
    /// One point per sample, oldest first; drawn as a polyline with a
    /// circular marker at each vertex.
    pub points:  Vec<Point>,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
}

impl Scene {
    pub fn compose(buffer: &SampleBuffer, size: Size) -> Self {
        let area = Rectangle {
            x:      MARGIN_LEFT,
            y:      MARGIN_TOP,
            width:  (size.width - MARGIN_LEFT - MARGIN_RIGHT).max(0.0),
            height: (size.height - MARGIN_TOP - MARGIN_BOTTOM).max(0.0),
        };

        let series = Series::from_buffer(buffer);
        let bounds = Bounds::fit(&series);
        let projection = Projection::new(bounds, area);

        let points = series.points.iter().map(|&p| projection.point(p)).collect();

        // Sample indices are whole numbers; never tick between them.
        let (xs, x_step) = nice_ticks(bounds.x_min, bounds.x_max, X_TICKS);
        let x_step = x_step.max(1.0);
        let x_ticks = xs
            .into_iter()
            .filter(|x| x.fract() == 0.0 && *x >= 0.0)
            .map(|x| Tick {
                position: projection.x(x),
                label:    format_tick(x, x_step),
            })
            .collect();

        let (ys, y_step) = nice_ticks(bounds.y_min, bounds.y_max, Y_TICKS);
        let y_ticks = ys
            .into_iter()
            .map(|y| Tick {
                position: projection.y(y),
                label:    format_tick(y, y_step),
            })
            .collect();

        Self {
            area,
            points,
            x_ticks,
            y_ticks,
        }
    }
}
