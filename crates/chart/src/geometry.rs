//! Data-space to screen-space mapping and axis ticks.

use iced::{Point, Rectangle};
use scope_core::SampleBuffer;

/// Buffer contents as `(x, y)` points in plotting order.
///
/// `x` is the sample's chronological position, so the oldest sample sits at
/// `x = 0` and the newest at `x = len - 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn from_buffer(buffer: &SampleBuffer) -> Self {
        let points = buffer
            .chronological()
            .enumerate()
            .map(|(i, v)| (i as f64, v))
            .collect();
        Self { points }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, y)| y)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Axis ranges in data space.  Always non-degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Fraction of the data range added on each side.
    pub const MARGIN: f64 = 0.05;

    /// Fit `series` with a small margin on every side.
    ///
    /// A single point, or a flat run of equal values, gets a unit range
    /// centred on the data.
    pub fn fit(series: &Series) -> Self {
        if series.is_empty() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }

        let last_x = (series.points.len() - 1) as f64;
        let (x_min, x_max) = widen(0.0, last_x);

        let mut values = series.values();
        let first = values.next().unwrap_or_default();
        let (lo, hi) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        let (y_min, y_max) = widen(lo, hi);

        Self { x_min, x_max, y_min, y_max }
    }

}

// Spans are taken on halved operands: `hi - lo` overflows to infinity for
// values near `f64::MAX` of opposite sign.
fn half_span(lo: f64, hi: f64) -> f64 {
    hi * 0.5 - lo * 0.5
}

fn widen(lo: f64, hi: f64) -> (f64, f64) {
    let half = half_span(lo, hi);
    if half <= 0.5 * f64::EPSILON * hi.abs().max(1.0) {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = half * 2.0 * Bounds::MARGIN;
    ((lo - pad).max(f64::MIN), (hi + pad).min(f64::MAX))
}

/// Position of `v` within `[min, max]` as a fraction.
fn unit(v: f64, min: f64, max: f64) -> f64 {
    half_span(min, v) / half_span(min, max)
}

/// Maps data-space coordinates into a screen rectangle (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub bounds: Bounds,
    pub area:   Rectangle,
}

impl Projection {
    pub fn new(bounds: Bounds, area: Rectangle) -> Self {
        Self { bounds, area }
    }

    pub fn x(&self, x: f64) -> f32 {
        let t = unit(x, self.bounds.x_min, self.bounds.x_max);
        self.area.x + (t as f32) * self.area.width
    }

    pub fn y(&self, y: f64) -> f32 {
        let t = unit(y, self.bounds.y_min, self.bounds.y_max);
        self.area.y + self.area.height - (t as f32) * self.area.height
    }

    pub fn point(&self, (x, y): (f64, f64)) -> Point {
        Point::new(self.x(x), self.y(y))
    }
}

/// Tick positions covering `[min, max]` with a 1/2/5 × 10ⁿ step, aiming for
/// about `target` ticks.  Returns `(ticks, step)`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    if target == 0 {
        return (Vec::new(), 0.0);
    }
    let raw = half_span(min, max) / target as f64 * 2.0;
    if !raw.is_finite() || raw <= 0.0 {
        return (Vec::new(), 0.0);
    }

    let step = nice_step(raw);
    let first = (min / step).ceil();
    let last = (max / step).floor();

    let ticks = (first as i64..=last as i64)
        .map(|k| {
            let v = k as f64 * step;
            // Snap to zero so labels never read "-0".
            if v.abs() < step * 1e-9 {
                0.0
            } else {
                v
            }
        })
        .collect();
    (ticks, step)
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Format a tick value with just enough decimals for `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Point, Size};

    fn series(values: &[f64]) -> Series {
        let mut buffer = SampleBuffer::default();
        for &v in values {
            buffer.push(v);
        }
        Series::from_buffer(&buffer)
    }

    #[test]
    fn series_is_chronological() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert_eq!(s.points, vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
    }

    #[test]
    fn flat_series_gets_unit_range() {
        let b = Bounds::fit(&series(&[4.0, 4.0, 4.0]));
        assert_eq!((b.y_min, b.y_max), (3.5, 4.5));
    }

    #[test]
    fn single_point_is_centred() {
        let b = Bounds::fit(&series(&[2.0]));
        assert_eq!((b.x_min, b.x_max), (-0.5, 0.5));
        assert_eq!((b.y_min, b.y_max), (1.5, 2.5));
    }

    #[test]
    fn bounds_add_margin() {
        let b = Bounds::fit(&series(&[0.0, 10.0]));
        assert!((b.y_min + 0.5).abs() < 1e-12);
        assert!((b.y_max - 10.5).abs() < 1e-12);
    }

    #[test]
    fn projection_corners() {
        let bounds = Bounds { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 1.0 };
        let area = Rectangle::new(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        let p = Projection::new(bounds, area);

        assert_eq!(p.point((0.0, 0.0)), Point::new(10.0, 70.0));
        assert_eq!(p.point((10.0, 1.0)), Point::new(110.0, 20.0));
        assert_eq!(p.point((5.0, 0.5)), Point::new(60.0, 45.0));
    }

    #[test]
    fn ticks_use_nice_steps() {
        let (ticks, step) = nice_ticks(0.0, 10.0, 5);
        assert_eq!(step, 2.0);
        assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let (ticks, step) = nice_ticks(-0.33, 0.33, 4);
        assert!((step - 0.2).abs() < 1e-12);
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[1], 0.0);
    }

    #[test]
    fn extreme_values_stay_finite() {
        let b = Bounds::fit(&series(&[1e308, -1e308]));
        assert!(b.y_min.is_finite() && b.y_max.is_finite());
        assert!(b.y_min < -1e308 && b.y_max > 1e308);

        let area = Rectangle::new(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        let p = Projection::new(b, area);
        let top = p.y(1e308);
        let bottom = p.y(-1e308);
        assert!(top.is_finite() && bottom.is_finite());
        assert!(top < bottom);

        let (ticks, step) = nice_ticks(b.y_min, b.y_max, 5);
        assert!(step.is_finite() && step > 0.0);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| t.is_finite()));
    }

    #[test]
    fn degenerate_range_has_no_ticks() {
        assert!(nice_ticks(1.0, 1.0, 5).0.is_empty());
        assert!(nice_ticks(0.0, f64::NAN, 5).0.is_empty());
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(4.0, 2.0), "4");
        assert_eq!(format_tick(0.2, 0.2), "0.2");
        assert_eq!(format_tick(0.05, 0.05), "0.05");
    }
}
