use crate::plotter::Plotter;
use crate::scene::Scene;
use crate::style::ChartStyle;
use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::{Pixels, Point, Rectangle, Renderer, Size, Theme};

const TICK_LEN: f32 = 4.0;

/// Canvas program painting a [`Plotter`]'s buffer.
pub(crate) struct ChartView<'a> {
    plotter: &'a Plotter,
    cache:   &'a canvas::Cache,
    style:   &'a ChartStyle,
}

impl<'a> ChartView<'a> {
    pub(crate) fn new(plotter: &'a Plotter, cache: &'a canvas::Cache, style: &'a ChartStyle) -> Self {
        Self { plotter, cache, style }
    }
}

impl<Message> canvas::Program<Message> for ChartView<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let chart = self.cache.draw(renderer, bounds.size(), |frame| {
            let scene = self.plotter.scene(frame.size());
            paint(frame, &scene, self.style);
        });
        vec![chart]
    }
}

fn paint(frame: &mut Frame, scene: &Scene, style: &ChartStyle) {
    frame.fill_rectangle(Point::ORIGIN, frame.size(), style.background.to_iced());

    let axis = style.axis.to_iced();
    let axis_stroke = Stroke::default().with_width(1.0).with_color(axis);
    let area = scene.area;
    let bottom = area.y + area.height;

    // ── Axes ────────────────────────────────────────────────────────────────
    frame.stroke(
        &Path::rectangle(Point::new(area.x, area.y), Size::new(area.width, area.height)),
        axis_stroke,
    );

    let glyph = style.label_size * 0.6;
    for tick in &scene.x_ticks {
        frame.stroke(
            &Path::line(
                Point::new(tick.position, bottom),
                Point::new(tick.position, bottom + TICK_LEN),
            ),
            axis_stroke,
        );
        let half_width = tick.label.len() as f32 * glyph / 2.0;
        frame.fill_text(Text {
            content:  tick.label.clone(),
            position: Point::new(tick.position - half_width, bottom + TICK_LEN + 2.0),
            color:    axis,
            size:     Pixels(style.label_size),
            ..Text::default()
        });
    }
    for tick in &scene.y_ticks {
        frame.stroke(
            &Path::line(
                Point::new(area.x - TICK_LEN, tick.position),
                Point::new(area.x, tick.position),
            ),
            axis_stroke,
        );
        let width = tick.label.len() as f32 * glyph;
        frame.fill_text(Text {
            content:  tick.label.clone(),
            position: Point::new(area.x - TICK_LEN - 4.0 - width, tick.position - style.label_size / 2.0),
            color:    axis,
            size:     Pixels(style.label_size),
            ..Text::default()
        });
    }

    // ── Series ──────────────────────────────────────────────────────────────
    let line = style.line.to_iced();
    if let Some((first, rest)) = scene.points.split_first() {
        let polyline = Path::new(|builder| {
            builder.move_to(*first);
            for point in rest {
                builder.line_to(*point);
            }
        });
        frame.stroke(&polyline, Stroke::default().with_width(style.line_width).with_color(line));
    }

    if style.marker_radius > 0.0 {
        for point in &scene.points {
            frame.fill(&Path::circle(*point, style.marker_radius), line);
        }
    }
}
