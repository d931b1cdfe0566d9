use crate::scene::Scene;
use crate::style::ChartStyle;
use crate::view::ChartView;
use iced::widget::canvas::{self, Canvas};
use iced::{Element, Length, Size};
use scope_core::{SampleBuffer, TrimPolicy};

/// Owns the sample buffer and keeps the chart in step with it.
pub struct Plotter {
    buffer:  SampleBuffer,
    cache:   canvas::Cache,
    redraws: u64,
}

impl Plotter {
    pub fn new(policy: TrimPolicy) -> Self {
        Self {
            buffer:  SampleBuffer::new(policy),
            cache:   canvas::Cache::new(),
            redraws: 0,
        }
    }

    /// Prepend `value`, trim the buffer, and invalidate the chart so the
    /// next frame re-plots everything.
    pub fn append_and_redraw(&mut self, value: f64) {
        self.buffer.push(value);
        self.redraw();
    }

    /// Throw away the rendered chart.  The buffer is untouched, so the next
    /// frame draws exactly what the last one did.
    pub fn redraw(&mut self) {
        self.cache.clear();
        self.redraws += 1;
    }

    /// Swap trim policies (config reload); trims and redraws immediately.
    pub fn set_policy(&mut self, policy: TrimPolicy) {
        if self.buffer.policy() != policy {
            self.buffer.set_policy(policy);
            self.redraw();
        }
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Number of times the chart has been invalidated.
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// What a frame of `size` would show right now.
    pub fn scene(&self, size: Size) -> Scene {
        Scene::compose(&self.buffer, size)
    }

    /// The chart as a full-size canvas element.
    pub fn view<'a, Message: 'a>(&'a self, style: &'a ChartStyle) -> Element<'a, Message> {
        Canvas::new(ChartView::new(self, &self.cache, style))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

impl std::fmt::Debug for Plotter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plotter")
            .field("buffer", &self.buffer)
            .field("redraws", &self.redraws)
            .finish_non_exhaustive()
    }
}
