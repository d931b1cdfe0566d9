use crate::colors::Color;
use scope_config::ChartConfig;

/// Chart style resolved from [`ChartConfig`].
///
/// Building one is infallible: colour strings that do not parse fall back
/// to the stock blue-on-white look.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub line:          Color,
    pub background:    Color,
    pub axis:          Color,
    pub line_width:    f32,
    pub marker_radius: f32,
    pub label_size:    f32,
}

impl ChartStyle {
    pub fn from_config(cfg: &ChartConfig) -> Self {
        Self {
            line:          Color::from_hex(&cfg.line_color).unwrap_or(Color::BLUE),
            background:    Color::from_hex(&cfg.background).unwrap_or(Color::WHITE),
            axis:          Color::from_hex(&cfg.axis_color).unwrap_or(Color::GREY),
            line_width:    cfg.line_width.max(0.5),
            marker_radius: cfg.marker_radius.max(0.0),
            label_size:    cfg.label_size.max(6.0),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}
