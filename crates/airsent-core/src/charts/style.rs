//! Look shared by every dashboard chart.

use plotly::common::{Font, Label, Title};
use plotly::layout::{Axis, Margin};
use plotly::Layout;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub font_family: String,
    pub font_size: usize,
    pub font_color: String,
    pub hover_font_family: String,
    pub background: String,
    pub line_color: String,
    pub top_margin: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 14,
            font_color: "black".to_string(),
            hover_font_family: "Rockwell".to_string(),
            background: "#f7f7f7".to_string(),
            line_color: "black".to_string(),
            top_margin: 30,
        }
    }
}

impl ChartStyle {
    /// Fonts, backgrounds and margins, without axes.
    pub fn layout(&self) -> Layout {
        Layout::new()
            .font(
                Font::new()
                    .family(self.font_family.as_str())
                    .size(self.font_size)
                    .color(self.font_color.clone()),
            )
            .hover_label(
                Label::new().font(
                    Font::new()
                        .family(self.hover_font_family.as_str())
                        .size(self.font_size),
                ),
            )
            .plot_background_color(self.background.clone())
            .paper_background_color(self.background.clone())
            .margin(self.margin(self.top_margin))
    }

    /// Base layout plus titled axes: no gridlines, x axis line drawn.
    pub fn cartesian(&self, x_title: &str, y_title: &str) -> Layout {
        self.layout()
            .x_axis(self.axis(x_title, true))
            .y_axis(self.axis(y_title, false))
    }

    /// Edge-to-edge margin with room for a title on top.
    pub fn margin(&self, top: usize) -> Margin {
        Margin::new().left(0).right(0).top(top).bottom(0)
    }

    fn axis(&self, title: &str, show_line: bool) -> Axis {
        Axis::new()
            .title(Title::from(format!("<b>{title}</b>").as_str()))
            .show_grid(false)
            .show_line(show_line)
            .zero_line(false)
            .line_color(self.line_color.clone())
    }
}
