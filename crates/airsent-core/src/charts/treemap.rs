//! Treemap trace. plotly-rs has no treemap, so this fills the gap behind its
//! [`Trace`] trait and serializes to the plotly.js `treemap` schema.

use plotly::common::ColorScale;
use plotly::Trace;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Treemap {
    r#type: &'static str,
    labels: Vec<String>,
    parents: Vec<String>,
    values: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    marker: Option<TreemapMarker>,
    #[serde(rename = "hovertemplate", skip_serializing_if = "Option::is_none")]
    hover_template: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct TreemapMarker {
    colors: Vec<usize>,
    #[serde(rename = "colorscale")]
    color_scale: ColorScale,
    #[serde(rename = "showscale")]
    show_scale: bool,
}

impl Treemap {
    /// A single-level treemap: every tile hangs off the root.
    pub fn flat(labels: Vec<String>, values: Vec<usize>) -> Box<Self> {
        Box::new(Self {
            r#type: "treemap",
            parents: vec![String::new(); labels.len()],
            labels,
            values,
            marker: None,
            hover_template: None,
        })
    }

    /// Color tiles by their value on `color_scale`, with a color bar.
    pub fn scaled_colors(mut self: Box<Self>, color_scale: ColorScale) -> Box<Self> {
        self.marker = Some(TreemapMarker {
            colors: self.values.clone(),
            color_scale,
            show_scale: true,
        });
        self
    }

    pub fn hover_template(mut self: Box<Self>, template: &str) -> Box<Self> {
        self.hover_template = Some(template.to_string());
        self
    }
}

impl Trace for Treemap {
    fn to_json(&self) -> String {
        serde_json::to_string(self).expect("treemap serializes to JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotly::common::ColorScalePalette;
    use plotly::Plot;

    #[test]
    fn flat_treemap_json() {
        let mut plot = Plot::new();
        plot.add_trace(
            Treemap::flat(vec!["host".into(), "clean".into()], vec![3, 1])
                .scaled_colors(ColorScale::Palette(ColorScalePalette::RdBu))
                .hover_template("%{label}"),
        );
        let json: serde_json::Value = serde_json::from_str(&plot.to_json()).unwrap();
        let trace = &json["data"][0];

        assert_eq!(trace["type"], "treemap");
        assert_eq!(trace["labels"], serde_json::json!(["host", "clean"]));
        assert_eq!(trace["parents"], serde_json::json!(["", ""]));
        assert_eq!(trace["values"], serde_json::json!([3, 1]));
        assert_eq!(trace["marker"]["colors"], serde_json::json!([3, 1]));
        assert_eq!(trace["marker"]["colorscale"], "RdBu");
        assert_eq!(trace["marker"]["showscale"], true);
        assert_eq!(trace["hovertemplate"], "%{label}");
    }
}
