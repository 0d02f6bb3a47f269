//! SVG line-chart generation for aligned time series.
//!
//! Hand-rolled SVG, same approach as the rest of the tooling around this
//! project: two polylines over a shared time axis, a legend, and an optional
//! statistics annotation box. No plotting dependency to carry.

use crate::aggregator::AlignedSeries;
use crate::utils::error::ChartError;
use log::info;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 70.0;
const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 8;

/// Chart appearance configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub width: usize,
    pub height: usize,
    pub y_label: String,
    pub submission_label: String,
    pub confirmation_label: String,
    pub submission_color: String,
    pub confirmation_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::tps()
    }
}

impl ChartConfig {
    /// Preset for throughput charts
    pub fn tps() -> Self {
        Self {
            title: "TPS Over Time".to_string(),
            subtitle: None,
            width: 1200,
            height: 600,
            y_label: "Transactions Per Second (TPS)".to_string(),
            submission_label: "Submission TPS".to_string(),
            confirmation_label: "Confirmation TPS".to_string(),
            submission_color: "#2196F3".to_string(),
            confirmation_color: "#4CAF50".to_string(),
        }
    }

    /// Preset for latency charts
    pub fn latency() -> Self {
        Self {
            title: "Transaction Latency Over Time".to_string(),
            subtitle: None,
            width: 1200,
            height: 600,
            y_label: "Latency (milliseconds)".to_string(),
            submission_label: "Submission Latency".to_string(),
            confirmation_label: "Confirmation Latency".to_string(),
            submission_color: "#FF9800".to_string(),
            confirmation_color: "#9C27B0".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Render an aligned series as an SVG line chart
///
/// **Public** - main entry point for chart generation
///
/// # Arguments
/// * `series` - aligned timeline plus two value arrays
/// * `annotations` - statistics lines drawn in the corner box (may be empty)
/// * `config` - chart appearance
///
/// # Returns
/// Complete SVG document as a string
///
/// # Errors
/// * `ChartError::EmptySeries` - nothing to plot; callers report and move on
pub fn render_line_chart(
    series: &AlignedSeries,
    annotations: &[String],
    config: &ChartConfig,
) -> Result<String, ChartError> {
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    info!("Rendering \"{}\" with {} windows", config.title, series.len());

    let width = config.width as f64;
    let height = config.height as f64;
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;

    // Value scale: pad the top 5% so the peak marker stays inside the frame
    let peak = series
        .submission
        .iter()
        .chain(series.confirmation.iter())
        .copied()
        .fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };

    let x_at = |index: usize| -> f64 {
        if series.len() == 1 {
            MARGIN_LEFT + plot_w / 2.0
        } else {
            MARGIN_LEFT + plot_w * index as f64 / (series.len() - 1) as f64
        }
    };
    let y_at = |value: f64| -> f64 { MARGIN_TOP + plot_h - (value / y_max) * plot_h };

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    svg.push_str(r#"<style>text { font-family: sans-serif; }</style>"#);
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));

    // Title (and batch subtitle when present)
    svg.push_str(&format!(
        r#"<text x="{}" y="25" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2.0,
        xml_escape(&config.title)
    ));
    if let Some(subtitle) = &config.subtitle {
        svg.push_str(&format!(
            r##"<text x="{}" y="45" font-size="13" text-anchor="middle" fill="#555">{}</text>"##,
            width / 2.0,
            xml_escape(subtitle)
        ));
    }

    // Horizontal gridlines and y-axis tick labels
    for tick in 0..=Y_TICKS {
        let value = y_max * tick as f64 / Y_TICKS as f64;
        let y = y_at(value);
        svg.push_str(&format!(
            r##"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="#ccc" stroke-dasharray="4 3"/>"##,
            MARGIN_LEFT,
            MARGIN_LEFT + plot_w,
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="11" text-anchor="end">{:.2}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            value
        ));
    }

    // Time labels along the x-axis, thinned to stay readable
    let label_step = (series.len() + MAX_X_LABELS - 1) / MAX_X_LABELS;
    for (index, ts) in series.timeline.iter().enumerate() {
        if index % label_step.max(1) != 0 {
            continue;
        }
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="11" text-anchor="middle">{}</text>"#,
            x_at(index),
            MARGIN_TOP + plot_h + 20.0,
            ts.format("%H:%M:%S")
        ));
    }

    // Axes
    svg.push_str(&format!(
        r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = MARGIN_TOP + plot_h
    ));
    svg.push_str(&format!(
        r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
        l = MARGIN_LEFT,
        r = MARGIN_LEFT + plot_w,
        b = MARGIN_TOP + plot_h
    ));

    // Axis labels
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" font-size="12" text-anchor="middle" font-weight="bold">Time</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        height - 15.0
    ));
    svg.push_str(&format!(
        r#"<text x="20" y="{}" font-size="12" text-anchor="middle" font-weight="bold" transform="rotate(-90 20 {})">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        xml_escape(&config.y_label)
    ));

    // The two series
    draw_series(&mut svg, &series.submission, &config.submission_color, &x_at, &y_at);
    draw_series(&mut svg, &series.confirmation, &config.confirmation_color, &x_at, &y_at);

    // Legend, top-right of the plot area
    let legend_x = MARGIN_LEFT + plot_w - 180.0;
    for (slot, (label, color)) in [
        (&config.submission_label, &config.submission_color),
        (&config.confirmation_label, &config.confirmation_color),
    ]
    .into_iter()
    .enumerate()
    {
        let y = MARGIN_TOP + 12.0 + slot as f64 * 18.0;
        svg.push_str(&format!(
            r#"<line x1="{legend_x}" y1="{y}" x2="{}" y2="{y}" stroke="{color}" stroke-width="2"/>"#,
            legend_x + 24.0
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
            legend_x + 30.0,
            y + 4.0,
            xml_escape(label)
        ));
    }

    // Statistics annotation box, top-left of the plot area
    if !annotations.is_empty() {
        let box_h = 10.0 + annotations.len() as f64 * 16.0;
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="420" height="{box_h}" fill="wheat" opacity="0.8" rx="4"/>"#,
            MARGIN_LEFT + 6.0,
            MARGIN_TOP + 4.0
        ));
        for (slot, line) in annotations.iter().enumerate() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-size="11">{}</text>"#,
                MARGIN_LEFT + 14.0,
                MARGIN_TOP + 20.0 + slot as f64 * 16.0,
                xml_escape(line)
            ));
        }
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Draw one polyline with point markers
fn draw_series(
    svg: &mut String,
    values: &[f64],
    color: &str,
    x_at: &dyn Fn(usize) -> f64,
    y_at: &dyn Fn(f64) -> f64,
) {
    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(index, value)| format!("{:.1},{:.1}", x_at(index), y_at(*value)))
        .collect();

    svg.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
        points.join(" ")
    ));

    for (index, value) in values.iter().enumerate() {
        svg.push_str(&format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{color}"/>"#,
            x_at(index),
            y_at(*value)
        ));
    }
}

/// Escape text for embedding in SVG
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
