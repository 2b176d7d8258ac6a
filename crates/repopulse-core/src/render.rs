//! Chart option building
//!
//! [`build_render_config`] maps a theme and a dataset to the declarative
//! option document the chart renderer consumes. It is pure: the same inputs
//! always produce the same config.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::format::{format_num, number_with_commas};
use crate::i18n::message_by_locale;
use crate::models::{parse_event_date, ChartDataset};
use crate::theme::{Theme, ThemePalette};

/// Minimum zoom window: 180 days in milliseconds
pub const MIN_ZOOM_SPAN_MS: i64 = 3600 * 24 * 1000 * 180;

/// Per-item animation delay step in milliseconds
pub const ANIMATION_DELAY_STEP_MS: u32 = 5;

/// Which chart a config is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    /// Monthly stars, single line
    StarHistory,
    /// Monthly influence, bars plus a trend line
    Influence,
}

impl ChartKind {
    /// Catalog key naming the plotted value in tooltips
    pub fn tooltip_key(self) -> &'static str {
        match self {
            ChartKind::StarHistory => "chart_tooltip_stars",
            ChartKind::Influence => "chart_tooltip_influence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Bar,
    Line,
}

/// Named formatter the renderer resolves to a callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelFormat {
    /// `yy` in bold on January, `MMM` otherwise
    YearMonth,
    /// [`format_num`]
    Compact,
    /// [`number_with_commas`]
    Commas,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipConfig {
    pub trigger: &'static str,
    pub text_style: TextStyle,
    pub background_color: &'static str,
    pub formatter: LabelFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub top: &'static str,
    pub bottom: &'static str,
    pub left: &'static str,
    pub right: &'static str,
    pub contain_label: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLine {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<TextStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub color: &'static str,
    pub formatter: LabelFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<&'static str>,
    pub split_line: SplitLine,
    pub axis_label: AxisLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataZoomConfig {
    #[serde(rename = "type")]
    pub zoom_type: &'static str,
    pub start: f64,
    pub end: f64,
    pub min_value_span: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emphasis {
    pub focus: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    #[serde(rename = "type")]
    pub series_type: SeriesType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<TextStyle>,
    pub data: ChartDataset,
    pub emphasis: Emphasis,
    pub y_axis_index: usize,
}

impl SeriesConfig {
    /// Stroke or fill color of this series
    pub fn color(&self) -> Option<&'static str> {
        self.item_style
            .as_ref()
            .or(self.line_style.as_ref())
            .map(|s| s.color)
    }
}

/// Complete chart option document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(skip)]
    pub kind: ChartKind,
    #[serde(skip)]
    pub theme: Theme,
    pub tooltip: TooltipConfig,
    pub grid: GridConfig,
    pub x_axis: AxisConfig,
    pub y_axis: Vec<AxisConfig>,
    pub data_zoom: Vec<DataZoomConfig>,
    pub series: Vec<SeriesConfig>,
    pub animation_easing: &'static str,
    pub animation_delay_step: u32,
}

fn line_series(color: &'static str, data: &ChartDataset) -> SeriesConfig {
    SeriesConfig {
        series_type: SeriesType::Line,
        symbol: Some("none"),
        item_style: None,
        line_style: Some(TextStyle { color }),
        data: data.clone(),
        emphasis: Emphasis { focus: "series" },
        y_axis_index: 0,
    }
}

/// Build the chart options for `kind` in `theme` over `dataset`
pub fn build_render_config(theme: Theme, kind: ChartKind, dataset: &ChartDataset) -> RenderConfig {
    let th = theme.palette();

    let series = match kind {
        ChartKind::StarHistory => vec![line_series(th.line, dataset)],
        ChartKind::Influence => vec![
            SeriesConfig {
                series_type: SeriesType::Bar,
                symbol: None,
                item_style: Some(TextStyle { color: th.bar }),
                line_style: None,
                data: dataset.clone(),
                emphasis: Emphasis { focus: "series" },
                y_axis_index: 0,
            },
            line_series(th.line, dataset),
        ],
    };

    RenderConfig {
        kind,
        theme,
        tooltip: TooltipConfig {
            trigger: "axis",
            text_style: TextStyle { color: th.fg },
            background_color: th.bg,
            formatter: LabelFormat::Commas,
        },
        grid: GridConfig {
            top: "5%",
            bottom: "5%",
            left: "5%",
            right: "5%",
            contain_label: true,
        },
        x_axis: AxisConfig {
            axis_type: "time",
            position: None,
            split_line: SplitLine {
                show: false,
                line_style: None,
            },
            axis_label: AxisLabel {
                color: th.fg,
                formatter: LabelFormat::YearMonth,
            },
        },
        y_axis: vec![AxisConfig {
            axis_type: "value",
            position: Some("left"),
            split_line: SplitLine {
                show: true,
                line_style: Some(TextStyle {
                    color: th.split_line,
                }),
            },
            axis_label: AxisLabel {
                color: th.fg,
                formatter: LabelFormat::Compact,
            },
        }],
        data_zoom: vec![DataZoomConfig {
            zoom_type: "inside",
            start: 0.0,
            end: 100.0,
            min_value_span: MIN_ZOOM_SPAN_MS,
        }],
        series,
        animation_easing: "elasticOut",
        animation_delay_step: ANIMATION_DELAY_STEP_MS,
    }
}

/// X axis tick text: two-digit year on January, short month name otherwise
pub fn x_axis_label(date: NaiveDate) -> String {
    if date.month() == 1 {
        date.format("%y").to_string()
    } else {
        date.format("%b").to_string()
    }
}

impl RenderConfig {
    pub fn palette(&self) -> ThemePalette {
        self.theme.palette()
    }

    /// Data of the first series (all series share it)
    pub fn dataset(&self) -> Option<&ChartDataset> {
        self.series.first().map(|s| &s.data)
    }

    pub fn format_y_label(&self, value: f64) -> String {
        format_num(value)
    }

    /// X tick text for a bucket label such as "2023-01"
    pub fn format_x_label(&self, label: &str) -> Option<String> {
        parse_event_date(label).ok().map(x_axis_label)
    }

    /// Tooltip body for the point at `idx`: bucket label, then the value
    pub fn tooltip_text(&self, idx: usize) -> Option<String> {
        let point = self.dataset()?.get(idx)?;
        Some(format!("{}\n{}", point.label, number_with_commas(point.value)))
    }

    /// Tooltip body with the value named in `locale`: "2023-01\nStars: 4,321"
    pub fn tooltip_text_in(&self, idx: usize, locale: &str) -> Option<String> {
        let point = self.dataset()?.get(idx)?;
        Some(format!(
            "{}\n{}: {}",
            point.label,
            message_by_locale(self.kind.tooltip_key(), locale),
            number_with_commas(point.value)
        ))
    }

    /// Animation delay for the item at `idx`
    pub fn animation_delay(&self, idx: usize) -> u32 {
        idx as u32 * self.animation_delay_step
    }

    /// Serialize to the renderer's JSON option document
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
