//! Rendering surfaces
//!
//! A [`Renderer`] owns a drawing surface: it is initialized when a widget
//! mounts, receives a fresh [`RenderConfig`] whenever data arrives, and is
//! disposed exactly once when the widget unmounts.

use crate::error::{CoreError, Result};
use crate::render::{RenderConfig, SeriesType};
use std::fmt::Write as _;

/// Chart drawing surface
pub trait Renderer: Send + 'static {
    /// Acquire the surface
    fn init(&mut self, width: u32, height: u32) -> Result<()>;

    /// Apply options and redraw
    fn set_option(&mut self, config: &RenderConfig) -> Result<()>;

    /// Release the surface. Must be idempotent.
    fn dispose(&mut self);

    fn is_live(&self) -> bool;
}

/// Renders charts into a standalone SVG document
#[derive(Debug, Default)]
pub struct SvgRenderer {
    width: u32,
    height: u32,
    live: bool,
    frame: Option<String>,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last drawn frame
    pub fn svg(&self) -> Option<&str> {
        self.frame.as_deref()
    }
}

/// Plot area inside the surface
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    /// 5% grid margins plus room for y labels on the left and x labels below
    fn for_surface(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        let left = w * 0.05 + 32.0;
        let top = h * 0.05;
        let bottom = h * 0.05 + 14.0;
        let right = w * 0.05;
        Self {
            left,
            top,
            width: (w - left - right).max(1.0),
            height: (h - top - bottom).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

impl Renderer for SvgRenderer {
    fn init(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.live = true;
        self.frame = None;
        Ok(())
    }

    fn set_option(&mut self, config: &RenderConfig) -> Result<()> {
        if !self.live {
            return Err(CoreError::SurfaceDisposed);
        }
        self.frame = Some(draw_svg(config, self.width, self.height));
        Ok(())
    }

    fn dispose(&mut self) {
        self.live = false;
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

/// Draw `config` as an SVG document of the given size
pub fn draw_svg(config: &RenderConfig, width: u32, height: u32) -> String {
    let th = config.palette();
    let area = PlotArea::for_surface(width, height);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = write!(
        svg,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        th.bg
    );

    let Some(dataset) = config.dataset().filter(|d| !d.is_empty()) else {
        svg.push_str("</svg>");
        return svg;
    };

    let max_value = dataset.max_value().max(1.0);
    let n = dataset.len();
    let slot = area.width / n as f64;
    let x_center = |i: usize| area.left + slot * (i as f64 + 0.5);
    let y_of = |v: f64| area.bottom() - (v.max(0.0) / max_value) * area.height;

    // Split lines + y labels (4 ticks)
    for tick in 0..=3 {
        let value = max_value * tick as f64 / 3.0;
        let y = y_of(value);
        let _ = write!(
            svg,
            r#"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="{}" stroke-width="1"/>"#,
            area.left,
            area.left + area.width,
            th.split_line,
            y = y
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" font-size="10" fill="{}">{}</text>"#,
            area.left - 4.0,
            y + 3.0,
            th.fg,
            config.format_y_label(value)
        );
    }

    for series in &config.series {
        let color = series.color().unwrap_or(th.line);
        match series.series_type {
            SeriesType::Bar => {
                let bar_width = (slot * 0.6).max(1.0);
                for (i, value) in series.data.values().enumerate() {
                    let y = y_of(value);
                    let _ = write!(
                        svg,
                        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                        x_center(i) - bar_width / 2.0,
                        y,
                        bar_width,
                        area.bottom() - y,
                        color
                    );
                }
            }
            SeriesType::Line => {
                let mut path = String::from("M ");
                for (i, value) in series.data.values().enumerate() {
                    if i == 0 {
                        let _ = write!(path, "{:.2},{:.2}", x_center(i), y_of(value));
                    } else {
                        let _ = write!(path, " L {:.2},{:.2}", x_center(i), y_of(value));
                    }
                }
                let _ = write!(
                    svg,
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="2" stroke-linejoin="round"/>"#,
                    path, color
                );
            }
        }
    }

    // X labels: first bucket and every January
    for (i, point) in dataset.points().iter().enumerate() {
        if i != 0 && !point.label.ends_with("-01") {
            continue;
        }
        let Some(text) = config.format_x_label(&point.label) else {
            continue;
        };
        let weight = if point.label.ends_with("-01") { "bold" } else { "normal" };
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="10" font-weight="{}" fill="{}">{}</text>"#,
            x_center(i),
            area.bottom() + 12.0,
            weight,
            th.fg,
            text
        );
    }

    svg.push_str("</svg>");
    svg
}
