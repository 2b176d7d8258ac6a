//! CLI commands
//!
//! Mounts a widget against the live backend, waits for it to settle and
//! writes what it would display. A widget that degrades prints nothing.

use anyhow::{Context, Result};
use repopulse_core::{
    bucketize_by_month, Aggregation, ChartDataset, ClientConfig, FileSettings, HttpRepoClient,
    RepoId, Series, Settings, SettingsSource, StaticSettings, SvgRenderer, Theme, Widget,
    WidgetKind, WidgetView,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::OutputFormat;

/// Options shared by the widget commands
pub struct RunOptions {
    pub api_base: String,
    pub theme: Option<Theme>,
    pub settings: Option<PathBuf>,
    pub timeout: Duration,
}

/// Mount `kind` for `repo` and emit its view
pub async fn run_widget(
    kind: WidgetKind,
    repo: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
    options: RunOptions,
) -> Result<()> {
    let repo: RepoId = repo.parse().context("Invalid repository argument")?;

    let settings_file = options
        .settings
        .clone()
        .map(FileSettings::new)
        .or_else(FileSettings::default_location);

    match settings_file {
        Some(source) => run_with_settings(kind, repo, format, output, options, source).await,
        None => {
            warn!("No config directory on this platform, using default settings");
            let source = StaticSettings::default();
            run_with_settings(kind, repo, format, output, options, source).await
        }
    }
}

/// Flag wins, then the settings file, then light
async fn resolve_theme<S: SettingsSource>(flag: Option<Theme>, source: &S) -> Theme {
    if let Some(theme) = flag {
        return theme;
    }
    match source.load_settings().await {
        Ok(Settings { theme: Some(theme), .. }) => theme,
        Ok(_) => Theme::default(),
        Err(e) => {
            warn!(error = %e, "Could not read theme from settings");
            Theme::default()
        }
    }
}

async fn run_with_settings<S: SettingsSource>(
    kind: WidgetKind,
    repo: RepoId,
    format: OutputFormat,
    output: Option<PathBuf>,
    options: RunOptions,
    settings: S,
) -> Result<()> {
    let theme = resolve_theme(options.theme, &settings).await;

    let client = HttpRepoClient::new(ClientConfig {
        base_url: options.api_base,
        timeout: options.timeout,
        ..ClientConfig::default()
    })
    .context("Failed to build HTTP client")?;

    let mut widget = Widget::new(
        kind,
        theme,
        Arc::new(client),
        Arc::new(settings),
        SvgRenderer::new(),
    );

    widget.mount(repo.clone());
    let grace = options.timeout + Duration::from_secs(1);
    if tokio::time::timeout(grace, widget.settled()).await.is_err() {
        warn!(repo = %repo, "Widget did not settle in time");
    }

    let Some(view) = widget.view() else {
        info!(repo = %repo, state = ?widget.state(), "Nothing to render");
        widget.unmount();
        return Ok(());
    };

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&view_json(&view))?,
        OutputFormat::Svg => widget
            .with_renderer(|r| r.svg().map(str::to_owned))
            .context("Surface has no frame")?,
    };
    widget.unmount();

    write_output(&rendered, output.as_deref()).await
}

fn view_json(view: &WidgetView) -> serde_json::Value {
    json!({
        "title": view.title,
        "seriesName": view.series_name,
        "width": view.width,
        "height": view.height,
        "data": view.dataset,
        "option": view.config,
    })
}

async fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Chart written");
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Bucket a local series file and print the dataset as JSON
pub async fn run_bucketize(file: &Path, latest: bool) -> Result<()> {
    let dataset = bucketize_file(file, latest).await?;
    println!("{}", serde_json::to_string(&dataset)?);
    Ok(())
}

async fn bucketize_file(file: &Path, latest: bool) -> Result<ChartDataset> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let series = Series::from_json(&content)
        .with_context(|| format!("Invalid series in {}", file.display()))?;

    let policy = if latest {
        Aggregation::Latest
    } else {
        Aggregation::Sum
    };
    Ok(bucketize_by_month(&series, policy))
}

// ============================================================================
// Tests
// ============================================================================
