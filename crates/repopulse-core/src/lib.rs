//! repopulse-core - Core library for repopulse
//!
//! Provides series models, monthly bucketing, chart option building and the
//! star/influence widgets with their data, settings and rendering
//! collaborators.

pub mod analytics;
pub mod api;
pub mod error;
pub mod format;
pub mod i18n;
pub mod models;
pub mod render;
pub mod settings;
pub mod surface;
pub mod theme;
pub mod widget;

pub use analytics::{bucketize_by_month, Aggregation};
pub use api::{ClientConfig, HttpRepoClient, RepoDataSource};
pub use error::{CoreError, Result};
pub use models::{ChartDataset, Event, RepoDetail, RepoId, Series};
pub use render::{build_render_config, ChartKind, RenderConfig};
pub use settings::{FileSettings, Settings, SettingsSource, StaticSettings};
pub use surface::{Renderer, SvgRenderer};
pub use theme::Theme;
pub use widget::{Widget, WidgetKind, WidgetState, WidgetView};
