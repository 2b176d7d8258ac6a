//! Chart widgets
//!
//! A widget goes `Idle → Loading → {Ready, Failed}`. Mounting acquires the
//! rendering surface and starts two independent tasks: settings load and
//! repo detail fetch. Either may finish first. Both write through a liveness
//! check under the state lock, so completions after [`Widget::unmount`] are
//! dropped.
//!
//! Failures never reach the caller. A failed fetch is logged and the widget
//! renders nothing; a failed settings load is logged and defaults are used.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::analytics::{bucketize_by_month, Aggregation};
use crate::api::RepoDataSource;
use crate::i18n::message_by_locale;
use crate::models::{ChartDataset, RepoDetail, RepoId, Series};
use crate::render::{build_render_config, ChartKind, RenderConfig};
use crate::settings::{Settings, SettingsSource};
use crate::surface::Renderer;
use crate::theme::Theme;

/// Lifecycle state of a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// The widgets this crate knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Hover popup with monthly stars gained
    StarPopup,
    /// Header chart with the monthly influence index
    InfluenceChart,
}

impl WidgetKind {
    pub fn title_key(self) -> &'static str {
        match self {
            WidgetKind::StarPopup => "star_popup_title",
            WidgetKind::InfluenceChart => "influence_chart_title",
        }
    }

    /// Surface size in pixels (width, height)
    pub fn size(self) -> (u32, u32) {
        match self {
            WidgetKind::StarPopup => (270, 130),
            WidgetKind::InfluenceChart => (350, 200),
        }
    }

    /// Stars arrive as daily deltas; influence as a running index
    pub fn aggregation(self) -> Aggregation {
        match self {
            WidgetKind::StarPopup => Aggregation::Sum,
            WidgetKind::InfluenceChart => Aggregation::Latest,
        }
    }

    pub fn chart_kind(self) -> ChartKind {
        match self {
            WidgetKind::StarPopup => ChartKind::StarHistory,
            WidgetKind::InfluenceChart => ChartKind::Influence,
        }
    }

    pub fn series(self, detail: &RepoDetail) -> &Series {
        match self {
            WidgetKind::StarPopup => &detail.stars,
            WidgetKind::InfluenceChart => &detail.influence,
        }
    }

    pub fn enabled(self, settings: &Settings) -> bool {
        match self {
            WidgetKind::StarPopup => settings.star_popup_enabled,
            WidgetKind::InfluenceChart => settings.influence_chart_enabled,
        }
    }
}

/// What a ready widget shows
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub title: String,
    /// Localized name of the plotted value, as shown in tooltips
    pub series_name: String,
    pub width: u32,
    pub height: u32,
    pub dataset: ChartDataset,
    pub config: RenderConfig,
}

struct WidgetInner<R> {
    state: WidgetState,
    disposed: bool,
    settings: Settings,
    dataset: Option<ChartDataset>,
    config: Option<RenderConfig>,
    last_error: Option<String>,
    renderer: R,
}

/// A chart widget bound to one repository
pub struct Widget<D, S, R>
where
    D: RepoDataSource,
    S: SettingsSource,
    R: Renderer,
{
    kind: WidgetKind,
    theme: Theme,
    data_source: Arc<D>,
    settings_source: Arc<S>,
    inner: Arc<Mutex<WidgetInner<R>>>,
    tasks: Vec<JoinHandle<()>>,
}

impl<D, S, R> Widget<D, S, R>
where
    D: RepoDataSource,
    S: SettingsSource,
    R: Renderer,
{
    pub fn new(
        kind: WidgetKind,
        theme: Theme,
        data_source: Arc<D>,
        settings_source: Arc<S>,
        renderer: R,
    ) -> Self {
        Self {
            kind,
            theme,
            data_source,
            settings_source,
            inner: Arc::new(Mutex::new(WidgetInner {
                state: WidgetState::Idle,
                disposed: false,
                settings: Settings::default(),
                dataset: None,
                config: None,
                last_error: None,
                renderer,
            })),
            tasks: Vec::new(),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Acquire the surface and start loading. Must run inside a tokio runtime.
    ///
    /// Only the first mount of an idle widget does anything; there is no
    /// re-fetch.
    pub fn mount(&mut self, repo: RepoId) {
        {
            let mut inner = self.inner.lock();
            if inner.disposed || inner.state != WidgetState::Idle {
                warn!(kind = ?self.kind, state = ?inner.state, "Widget already mounted, ignoring");
                return;
            }

            let (width, height) = self.kind.size();
            if let Err(e) = inner.renderer.init(width, height) {
                error!(kind = ?self.kind, error = %e, "Failed to acquire rendering surface");
                inner.last_error = Some(e.to_string());
                inner.state = WidgetState::Failed;
                return;
            }
            inner.state = WidgetState::Loading;
        }

        debug!(kind = ?self.kind, repo = %repo, "Widget mounted");
        self.tasks.push(self.spawn_settings_load());
        self.tasks.push(self.spawn_data_fetch(repo));
    }

    fn spawn_settings_load(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let source = Arc::clone(&self.settings_source);

        tokio::spawn(async move {
            let settings = match source.load_settings().await {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(error = %e, "Failed to load settings, using defaults");
                    Settings::default()
                }
            };

            let mut inner = inner.lock();
            if inner.disposed {
                debug!("Settings loaded after unmount, dropping");
                return;
            }
            inner.settings = settings;
        })
    }

    fn spawn_data_fetch(&self, repo: RepoId) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let source = Arc::clone(&self.data_source);
        let kind = self.kind;
        let theme = self.theme;

        tokio::spawn(async move {
            let result = source.get_repo_detail(&repo).await;

            let mut inner = inner.lock();
            if inner.disposed {
                debug!(repo = %repo, "Repo detail arrived after unmount, dropping");
                return;
            }

            match result {
                Ok(detail) => {
                    let dataset = bucketize_by_month(kind.series(&detail), kind.aggregation());
                    let config = build_render_config(theme, kind.chart_kind(), &dataset);

                    if dataset.is_empty() {
                        debug!(repo = %repo, kind = ?kind, "No data for widget");
                    } else if !inner.renderer.is_live() {
                        warn!(repo = %repo, "Rendering surface gone, skipping draw");
                    } else if let Err(e) = inner.renderer.set_option(&config) {
                        warn!(repo = %repo, error = %e, "Failed to apply chart options");
                    }

                    inner.dataset = Some(dataset);
                    inner.config = Some(config);
                    inner.state = WidgetState::Ready;
                }
                Err(e) => {
                    error!(repo = %repo, kind = ?kind, error = %e, "Failed to load repo detail");
                    inner.last_error = Some(e.to_string());
                    inner.state = WidgetState::Failed;
                }
            }
        })
    }

    /// Wait for outstanding load tasks
    ///
    /// A handle is only dropped once its task has finished, so an interrupted
    /// wait leaves the rest abortable by [`Widget::unmount`].
    pub async fn settled(&mut self) {
        while let Some(task) = self.tasks.first_mut() {
            let result = task.await;
            self.tasks.remove(0);
            if let Err(e) = result {
                if !e.is_cancelled() {
                    error!(error = %e, "Widget task panicked");
                }
            }
        }
    }

    /// Mark the widget dead, stop its tasks and release the surface
    pub fn unmount(&mut self) {
        {
            let mut inner = self.inner.lock();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.renderer.dispose();
        }
        for task in &self.tasks {
            task.abort();
        }
        debug!(kind = ?self.kind, "Widget unmounted");
    }

    pub fn state(&self) -> WidgetState {
        self.inner.lock().state
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    pub fn settings(&self) -> Settings {
        self.inner.lock().settings.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.inner.lock().last_error.clone()
    }

    /// Bucketized data, once ready
    pub fn dataset(&self) -> Option<ChartDataset> {
        self.inner.lock().dataset.clone()
    }

    /// Borrow the renderer (e.g. to read back a drawn frame)
    pub fn with_renderer<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.inner.lock().renderer)
    }

    /// The widget's visible content; `None` renders nothing
    pub fn view(&self) -> Option<WidgetView> {
        let inner = self.inner.lock();
        if inner.disposed || inner.state != WidgetState::Ready {
            return None;
        }
        if !self.kind.enabled(&inner.settings) {
            return None;
        }

        let dataset = inner.dataset.as_ref().filter(|d| !d.is_empty())?;
        let config = inner.config.as_ref()?;
        let (width, height) = self.kind.size();
        let locale = inner.settings.locale.as_str();

        Some(WidgetView {
            title: message_by_locale(self.kind.title_key(), locale),
            series_name: message_by_locale(self.kind.chart_kind().tooltip_key(), locale),
            width,
            height,
            dataset: dataset.clone(),
            config: config.clone(),
        })
    }
}

impl<D, S, R> Drop for Widget<D, S, R>
where
    D: RepoDataSource,
    S: SettingsSource,
    R: Renderer,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
