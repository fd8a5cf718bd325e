use crate::engine::{self, EngineHandle};
use crate::loader;
use crate::message::Message;
use crate::models::{AppTheme, Scale, ViewerSettings};
use crate::storage;
use crate::toast::{Toast, Toasts};
use crate::ui;
use crate::update::handle_message;
use crate::viewer::{RenderRequest, ViewerState};
use iced::widget::image as iced_image;
use iced::{Element, Subscription, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Horizontal space around the page inside the window.
pub const PAGE_MARGIN: f32 = 40.0;

pub struct ViewerApp {
    pub viewer: ViewerState<iced_image::Handle>,
    pub settings: ViewerSettings,
    pub toasts: Toasts,
    pub engine: EngineHandle,
    /// Where settings changes are written back; `None` keeps them in memory.
    config_dir: Option<PathBuf>,
    theme: Theme,
}

impl ViewerApp {
    /// Boots the viewer for `url`, starting the engine and the load.
    pub fn new(url: String, scale: Option<Scale>) -> (Self, Task<Message>) {
        let settings = storage::load_settings();
        let engine = engine::spawn_engine_thread(settings.cache_size);
        let app = Self::with_engine(url, scale, settings, engine)
            .with_config_dir(storage::get_config_dir());
        let load = app.load_document();
        (app, load)
    }

    pub fn with_engine(
        url: String,
        scale: Option<Scale>,
        settings: ViewerSettings,
        engine: EngineHandle,
    ) -> Self {
        let scale = scale.unwrap_or(settings.default_scale);
        Self {
            viewer: ViewerState::new(url, scale, settings.page_width),
            theme: resolve_theme(settings.theme),
            settings,
            toasts: Toasts::default(),
            engine,
            config_dir: None,
        }
    }

    pub fn with_config_dir(mut self, dir: PathBuf) -> Self {
        self.config_dir = Some(dir);
        self
    }

    /// Makes the current zoom the default for the next launch.
    pub fn remember_scale(&mut self) {
        let scale = self.viewer.scale();
        if scale == self.settings.default_scale {
            return;
        }
        self.settings.default_scale = scale;
        if let Some(dir) = &self.config_dir {
            storage::save_settings_to(dir, &self.settings);
        }
    }

    fn load_document(&self) -> Task<Message> {
        let url = self.viewer.url().to_string();
        let document = self.viewer.id();
        let engine = self.engine.clone();
        let timeout = Duration::from_secs(self.settings.http_timeout_secs);

        tracing::info!(%document, url = %url, "loading document");
        Task::perform(
            async move {
                let bytes = loader::fetch(&url, timeout).await?;
                engine.open(document, bytes).await
            },
            move |result| Message::DocumentOpened(document, result),
        )
    }

    /// Sends a render to the engine; the answer comes back as
    /// `Message::PageRendered` tagged with the request token.
    pub fn dispatch(&self, request: Option<RenderRequest>) -> Task<Message> {
        let Some(RenderRequest {
            document,
            token,
            key,
        }) = request
        else {
            return Task::none();
        };

        let engine = self.engine.clone();
        tracing::debug!(%document, page = key.page, scale = %key.scale, "requesting render");
        Task::perform(
            async move { engine.render(document, key).await },
            move |result| Message::PageRendered(document, token, result),
        )
    }

    /// Shows a toast and schedules its dismissal.
    pub fn notify(&mut self, toast: Toast) -> Task<Message> {
        let id = self.toasts.push(toast);
        let timeout = Duration::from_secs(self.settings.toast_timeout_secs);
        Task::perform(
            async move { tokio::time::sleep(timeout).await },
            move |()| Message::DismissToast(id),
        )
    }

    pub fn title(&self) -> String {
        let name = self
            .viewer
            .url()
            .rsplit(['/', '\\'])
            .find(|s| !s.is_empty())
            .unwrap_or("docview");
        format!("{name} - docview")
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size.width))
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        handle_message(self, message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        ui::view(self)
    }
}

impl Drop for ViewerApp {
    fn drop(&mut self) {
        self.engine.close(self.viewer.id());
    }
}

fn resolve_theme(theme: AppTheme) -> Theme {
    match theme {
        AppTheme::Light => Theme::Light,
        AppTheme::Dark => Theme::Dark,
        AppTheme::System => match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Theme::Dark,
            _ => Theme::Light,
        },
    }
}

/// Turns engine pixels into an image handle without copying when possible.
pub fn to_handle(width: u32, height: u32, pixels: Arc<Vec<u8>>) -> iced_image::Handle {
    let rgba = Arc::try_unwrap(pixels).unwrap_or_else(|arc| (*arc).clone());
    iced_image::Handle::from_rgba(width, height, rgba)
}
