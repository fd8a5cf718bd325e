//! Per-document viewer state: navigation, zoom, rotation and the render
//! guard. Operations that change what should be on screen return the
//! render the caller must dispatch to the engine, if any.

use crate::models::{DocumentId, Rotation, Scale};
use crate::page_input::{PageInput, PageInputError};
use crate::render_guard::{Completion, RenderGuard, RenderKey, RenderToken};
use crate::toast::Toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded { page_count: usize },
    /// Loading failed; the viewer keeps showing its placeholder.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub document: DocumentId,
    pub token: RenderToken,
    pub key: RenderKey,
}

#[derive(Debug)]
pub struct ViewerState<I> {
    id: DocumentId,
    url: String,
    load: LoadState,
    current_page: usize,
    scale: Scale,
    rotation: Rotation,
    base_width: u32,
    page_input: PageInput,
    render: RenderGuard<I>,
    fullscreen: bool,
}

impl<I> ViewerState<I> {
    pub fn new(url: impl Into<String>, scale: Scale, base_width: u32) -> Self {
        Self {
            id: DocumentId::next(),
            url: url.into(),
            load: LoadState::Loading,
            current_page: 1,
            scale,
            rotation: Rotation::default(),
            base_width: base_width.max(1),
            page_input: PageInput::showing(1),
            render: RenderGuard::default(),
            fullscreen: false,
        }
    }

    pub const fn id(&self) -> DocumentId {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub const fn load_state(&self) -> LoadState {
        self.load
    }

    pub const fn page_count(&self) -> Option<usize> {
        match self.load {
            LoadState::Loaded { page_count } => Some(page_count),
            LoadState::Loading | LoadState::Failed => None,
        }
    }

    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    pub const fn scale(&self) -> Scale {
        self.scale
    }

    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub const fn page_input(&self) -> &PageInput {
        &self.page_input
    }

    pub const fn render(&self) -> &RenderGuard<I> {
        &self.render
    }

    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// True while the visible frame is not at the selected scale.
    pub fn is_loading(&self) -> bool {
        self.render.rendered_scale() != Some(self.scale)
    }

    pub const fn can_go_previous(&self) -> bool {
        self.page_count().is_some() && self.current_page > 1
    }

    pub const fn can_go_next(&self) -> bool {
        match self.page_count() {
            Some(count) => self.current_page < count,
            None => false,
        }
    }

    pub const fn can_submit_page(&self) -> bool {
        self.page_count().is_some()
    }

    /// Records a successfully parsed document. Ignored unless the viewer is
    /// still loading.
    pub fn document_loaded(&mut self, page_count: usize) -> Option<RenderRequest> {
        if self.load != LoadState::Loading {
            tracing::warn!(document = %self.id, "ignoring late load completion");
            return None;
        }
        tracing::info!(document = %self.id, page_count, "document loaded");
        self.load = LoadState::Loaded { page_count };
        self.current_page = 1;
        self.page_input.sync(1);
        self.refresh()
    }

    /// Records a failed load. Returns the notification to show, at most once
    /// per viewer.
    pub fn document_failed(&mut self) -> Option<Toast> {
        if self.load != LoadState::Loading {
            return None;
        }
        self.load = LoadState::Failed;
        Some(Toast::load_failed())
    }

    pub fn go_to_previous(&mut self) -> Option<RenderRequest> {
        if !self.can_go_previous() {
            return None;
        }
        self.show_page(self.current_page - 1)
    }

    pub fn go_to_next(&mut self) -> Option<RenderRequest> {
        if !self.can_go_next() {
            return None;
        }
        self.show_page(self.current_page + 1)
    }

    pub fn edit_page_input(&mut self, text: String) {
        self.page_input.edit(text);
    }

    /// Validates the page-number field and jumps to it when valid.
    pub fn submit_page_input(&mut self) -> Result<Option<RenderRequest>, PageInputError> {
        let page = self.page_input.submit(self.page_count())?;
        Ok(self.show_page(page))
    }

    /// Types `text` into the page-number field and submits it.
    pub fn submit_page(&mut self, text: &str) -> Result<Option<RenderRequest>, PageInputError> {
        self.page_input.edit(text.to_string());
        self.submit_page_input()
    }

    pub fn set_scale(&mut self, scale: Scale) -> Option<RenderRequest> {
        if scale == self.scale {
            return None;
        }
        tracing::debug!(document = %self.id, from = %self.scale, to = %scale, "scale changed");
        self.scale = scale;
        self.refresh()
    }

    pub fn zoom_in(&mut self) -> Option<RenderRequest> {
        self.set_scale(self.scale.step_up())
    }

    pub fn zoom_out(&mut self) -> Option<RenderRequest> {
        self.set_scale(self.scale.step_down())
    }

    pub fn rotate(&mut self) -> Option<RenderRequest> {
        self.rotation = self.rotation.rotate_clockwise();
        self.refresh()
    }

    /// Follows the width available to the page.
    pub fn set_base_width(&mut self, width: u32) -> Option<RenderRequest> {
        let width = width.max(1);
        if width == self.base_width {
            return None;
        }
        self.base_width = width;
        self.refresh()
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    pub fn render_finished(&mut self, token: RenderToken, image: I) -> Completion {
        let completion = self.render.complete(token, image);
        if completion == Completion::Discarded {
            tracing::debug!(document = %self.id, ?token, "discarding outdated render");
        }
        completion
    }

    /// Drops a failed render. When an older frame is still on screen, page,
    /// scale and rotation roll back to what it shows so the controls describe
    /// the visible page and choosing the failed setting again re-renders.
    /// The base width follows the window and is left alone.
    pub fn render_failed(&mut self, token: RenderToken) -> Completion {
        let completion = self.render.fail(token);
        if completion == Completion::Discarded {
            return completion;
        }
        if let Some(shown) = self.render.visible().map(|frame| frame.key) {
            tracing::debug!(document = %self.id, page = shown.page, scale = %shown.scale, "rolling back to visible frame");
            self.current_page = shown.page;
            self.page_input.sync(shown.page);
            self.scale = shown.scale;
            self.rotation = self.rotation.unwound_to(shown.rotation);
        }
        completion
    }

    /// The render the current state calls for, if a document is loaded.
    pub const fn render_key(&self) -> Option<RenderKey> {
        if self.page_count().is_none() {
            return None;
        }
        Some(RenderKey {
            page: self.current_page,
            scale: self.scale,
            rotation: self.rotation.effective_degrees(),
            base_width: self.base_width,
        })
    }

    fn show_page(&mut self, page: usize) -> Option<RenderRequest> {
        let count = self.page_count()?;
        self.current_page = page.clamp(1, count);
        self.page_input.sync(self.current_page);
        self.refresh()
    }

    fn refresh(&mut self) -> Option<RenderRequest> {
        let key = self.render_key()?;
        let token = self.render.request(key)?;
        Some(RenderRequest {
            document: self.id,
            token,
            key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(pages: usize) -> ViewerState<&'static str> {
        let mut viewer = ViewerState::new("file:///tmp/doc.pdf", Scale::Normal, 600);
        viewer.document_loaded(pages);
        viewer
    }

    #[test]
    fn test_new_viewer_is_loading() {
        let viewer: ViewerState<()> = ViewerState::new("a.pdf", Scale::Normal, 600);
        assert_eq!(viewer.load_state(), LoadState::Loading);
        assert_eq!(viewer.page_count(), None);
        assert!(!viewer.can_go_next());
        assert!(!viewer.can_go_previous());
        assert!(!viewer.can_submit_page());
        assert!(viewer.is_loading());
    }

    #[test]
    fn test_load_issues_first_render() {
        let mut viewer: ViewerState<()> = ViewerState::new("a.pdf", Scale::Double, 500);
        let request = viewer.document_loaded(3).unwrap();
        assert_eq!(request.document, viewer.id());
        assert_eq!(request.key.page, 1);
        assert_eq!(request.key.scale, Scale::Double);
        assert_eq!(request.key.target_width(), 1000);
        assert!(viewer.render().is_transitioning());
    }

    #[test]
    fn test_late_load_after_failure_is_ignored() {
        let mut viewer: ViewerState<()> = ViewerState::new("a.pdf", Scale::Normal, 500);
        assert!(viewer.document_failed().is_some());
        assert!(viewer.document_loaded(4).is_none());
        assert_eq!(viewer.load_state(), LoadState::Failed);
    }

    #[test]
    fn test_previous_on_first_page() {
        let mut viewer = loaded(3);
        assert!(viewer.go_to_previous().is_none());
        assert_eq!(viewer.current_page(), 1);
    }

    #[test]
    fn test_navigation_syncs_input() {
        let mut viewer = loaded(3);
        viewer.edit_page_input("abc".into());
        viewer.go_to_next();
        assert_eq!(viewer.current_page(), 2);
        assert_eq!(viewer.page_input().text(), "2");
        assert!(!viewer.page_input().is_invalid());
    }

    #[test]
    fn test_submit_while_loading_is_rejected() {
        let mut viewer: ViewerState<()> = ViewerState::new("a.pdf", Scale::Normal, 500);
        assert_eq!(viewer.submit_page("1"), Err(PageInputError::NotLoaded));
        assert_eq!(viewer.current_page(), 1);
    }

    #[test]
    fn test_submit_same_page_renders_nothing_new() {
        let mut viewer = loaded(3);
        assert_eq!(viewer.submit_page("1"), Ok(None));
    }

    #[test]
    fn test_same_scale_is_noop() {
        let mut viewer = loaded(3);
        assert!(viewer.set_scale(Scale::Normal).is_none());
    }

    #[test]
    fn test_zoom_steps() {
        let mut viewer = loaded(3);
        assert!(viewer.zoom_out().is_none());
        assert!(viewer.zoom_in().is_some());
        assert_eq!(viewer.scale(), Scale::OneAndHalf);
    }

    #[test]
    fn test_rotation_rerenders() {
        let mut viewer = loaded(3);
        let request = viewer.rotate().unwrap();
        assert_eq!(request.key.rotation, 90);
    }

    #[test]
    fn test_full_turn_reuses_visible_frame() {
        let mut viewer = loaded(2);
        for _ in 0..4 {
            let request = viewer.rotate().unwrap();
            viewer.render_finished(request.token, "frame");
        }
        assert_eq!(viewer.rotation().degrees(), 360);
        assert!(viewer.render().is_stable());

        let request = viewer.rotate().unwrap();
        viewer.render_finished(request.token, "frame");
        for _ in 0..3 {
            viewer.rotate();
        }
        // Back at 90 degrees after a full turn: the last frame still fits.
        assert!(viewer.rotate().is_none());
        assert!(viewer.render().is_stable());
    }

    #[test]
    fn test_failed_scale_render_rolls_back() {
        let mut viewer = loaded(3);
        let first = viewer.render().pending().unwrap().0;
        viewer.render_finished(first, "p1@1.0");

        let request = viewer.set_scale(Scale::Double).unwrap();
        assert_eq!(viewer.render_failed(request.token), Completion::Swapped);

        assert!(viewer.render().is_stable());
        assert_eq!(viewer.scale(), Scale::Normal);
        assert_eq!(viewer.render().rendered_scale(), Some(viewer.scale()));
        assert!(!viewer.is_loading());

        // Choosing the failed scale again retries it.
        assert!(viewer.set_scale(Scale::Double).is_some());
    }

    #[test]
    fn test_failed_page_render_rolls_back() {
        let mut viewer = loaded(3);
        let first = viewer.render().pending().unwrap().0;
        viewer.render_finished(first, "p1");

        let request = viewer.go_to_next().unwrap();
        viewer.render_failed(request.token);

        assert_eq!(viewer.current_page(), 1);
        assert_eq!(viewer.page_input().text(), "1");
        assert_eq!(viewer.render().visible().unwrap().key.page, 1);
        assert!(viewer.go_to_next().is_some());
    }

    #[test]
    fn test_failed_rotation_unwinds() {
        let mut viewer = loaded(1);
        let first = viewer.render().pending().unwrap().0;
        viewer.render_finished(first, "p1");

        viewer.rotate();
        let request = viewer.rotate().unwrap();
        viewer.render_failed(request.token);

        assert_eq!(viewer.rotation().effective_degrees(), 0);
        assert_eq!(viewer.render_key(), viewer.render().visible().map(|f| f.key));
    }

    #[test]
    fn test_failed_first_render_keeps_target() {
        let mut viewer: ViewerState<&str> = ViewerState::new("a.pdf", Scale::Double, 500);
        let request = viewer.document_loaded(4).unwrap();
        viewer.render_failed(request.token);

        assert!(viewer.render().visible().is_none());
        assert_eq!(viewer.scale(), Scale::Double);
        assert!(viewer.go_to_next().is_some());
    }

    #[test]
    fn test_stale_failure_changes_nothing() {
        let mut viewer = loaded(3);
        let first = viewer.render().pending().unwrap().0;
        viewer.render_finished(first, "p1");
        let outdated = viewer.set_scale(Scale::OneAndHalf).unwrap();
        viewer.set_scale(Scale::Double);

        assert_eq!(viewer.render_failed(outdated.token), Completion::Discarded);
        assert_eq!(viewer.scale(), Scale::Double);
        assert!(viewer.render().is_transitioning());
    }

    #[test]
    fn test_base_width_changes() {
        let mut viewer = loaded(3);
        assert!(viewer.set_base_width(600).is_none());
        let request = viewer.set_base_width(0).unwrap();
        assert_eq!(request.key.base_width, 1);
    }

    #[test]
    fn test_zoom_before_load_renders_nothing() {
        let mut viewer: ViewerState<()> = ViewerState::new("a.pdf", Scale::Normal, 500);
        assert!(viewer.set_scale(Scale::Double).is_none());
        assert_eq!(viewer.scale(), Scale::Double);
        let request = viewer.document_loaded(2).unwrap();
        assert_eq!(request.key.scale, Scale::Double);
    }

    #[test]
    fn test_fullscreen_toggle() {
        let mut viewer = loaded(1);
        assert!(viewer.toggle_fullscreen());
        assert!(viewer.is_fullscreen());
        assert!(!viewer.toggle_fullscreen());
        assert!(!viewer.is_fullscreen());
    }
}
