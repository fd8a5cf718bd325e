use crate::app::{PAGE_MARGIN, ViewerApp, to_handle};
use crate::message::Message;
use crate::render_guard::Completion;
use iced::{Task, window};

pub fn handle_message(app: &mut ViewerApp, message: Message) -> Task<Message> {
    match message {
        Message::DocumentOpened(document, result) => {
            if document != app.viewer.id() {
                return Task::none();
            }
            match result {
                Ok(page_count) => {
                    let request = app.viewer.document_loaded(page_count);
                    app.dispatch(request)
                }
                Err(e) => {
                    tracing::error!(%document, "error loading document: {}", e);
                    match app.viewer.document_failed() {
                        Some(toast) => app.notify(toast),
                        None => Task::none(),
                    }
                }
            }
        }
        Message::PageRendered(document, token, result) => {
            if document != app.viewer.id() {
                return Task::none();
            }
            match result {
                Ok(page) => {
                    let handle = to_handle(page.width, page.height, page.pixels);
                    if app.viewer.render_finished(token, handle) == Completion::Swapped {
                        tracing::debug!(%document, ?token, "frame swapped in");
                    }
                }
                Err(e) => {
                    tracing::error!(%document, "render error: {}", e);
                    app.viewer.render_failed(token);
                    app.remember_scale();
                }
            }
            Task::none()
        }
        Message::PreviousPage => {
            let request = app.viewer.go_to_previous();
            app.dispatch(request)
        }
        Message::NextPage => {
            let request = app.viewer.go_to_next();
            app.dispatch(request)
        }
        Message::PageInputChanged(text) => {
            app.viewer.edit_page_input(text);
            Task::none()
        }
        Message::SubmitPage => match app.viewer.submit_page_input() {
            Ok(request) => app.dispatch(request),
            Err(e) => {
                tracing::debug!("page input rejected: {}", e);
                Task::none()
            }
        },
        Message::ScaleSelected(scale) => {
            let request = app.viewer.set_scale(scale);
            app.remember_scale();
            app.dispatch(request)
        }
        Message::ZoomIn => {
            let request = app.viewer.zoom_in();
            app.remember_scale();
            app.dispatch(request)
        }
        Message::ZoomOut => {
            let request = app.viewer.zoom_out();
            app.remember_scale();
            app.dispatch(request)
        }
        Message::Rotate => {
            let request = app.viewer.rotate();
            app.dispatch(request)
        }
        Message::ToggleFullscreen => {
            let mode = if app.viewer.toggle_fullscreen() {
                window::Mode::Fullscreen
            } else {
                window::Mode::Windowed
            };
            window::latest().and_then(move |id| window::set_mode(id, mode))
        }
        Message::WindowResized(width) => {
            let available = (width - PAGE_MARGIN).max(1.0) as u32;
            let request = app.viewer.set_base_width(available);
            app.dispatch(request)
        }
        Message::DismissToast(id) => {
            app.toasts.dismiss(id);
            Task::none()
        }
    }
}
