use crate::app::ViewerApp;
use crate::message::Message;
use crate::models::Scale;
use crate::viewer::LoadState;
use iced::widget::{
    Space, button, column, container, image, pick_list, row, scrollable, text, text_input,
};
use iced::{Alignment, Element, Length, Theme};

fn placeholder<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn page_indicator(app: &ViewerApp) -> String {
    match app.viewer.page_count() {
        Some(count) => format!("/ {count}"),
        None => "/ x".to_string(),
    }
}

fn render_page_nav(app: &ViewerApp) -> Element<'_, Message> {
    let viewer = &app.viewer;
    let invalid = viewer.page_input().is_invalid();

    let mut input = text_input("Page", viewer.page_input().text())
        .width(Length::Fixed(56.0))
        .style(move |theme: &Theme, status| {
            let mut style = text_input::default(theme, status);
            if invalid {
                style.border.color = theme.palette().danger;
            }
            style
        });
    if viewer.can_submit_page() {
        input = input
            .on_input(Message::PageInputChanged)
            .on_submit(Message::SubmitPage);
    }

    let nav = row![
        button("Prev").on_press_maybe(viewer.can_go_previous().then_some(Message::PreviousPage)),
        input,
        text(page_indicator(app)),
        button("Next").on_press_maybe(viewer.can_go_next().then_some(Message::NextPage)),
    ]
    .spacing(6)
    .align_y(Alignment::Center);

    match viewer.page_input().error() {
        Some(err) => column![nav, text(err.to_string()).size(12).style(text::danger)]
            .spacing(2)
            .into(),
        None => nav.into(),
    }
}

fn render_zoom_controls(app: &ViewerApp) -> Element<'_, Message> {
    let viewer = &app.viewer;
    let loaded = viewer.page_count().is_some();

    row![
        button("-").on_press_maybe(loaded.then_some(Message::ZoomOut)),
        pick_list(Scale::ALL, Some(viewer.scale()), Message::ScaleSelected),
        button("+").on_press_maybe(loaded.then_some(Message::ZoomIn)),
    ]
    .spacing(5)
    .align_y(Alignment::Center)
    .into()
}

fn render_toolbar(app: &ViewerApp) -> Element<'_, Message> {
    let viewer = &app.viewer;

    let loading_indicator = if viewer.page_count().is_some() && viewer.is_loading() {
        row![text("Rendering…").size(12)]
    } else {
        row![]
    };

    container(
        row![
            render_page_nav(app),
            Space::new().width(Length::Fill),
            loading_indicator,
            Space::new().width(Length::Fixed(10.0)),
            render_zoom_controls(app),
            Space::new().width(Length::Fixed(10.0)),
            button("Rotate").on_press(Message::Rotate),
            button("Fullscreen").on_press(Message::ToggleFullscreen),
        ]
        .spacing(5)
        .align_y(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .into()
}

fn render_page(app: &ViewerApp) -> Element<'_, Message> {
    let viewer = &app.viewer;

    // A failed load stays on the placeholder; the toast carries the error.
    let frame = match viewer.load_state() {
        LoadState::Loading | LoadState::Failed => None,
        LoadState::Loaded { .. } => viewer.render().visible(),
    };

    let Some(frame) = frame else {
        return placeholder("Loading…");
    };

    scrollable(
        container(image(frame.image.clone()))
            .padding(20)
            .center_x(Length::Shrink),
    )
    .direction(scrollable::Direction::Both {
        vertical: scrollable::Scrollbar::default(),
        horizontal: scrollable::Scrollbar::default(),
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn render_fullscreen_bar(app: &ViewerApp) -> Element<'_, Message> {
    let viewer = &app.viewer;
    let status = match viewer.page_count() {
        Some(count) => format!("Page {} of {}", viewer.current_page(), count),
        None => "Loading…".to_string(),
    };

    row![
        button("Exit Fullscreen").on_press(Message::ToggleFullscreen),
        container(text(status)).padding(10),
        button("Prev").on_press_maybe(viewer.can_go_previous().then_some(Message::PreviousPage)),
        button("Next").on_press_maybe(viewer.can_go_next().then_some(Message::NextPage)),
        Space::new().width(Length::Fixed(10.0)),
        render_zoom_controls(app),
    ]
    .spacing(5)
    .padding(5)
    .align_y(Alignment::Center)
    .into()
}

pub fn document_view(app: &ViewerApp) -> Element<'_, Message> {
    if app.viewer.is_fullscreen() {
        column![render_page(app), render_fullscreen_bar(app)].into()
    } else {
        column![render_toolbar(app), render_page(app)].into()
    }
}
