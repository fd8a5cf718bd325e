use crate::app::ViewerApp;
use crate::message::Message;
use crate::toast::{Toast, ToastId, ToastVariant};
use crate::ui_document::document_view;
use iced::widget::{Space, button, column, container, row, stack, text};
use iced::{Alignment, Element, Length, Theme};

pub fn view(app: &ViewerApp) -> Element<'_, Message> {
    let content = document_view(app);

    if app.toasts.is_empty() {
        return content;
    }

    let toasts = app
        .toasts
        .iter()
        .fold(column![].spacing(8), |col, (id, toast)| {
            col.push(toast_card(*id, toast))
        });

    stack![
        content,
        container(toasts)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(16)
            .align_x(Alignment::End)
            .align_y(Alignment::End),
    ]
    .into()
}

fn toast_card(id: ToastId, toast: &Toast) -> Element<'_, Message> {
    let variant = toast.variant;
    container(
        row![
            column![text(&toast.title).size(14), text(&toast.description).size(12)].spacing(2),
            Space::new().width(Length::Fixed(12.0)),
            button("×").on_press(Message::DismissToast(id)).padding(2),
        ]
        .align_y(Alignment::Center),
    )
    .padding(12)
    .max_width(360.0)
    .style(move |theme: &Theme| {
        let palette = theme.extended_palette();
        let pair = match variant {
            ToastVariant::Destructive => palette.danger.base,
            ToastVariant::Default => palette.background.strong,
        };
        container::Style {
            background: Some(pair.color.into()),
            text_color: Some(pair.text),
            border: iced::border::rounded(6),
            ..container::Style::default()
        }
    })
    .into()
}
