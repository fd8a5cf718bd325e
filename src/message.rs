use crate::error::Result;
use crate::models::{DocumentId, Scale};
use crate::pdf_engine::RenderedPage;
use crate::render_guard::RenderToken;
use crate::toast::ToastId;

#[derive(Debug, Clone)]
pub enum Message {
    DocumentOpened(DocumentId, Result<usize>),
    PageRendered(DocumentId, RenderToken, Result<RenderedPage>),
    PreviousPage,
    NextPage,
    PageInputChanged(String),
    SubmitPage,
    ScaleSelected(Scale),
    ZoomIn,
    ZoomOut,
    Rotate,
    ToggleFullscreen,
    WindowResized(f32),
    DismissToast(ToastId),
}
