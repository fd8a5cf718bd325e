use crate::error::Result;
use crate::models::DocumentId;
use crate::pdf_engine::RenderedPage;
use crate::render_guard::RenderKey;
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum PdfCommand {
    Open {
        document: DocumentId,
        bytes: Vec<u8>,
        reply: oneshot::Sender<Result<usize>>,
    },
    Render {
        document: DocumentId,
        key: RenderKey,
        reply: oneshot::Sender<Result<RenderedPage>>,
    },
    Close(DocumentId),
}
