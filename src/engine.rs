use crate::commands::PdfCommand;
use crate::error::{Result, ViewerError};
use crate::models::DocumentId;
use crate::pdf_engine::{self, Backend, DocumentStore, RenderedPage, Unavailable};
use crate::render_guard::RenderKey;
use tokio::sync::{mpsc, oneshot};

const COMMAND_QUEUE: usize = 32;

/// Cloneable handle to the engine thread.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<PdfCommand>,
}

impl EngineHandle {
    pub async fn open(&self, document: DocumentId, bytes: Vec<u8>) -> Result<usize> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(PdfCommand::Open {
                document,
                bytes,
                reply,
            })
            .await?;
        rx.await?
    }

    pub async fn render(&self, document: DocumentId, key: RenderKey) -> Result<RenderedPage> {
        let (reply, rx) = oneshot::channel();
        self.cmd_tx
            .send(PdfCommand::Render {
                document,
                key,
                reply,
            })
            .await?;
        rx.await?
    }

    /// Releases a document. Never blocks; if the queue is full the document
    /// stays open until the engine shuts down.
    pub fn close(&self, document: DocumentId) {
        if let Err(e) = self.cmd_tx.try_send(PdfCommand::Close(document)) {
            tracing::warn!(%document, "failed to queue close: {}", e);
        }
    }
}

/// Starts the thread that owns PDFium and every open document.
pub fn spawn_engine_thread(cache_size: usize) -> EngineHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE);

    let spawned = std::thread::Builder::new()
        .name("pdf-engine".into())
        .spawn(move || match pdf_engine::bind_pdfium() {
            Ok(pdfium) => {
                tracing::info!("pdf engine started");
                serve(DocumentStore::new(&pdfium, cache_size), cmd_rx);
            }
            Err(e) => {
                tracing::error!("{}", e);
                serve(Unavailable(e), cmd_rx);
            }
        });

    if let Err(e) = spawned {
        tracing::error!("failed to start pdf engine thread: {}", e);
    }

    EngineHandle { cmd_tx }
}

/// Runs commands one at a time until every handle is dropped.
pub fn serve<B: Backend>(mut backend: B, mut cmd_rx: mpsc::Receiver<PdfCommand>) {
    while let Some(cmd) = cmd_rx.blocking_recv() {
        match cmd {
            PdfCommand::Open {
                document,
                bytes,
                reply,
            } => {
                let result = backend.open(document, bytes);
                match &result {
                    Ok(pages) => tracing::debug!(%document, pages, "opened"),
                    Err(e) => tracing::warn!(%document, "open failed: {}", e),
                }
                let _ = reply.send(result);
            }
            PdfCommand::Render {
                document,
                key,
                reply,
            } => {
                // Nobody is waiting for this frame any more.
                if reply.is_closed() {
                    continue;
                }
                let result = backend.render(document, &key);
                if let Err(e) = &result {
                    tracing::warn!(%document, page = key.page, "render failed: {}", e);
                }
                let _ = reply.send(result);
            }
            PdfCommand::Close(document) => {
                backend.close(document);
                tracing::debug!(%document, "closed");
            }
        }
    }
    tracing::info!("pdf engine stopped");
}
