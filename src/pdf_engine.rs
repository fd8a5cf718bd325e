use crate::error::{Result, ViewerError};
use crate::models::DocumentId;
use crate::render_guard::RenderKey;
use pdfium_render::prelude::*;
use quick_cache::sync::Cache;
use std::collections::HashMap;
use std::sync::Arc;

/// RGBA pixels of one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<Vec<u8>>,
}

/// What the engine thread needs from a PDF backend.
pub trait Backend {
    /// Parses a document and returns its page count.
    fn open(&mut self, id: DocumentId, bytes: Vec<u8>) -> Result<usize>;
    fn render(&self, id: DocumentId, key: &RenderKey) -> Result<RenderedPage>;
    fn close(&mut self, id: DocumentId);
}

pub fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| ViewerError::PdfiumUnavailable(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

pub const fn render_rotation(degrees: u16) -> PdfPageRenderRotation {
    match (degrees % 360) / 90 {
        1 => PdfPageRenderRotation::Degrees90,
        2 => PdfPageRenderRotation::Degrees180,
        3 => PdfPageRenderRotation::Degrees270,
        _ => PdfPageRenderRotation::None,
    }
}

// page, rotation, target width
type FrameKey = (usize, u16, u32);

fn frame_key(key: &RenderKey) -> FrameKey {
    (key.page, key.rotation, key.target_width())
}

struct OpenDocument<'a> {
    document: PdfDocument<'a>,
    page_count: usize,
    frames: Cache<FrameKey, RenderedPage>,
}

/// Documents parsed by PDFium. Lives on the engine thread.
pub struct DocumentStore<'a> {
    pdfium: &'a Pdfium,
    documents: HashMap<DocumentId, OpenDocument<'a>>,
    cache_size: usize,
}

impl<'a> DocumentStore<'a> {
    pub fn new(pdfium: &'a Pdfium, cache_size: usize) -> Self {
        Self {
            pdfium,
            documents: HashMap::new(),
            cache_size: cache_size.max(1),
        }
    }
}

impl Backend for DocumentStore<'_> {
    fn open(&mut self, id: DocumentId, bytes: Vec<u8>) -> Result<usize> {
        let document = self
            .pdfium
            .load_pdf_from_byte_vec(bytes, None)
            .map_err(|e| ViewerError::Parse(e.to_string()))?;

        let page_count = document.pages().len() as usize;
        if page_count == 0 {
            return Err(ViewerError::Parse("document has no pages".to_string()));
        }

        self.documents.insert(
            id,
            OpenDocument {
                document,
                page_count,
                frames: Cache::new(self.cache_size),
            },
        );
        Ok(page_count)
    }

    fn render(&self, id: DocumentId, key: &RenderKey) -> Result<RenderedPage> {
        let open = self
            .documents
            .get(&id)
            .ok_or(ViewerError::UnknownDocument(id.0))?;

        if key.page == 0 || key.page > open.page_count {
            return Err(ViewerError::PageOutOfBounds {
                page: key.page,
                page_count: open.page_count,
            });
        }

        let cache_key = frame_key(key);
        if let Some(cached) = open.frames.get(&cache_key) {
            return Ok(cached);
        }

        let render_err = |e: PdfiumError| ViewerError::Render {
            page: key.page,
            reason: e.to_string(),
        };

        let index = u16::try_from(key.page - 1).map_err(|_| ViewerError::PageOutOfBounds {
            page: key.page,
            page_count: open.page_count,
        })?;
        let page = open.document.pages().get(index).map_err(render_err)?;

        let width = i32::try_from(key.target_width()).unwrap_or(i32::MAX);
        let config = PdfRenderConfig::new()
            .set_target_width(width)
            .rotate(render_rotation(key.rotation), true);

        let bitmap = page.render_with_config(&config).map_err(render_err)?;
        let rendered = RenderedPage {
            width: u32::try_from(bitmap.width()).unwrap_or(0),
            height: u32::try_from(bitmap.height()).unwrap_or(0),
            pixels: Arc::new(bitmap.as_rgba_bytes()),
        };

        open.frames.insert(cache_key, rendered.clone());
        Ok(rendered)
    }

    fn close(&mut self, id: DocumentId) {
        self.documents.remove(&id);
    }
}

/// Stand-in used when PDFium could not be loaded; every request fails with
/// the binding error.
pub struct Unavailable(pub ViewerError);

impl Backend for Unavailable {
    fn open(&mut self, _id: DocumentId, _bytes: Vec<u8>) -> Result<usize> {
        Err(self.0.clone())
    }

    fn render(&self, _id: DocumentId, _key: &RenderKey) -> Result<RenderedPage> {
        Err(self.0.clone())
    }

    fn close(&mut self, _id: DocumentId) {}
}
