use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ClientError, Result};
use crate::models::ExtractedDocument;

/// A PDF library able to open a document from memory.
#[async_trait]
pub trait PdfParser: Send + Sync {
    async fn load(&self, bytes: Vec<u8>) -> Result<Box<dyn PdfPages>>;
}

/// An opened document whose pages can be read one at a time.
#[async_trait]
pub trait PdfPages: Send + Sync {
    fn num_pages(&self) -> usize;

    /// Text fragments of the 1-based page `number`, in reading order.
    async fn text_content(&self, number: usize) -> Result<Vec<String>>;
}

/// [`PdfParser`] backed by `pdf-extract`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractParser;

#[async_trait]
impl PdfParser for PdfExtractParser {
    async fn load(&self, bytes: Vec<u8>) -> Result<Box<dyn PdfPages>> {
        // pdf-extract is CPU bound and can panic on hostile input; a panic
        // surfaces here as a JoinError.
        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        })
        .await
        .map_err(|e| ClientError::DocumentParse(format!("PDF parser aborted: {e}")))?
        .map_err(|e| ClientError::DocumentParse(e.to_string()))?;

        Ok(Box::new(LoadedPages { pages }))
    }
}

struct LoadedPages {
    pages: Vec<String>,
}

#[async_trait]
impl PdfPages for LoadedPages {
    fn num_pages(&self) -> usize {
        self.pages.len()
    }

    async fn text_content(&self, number: usize) -> Result<Vec<String>> {
        let page = number
            .checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .ok_or_else(|| {
                ClientError::DocumentParse(format!(
                    "page {number} out of range (document has {} pages)",
                    self.pages.len()
                ))
            })?;

        Ok(page.split_whitespace().map(str::to_string).collect())
    }
}

/// Turns a PDF on disk into an [`ExtractedDocument`].
#[derive(Clone)]
pub struct DocumentProcessor {
    parser: Arc<dyn PdfParser>,
}

impl DocumentProcessor {
    pub fn new(parser: Arc<dyn PdfParser>) -> Self {
        Self { parser }
    }

    pub async fn extract_text(&self, file_path: &Path) -> Result<ExtractedDocument> {
        let filename = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());

        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|source| ClientError::FileRead {
                path: file_path.to_path_buf(),
                source,
            })?;

        self.extract_from_bytes(filename, bytes).await
    }

    pub async fn extract_from_bytes(
        &self,
        filename: String,
        bytes: Vec<u8>,
    ) -> Result<ExtractedDocument> {
        log::info!("Processing PDF: {} ({} bytes)", filename, bytes.len());

        let pdf = self.parser.load(bytes).await?;
        let mut document = ExtractedDocument::new(filename);

        // Pages are awaited one after another so the output order is stable.
        for number in 1..=pdf.num_pages() {
            let fragments = pdf.text_content(number).await?;
            document.push_page(fragments.join(" "));
        }

        log::info!(
            "Extracted {} pages from {}",
            document.page_count(),
            document.filename
        );
        Ok(document)
    }
}
