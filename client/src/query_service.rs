use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chat_service::ChatService;
use crate::document_processor::DocumentProcessor;
use crate::error::ClientError;

pub const NO_FILE_SELECTED: &str = "Please select a PDF file.";

/// What ends up in the output region after one extraction-and-query cycle.
#[derive(Debug)]
pub enum Outcome {
    Answer(String),
    Failed { error: ClientError, message: String },
}

impl Outcome {
    pub fn text(&self) -> &str {
        match self {
            Outcome::Answer(answer) => answer,
            Outcome::Failed { message, .. } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Answer(_))
    }
}

/// Read → extract → query pipeline.
///
/// Calls are serialized: a second [`QueryService::run`] waits for the one in
/// flight instead of interleaving with it.
pub struct QueryService {
    document_processor: DocumentProcessor,
    chat_service: Arc<ChatService>,
    in_flight: Mutex<()>,
}

impl QueryService {
    pub fn new(document_processor: DocumentProcessor, chat_service: Arc<ChatService>) -> Self {
        Self {
            document_processor,
            chat_service,
            in_flight: Mutex::new(()),
        }
    }

    pub async fn run(&self, file_path: &Path) -> Outcome {
        let _guard = self.in_flight.lock().await;
        let start_time = std::time::Instant::now();

        let outcome = match self.extract_and_query(file_path).await {
            Ok(answer) => Outcome::Answer(answer),
            Err(error) => {
                if error.is_query_error() {
                    log::error!("API Error: {error:?}");
                } else {
                    log::error!("PDF Error for {}: {error:?}", file_path.display());
                }
                let message = error.user_message(self.chat_service.config().endpoint.as_str());
                Outcome::Failed { error, message }
            }
        };

        log::info!(
            "Finished {} in {} ms",
            file_path.display(),
            start_time.elapsed().as_millis()
        );
        outcome
    }

    /// Runs every file in turn and writes each outcome to `out`. With more
    /// than one file, each outcome is headed by `== {path}`. An empty list
    /// writes the file prompt. Returns whether every file produced an answer.
    pub async fn run_files<W: Write>(
        &self,
        files: &[PathBuf],
        out: &mut W,
    ) -> std::io::Result<bool> {
        if files.is_empty() {
            writeln!(out, "{NO_FILE_SELECTED}")?;
            return Ok(false);
        }

        let show_names = files.len() > 1;
        let mut all_ok = true;
        for file in files {
            let outcome = self.run(file).await;
            all_ok &= outcome.is_success();

            if show_names {
                writeln!(out, "== {}", file.display())?;
            }
            writeln!(out, "{}", outcome.text())?;
        }
        out.flush()?;
        Ok(all_ok)
    }

    async fn extract_and_query(&self, file_path: &Path) -> Result<String, ClientError> {
        let document = self.document_processor.extract_text(file_path).await?;
        self.chat_service.query_model(&document.render()).await
    }
}
