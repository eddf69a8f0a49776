pub mod chat_service;
pub mod config;
pub mod document_processor;
pub mod error;
pub mod models;
pub mod query_service;

pub use chat_service::ChatService;
pub use config::ClientConfig;
pub use document_processor::{DocumentProcessor, PdfExtractParser, PdfPages, PdfParser};
pub use error::ClientError;
pub use models::*;
pub use query_service::{Outcome, QueryService};
