use std::path::PathBuf;

use reqwest::StatusCode;

/// Everything that can go wrong between picking a file and showing an answer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    DocumentParse(String),

    #[error("{0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! status: {}", .0.as_u16())]
    HttpStatus(StatusCode),

    #[error("{0}")]
    Api(String),

    #[error("invalid response body: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl ClientError {
    /// True for failures that happen after a request to the model was attempted.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_)
                | ClientError::HttpStatus(_)
                | ClientError::Api(_)
                | ClientError::MalformedResponse(_)
        )
    }

    /// The text shown to the user in place of an answer.
    pub fn user_message(&self, endpoint: &str) -> String {
        match self {
            ClientError::FileRead { .. } => format!("Error reading file: {self}"),
            ClientError::DocumentParse(_) => format!("Error processing PDF: {self}"),
            _ => format!(
                "Error: {self}. Make sure the model server is reachable at {endpoint}."
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "http://localhost:3000/v1/chat/completions";

    #[test]
    fn file_errors_are_reported_as_read_errors() {
        let err = ClientError::FileRead {
            path: PathBuf::from("missing.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(!err.is_query_error());
        assert_eq!(err.user_message(ENDPOINT), "Error reading file: not found");
    }

    #[test]
    fn parse_errors_mention_the_pdf() {
        let err = ClientError::DocumentParse("bad xref".to_string());
        assert_eq!(err.user_message(ENDPOINT), "Error processing PDF: bad xref");
    }

    #[test]
    fn status_errors_carry_the_code() {
        let err = ClientError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.is_query_error());
        let message = err.user_message(ENDPOINT);
        assert!(message.contains("503"), "{message}");
        assert!(message.ends_with(&format!("reachable at {ENDPOINT}.")));
    }

    #[test]
    fn api_errors_show_the_server_message() {
        let err = ClientError::Api("model not loaded".to_string());
        assert_eq!(
            err.user_message(ENDPOINT),
            format!("Error: model not loaded. Make sure the model server is reachable at {ENDPOINT}.")
        );
    }
}
