use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{}", error_chain(.0))]
    HttpError(#[from] reqwest::Error),

    #[error("Status code {0}")]
    StatusError(u16),

    #[error("Parsing error: {0}")]
    ParseError(String),

    #[error("Runtime error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error")]
    JsonError(#[from] serde_json::Error),
}

/// Coarse classification of a failed crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure or non-200 response
    Fetch,
    /// The response body could not be consumed by the parser
    Parse,
    /// The entry list could not be serialized
    Encode,
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::HttpError(_) | ScanError::StatusError(_) | ScanError::IoError(_) => {
                ErrorKind::Fetch
            }
            ScanError::ParseError(_) => ErrorKind::Parse,
            ScanError::JsonError(_) => ErrorKind::Encode,
        }
    }
}

/// Render an error together with every cause in its `source()` chain,
/// joined with `": "`.
///
/// reqwest keeps the interesting part (refused connection, DNS or TLS
/// failure, truncated body) in the sources, not in the top-level message.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.1
                .as_deref()
                .map(|l| l as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_status_message_embeds_code() {
        let err = ScanError::StatusError(404);
        assert_eq!(err.to_string(), "Status code 404");
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[test]
    fn test_parse_message_is_prefixed() {
        let err = ScanError::ParseError("unexpected EOF".to_string());
        assert_eq!(err.to_string(), "Parsing error: unexpected EOF");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_encode_message_is_fixed() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ScanError::from(source);
        assert_eq!(err.to_string(), "JSON error");
        assert_eq!(err.kind(), ErrorKind::Encode);
    }

    #[test]
    fn test_error_chain_joins_causes() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer(
                "tcp connect error",
                Some(Box::new(Layer("Connection refused (os error 111)", None))),
            ))),
        );
        assert_eq!(
            error_chain(&err),
            "error sending request: tcp connect error: Connection refused (os error 111)"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = Layer("tcp connect error: refused", Some(Box::new(Layer("refused", None))));
        assert_eq!(error_chain(&err), "tcp connect error: refused");
    }
}
