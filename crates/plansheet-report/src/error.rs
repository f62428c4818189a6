use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("workbook write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("workbook read error: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("workbook {path} has no worksheets")]
    MissingSheet { path: String },

    #[error("unexpected header in {path}: column {column} is \"{found}\", expected \"{expected}\"")]
    UnexpectedHeader {
        path: String,
        column: usize,
        found: String,
        expected: String,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid mail address \"{address}\": {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("failed to build mail message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
