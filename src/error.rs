use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("Document unavailable: {path}")]
    DocumentUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    IoError(#[from] std::io::Error),

    #[error("CSV error")]
    CsvError(#[from] csv::Error),

    #[error("Invalid selector `{0}`")]
    InvalidSelector(String),

    #[error("Invalid layout file")]
    LayoutError(#[from] serde_json::Error),

    #[error("Header has {headers} columns but records have {fields}")]
    HeaderMismatch { headers: usize, fields: usize },

    #[error("Fetch error")]
    FetchError(#[from] reqwest::Error),
}
