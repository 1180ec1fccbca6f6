use thiserror::Error;

pub type FeedResult<T> = Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Sheet \"{0}\" not found")]
    SourceNotFound(String),

    #[error("Workbook has no sheets")]
    NoSources,

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("View \"{0}\" not found")]
    ViewNotFound(String),

    #[error("View error: {0}")]
    View(String),
}

impl FeedError {
    /// True for failures that come from picking a tab rather than reading one.
    pub fn is_resolution(&self) -> bool {
        matches!(self, FeedError::SourceNotFound(_) | FeedError::NoSources)
    }
}
