use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServizoError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] servizo_catalog::DataError),
    #[error("Search error: {0}")]
    Search(#[from] crate::search::SearchError),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Init Logging error: {0}")]
    InitLoggingError(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServizoError>;
