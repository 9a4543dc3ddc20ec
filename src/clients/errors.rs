use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request could not complete: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Search response had an empty body")]
    EmptyBody,

    #[error("Failed to decode search response, error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to decode artwork image, error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::Configuration(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
