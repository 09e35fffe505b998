use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine home directory for the browser profile")]
    NoHomeDir,

    #[error("Invalid target URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
