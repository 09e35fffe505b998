use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Browser launch or initial navigation failed. Fatal: the caller
    /// restarts the process rather than retrying.
    #[error("Session init failed: {0}")]
    SessionInit(String),

    /// A required UI control did not appear within its bound.
    #[error("Element '{selector}' did not become visible within {waited_ms} ms")]
    ElementNotFound { selector: String, waited_ms: u64 },

    /// No new transcript entry appeared after send; the submission most
    /// likely did not register.
    #[error("No reply appeared within {0} ms")]
    ResponseTimeout(u64),

    /// The native file chooser never opened, or its event stream died.
    #[error("File chooser error: {0}")]
    FileChooser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
