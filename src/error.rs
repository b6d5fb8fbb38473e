/// Every failure this crate can report.
///
/// Messages are boxed strings so the error stays `Send + Sync` and can travel inside
/// `anyhow::Error` on the caller side.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("there was an error with data formatting: {0}")]
    Formatting(Box<str>),
    #[error("referenced object is missing or has the wrong type: {0}")]
    Reference(Box<str>),
    #[error("not found: {0}")]
    NotFound(Box<str>),
    #[error("i/o operation error: {0:?}")]
    IO(#[from] std::io::Error),
    #[error("utf-8 encoding error: {0:?}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("error working with time: {0}")]
    Time(#[from] time::error::ComponentRange),
    #[error("error formatting time: {0}")]
    TimeFormat(#[from] time::error::Format),
}

impl Error {
    pub(crate) fn formatting(message: impl Into<Box<str>>) -> Self {
        Self::Formatting(message.into())
    }

    pub fn is_formatting(&self) -> bool {
        matches!(self, Self::Formatting(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Abstraction of the result type where the error is always an Error from this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
