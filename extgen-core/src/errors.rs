use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),

    #[error("host sink rejected `{key}`: {reason}")]
    Sink { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
