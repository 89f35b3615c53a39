use thiserror::Error;

#[derive(Error, Debug)]
pub enum PgxError {
    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Invalid variant key: {0}")]
    InvalidVariantKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PgxError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        PgxError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PgxError>;
