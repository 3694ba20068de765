use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("section not registered: {0}")]
    NotRegistered(&'static str),

    #[error("section already registered: {0}")]
    AlreadyRegistered(&'static str),

    #[error("invalid: {0}")]
    Invalid(&'static str),

    #[error("settings lock poisoned")]
    Poisoned,
}
