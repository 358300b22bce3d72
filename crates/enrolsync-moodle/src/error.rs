use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoodleError {
    /// Transport-level failure (connect, timeout, TLS, decode).
    #[error("moodle request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The web service answered with an exception payload.
    #[error("moodle web service error in {function}: {message}")]
    Api { function: String, message: String },

    /// Required connection configuration is absent. Fatal at startup,
    /// before any processing begins.
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("invalid configuration for {name}: {value:?}")]
    InvalidConfig { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, MoodleError>;
