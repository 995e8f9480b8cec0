use thiserror::Error;

/// Errors surfaced by the dashboard core.
///
/// Absent data is never an error here: a fetch that has not completed shows up
/// as `None` / an empty series on the read side. Contract violations such as
/// double activation or an out-of-range coordinate fail fast with an assertion
/// instead of returning a variant.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed metric payload: {0}")]
    MalformedPayload(String),

    #[error("invalid time window: {0}")]
    InvalidWindow(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
}
