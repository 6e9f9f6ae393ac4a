use thiserror::Error;

/// Reasons the canvas could not be mounted. Never fatal to the page:
/// the effect just does not render.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("element `{id}` is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("failed to register `{kind}` listener: {message}")]
    Listener { kind: &'static str, message: String },
    #[error("failed to schedule animation frame: {0}")]
    Schedule(String),
}
