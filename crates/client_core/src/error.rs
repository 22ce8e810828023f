use thiserror::Error;

/// Client-side failure taxonomy. `Validation` and `Gate` are raised before
/// any network call; `Transport` and `Server` surface after one.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Input rejected at the client boundary; the form stays editable.
    #[error("validation failed: {0}")]
    Validation(String),
    /// A workflow precondition was not met: predicting before a successful
    /// training, or doubling up on an attempt that is still pending.
    #[error("not permitted: {0}")]
    Gate(String),
    /// The request never reached the server.
    #[error("request could not reach the server: {0}")]
    Transport(String),
    /// The server answered with a failure.
    #[error("server rejected the request: {0}")]
    Server(String),
}

impl WorkflowError {
    /// The bare message, without the variant prefix. Resolution messages and
    /// the session's `last_error` record carry this form.
    pub fn message(&self) -> &str {
        match self {
            WorkflowError::Validation(msg)
            | WorkflowError::Gate(msg)
            | WorkflowError::Transport(msg)
            | WorkflowError::Server(msg) => msg,
        }
    }
}
