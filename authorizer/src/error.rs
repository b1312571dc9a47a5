use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorizerError {
    #[error("principal {0} lacks admin standing to modify grants")]
    Unauthorized(String),

    #[error("storage error: {0}")]
    Storage(String),
}
