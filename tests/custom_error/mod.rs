#[derive(Debug, thiserror::Error)]
#[error("custom error occurred")]
pub struct CustomError;
