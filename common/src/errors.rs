use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Unknown time unit `{0}`")]
    UnknownUnit(String),
    #[error("Invalid argument error. {0}")]
    InvalidArgument(String),
}

impl CommonError {
    /// Is this an unknown unit error for `unit` ?
    pub fn is_unknown_unit(&self, unit: &str) -> bool {
        match self {
            CommonError::UnknownUnit(u) => u == unit,
            _ => false,
        }
    }
}
