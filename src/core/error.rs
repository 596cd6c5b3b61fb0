use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    DivisionByZero,
    InvalidArgument(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::DivisionByZero => write!(f, "Division by zero: divisor has zero magnitude"),
            CoreError::InvalidArgument(msg) => write!(f, "Invalid Argument: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl CoreError {
    pub fn invalid_argument(message: &str) -> Self { CoreError::InvalidArgument(message.to_string()) }
}
