use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TitanError {
    /// Density matrix is not square, not Hermitian, not trace-1 or not PSD.
    InvalidState(String),
    /// Amplitude vector length does not match `2^N`.
    InvalidDimension { expected: Option<usize>, actual: usize },
    /// Zero-qubit input where at least one qubit is required.
    DegenerateInput(String),
    /// The circuit oracle could not evaluate the requested angle.
    OracleFailure(String),
    /// Optimizer or run settings rejected before the loop starts.
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TitanError>;

impl fmt::Display for TitanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitanError::InvalidState(msg) => write!(f, "Invalid State: {}", msg),
            TitanError::InvalidDimension { expected: Some(e), actual } => {
                write!(f, "Invalid Dimension: expected {} amplitudes, got {}", e, actual)
            }
            TitanError::InvalidDimension { expected: None, actual } => {
                write!(f, "Invalid Dimension: qubit count too large for {} amplitudes", actual)
            }
            TitanError::DegenerateInput(msg) => write!(f, "Degenerate Input: {}", msg),
            TitanError::OracleFailure(msg) => write!(f, "Oracle Failure: {}", msg),
            TitanError::InvalidConfig(msg) => write!(f, "Invalid Config: {}", msg),
        }
    }
}

impl std::error::Error for TitanError {}

impl TitanError {
    pub fn invalid_state(message: &str) -> Self { TitanError::InvalidState(message.to_string()) }
    pub fn degenerate(message: &str) -> Self { TitanError::DegenerateInput(message.to_string()) }
    pub fn oracle(message: &str) -> Self { TitanError::OracleFailure(message.to_string()) }
    pub fn config(message: &str) -> Self { TitanError::InvalidConfig(message.to_string()) }
}
