use thiserror::Error;

/// Typed runtime failures surfaced to the host.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Name '{name}' is not defined")]
    UndefinedName { name: String },
    #[error("'{type_name}' object has no attribute '{attribute}'")]
    UnknownAttribute {
        attribute: String,
        type_name: String,
    },
    #[error("'{type_name}' object is not a class instance")]
    NotAnInstance { type_name: String },
    #[error("Unsupported operand type(s) for {operator}: '{lhs}' and '{rhs}'")]
    UnsupportedOperands {
        operator: char,
        lhs: String,
        rhs: String,
    },
    #[error("Cannot compare '{lhs}' and '{rhs}'")]
    IncomparableTypes { lhs: String, rhs: String },
    #[error("Method '{method}' must return a bool, got '{type_name}'")]
    NonBoolComparisonResult { method: String, type_name: String },
    #[error("Method '{method}' with {arguments} argument(s) not found in class '{class}'")]
    UnknownMethod {
        method: String,
        arguments: usize,
        class: String,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Return outside of method body")]
    ReturnOutsideMethod,
    #[error("Failed to write program output: {message}")]
    OutputFailure { message: String },
}
