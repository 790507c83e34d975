use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RotcoilResult<T> = Result<T, RotcoilError>;
pub type ParserResult<T> = RotcoilResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// Fatal failure raised while building a measurement or running a physics
/// routine. The placeholder is a stable dotted code (`INPUT.MULTIPOLE_BLOCK`)
/// that callers can match on; the message names the offending source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotcoilError {
    category: ErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl RotcoilError {
    pub fn new(
        category: ErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InputValidationError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for RotcoilError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for RotcoilError {}
