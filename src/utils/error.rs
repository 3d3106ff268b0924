use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Patient {name} already exists")]
    DuplicatePatient { name: String },

    #[error("Patient {name} does not exist")]
    PatientNotFound { name: String },

    #[error("Medical staff {member} does not exist in the care team of patient {patient}")]
    MemberNotFound { patient: String, member: String },

    #[error("Malformed name '{name}': expected first and last name separated by a space")]
    MalformedName { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Script parsing error: {0}")]
    ScriptParseError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Reported to the caller; the registry is unchanged and work continues.
    Low,
    High,
    Critical,
}

impl RegistryError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RegistryError::DuplicatePatient { .. }
            | RegistryError::PatientNotFound { .. }
            | RegistryError::MemberNotFound { .. }
            | RegistryError::MalformedName { .. } => ErrorSeverity::Low,
            RegistryError::ScriptParseError(_)
            | RegistryError::SerializationError(_)
            | RegistryError::ConfigError { .. }
            | RegistryError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            RegistryError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// True for failures of a single registry operation, which never leave partial state.
    pub fn is_recoverable(&self) -> bool {
        self.severity() == ErrorSeverity::Low
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RegistryError::DuplicatePatient { .. } => {
                "Remove the existing patient first if the record must be replaced"
            }
            RegistryError::PatientNotFound { .. } => "Check the patient's full name",
            RegistryError::MemberNotFound { .. } => {
                "Check the staff member's full name against the patient's care team"
            }
            RegistryError::MalformedName { .. } => "Use the form 'First Last'",
            RegistryError::IoError(_) => "Make sure the script file exists and is readable",
            RegistryError::ScriptParseError(_) => "Make sure the script is valid TOML",
            RegistryError::SerializationError(_) => "Retry with --format text",
            RegistryError::ConfigError { .. } | RegistryError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the session script"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
