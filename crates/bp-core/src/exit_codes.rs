//! Exit codes for the bayesprop CLI.
//!
//! Exit code ranges:
//! - 0: success
//! - 10-19: user errors (bad arguments or inputs)
//! - 20-29: internal and I/O errors

/// Exit codes for bayesprop commands.
///
/// Stable contract for scripts; changes require a major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed.
    Clean = 0,

    /// Invalid arguments or inputs that failed validation.
    ArgsError = 10,

    /// Internal error (bug, please report).
    InternalError = 20,

    /// Config file unreadable or unparsable, or output could not be written.
    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Clean
    }

    /// Codes 10-19: fixable by changing the invocation.
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&self.as_i32())
    }

    /// Codes 20-29.
    pub fn is_internal_error(self) -> bool {
        self.as_i32() >= 20
    }

    /// Name used in JSON error payloads.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        assert!(ExitCode::Clean.is_success());
        assert!(ExitCode::ArgsError.is_user_error());
        assert!(!ExitCode::IoError.is_user_error());
        assert!(ExitCode::IoError.is_internal_error());
        assert_eq!(i32::from(ExitCode::IoError), 21);
        assert_eq!(ExitCode::ArgsError.to_string(), "ERR_ARGS (10)");
    }
}
