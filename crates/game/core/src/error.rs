//! Error classification shared by every delve-core error type.
//!
//! Each layer owns its own error enum next to the code that raises it
//! (`ActivityError` beside the behaviors, `TransitionError` beside the
//! activity state machine, `ManagerError` in the scheduler). They all report a
//! [`ErrorSeverity`] and a stable code through [`GameError`], so callers can
//! decide between retrying, rejecting and bailing out without matching on
//! concrete variants.

/// How a caller should react to an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The world may change so that the same request succeeds later.
    ///
    /// Examples: enemies next to a resting actor, a door blocked by an item
    Recoverable,

    /// The request itself is malformed and will keep failing.
    ///
    /// Examples: unknown actor, missing destination, resuming a running activity
    Validation,

    /// State and content disagree; points at a bug.
    ///
    /// Examples: a book whose recipe is not in the catalog
    Internal,

    /// The session cannot continue.
    ///
    /// Examples: no item oracle wired in, no living player
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True for the two severities that indicate a defect rather than bad input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

impl core::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification implemented by every error enum in the crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier such as `ACTIVITY_ENEMIES_NEARBY`, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_covers_fatal() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert_eq!(ErrorSeverity::Validation.to_string(), "validation");
    }
}
