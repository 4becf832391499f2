//! Commit status kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The only outcome values a commit status may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Pending,
    Failure,
    Error,
}

impl StatusKind {
    pub fn all() -> &'static [StatusKind] {
        &[
            StatusKind::Success,
            StatusKind::Pending,
            StatusKind::Failure,
            StatusKind::Error,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Pending => "pending",
            StatusKind::Failure => "failure",
            StatusKind::Error => "error",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        StatusKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == lowered)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_owned()))
    }
}

/// Check `status` against the allow-list, case-insensitively.
///
/// The caller keeps sending the original spelling; the returned kind is only
/// the normalised form.
pub fn validate_status(status: &str) -> Result<StatusKind, ValidationError> {
    status.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("success", StatusKind::Success)]
    #[case("SUCCESS", StatusKind::Success)]
    #[case("Pending", StatusKind::Pending)]
    #[case("fAiLuRe", StatusKind::Failure)]
    #[case("error", StatusKind::Error)]
    fn accepts_allowed_kinds_in_any_case(#[case] input: &str, #[case] expected: StatusKind) {
        assert_eq!(validate_status(input), Ok(expected));
    }

    #[rstest]
    #[case("ok")]
    #[case("succeeded")]
    #[case(" success")]
    #[case("cancelled")]
    fn rejects_everything_else(#[case] input: &str) {
        assert_eq!(
            validate_status(input),
            Err(ValidationError::UnknownStatus(input.to_owned()))
        );
    }

    #[test]
    fn unknown_status_message_names_the_value() {
        let err = validate_status("bogus").unwrap_err();
        assert_eq!(err.to_string(), "unknown status: bogus");
    }

    #[test]
    fn displays_lowercase() {
        assert_eq!(StatusKind::Failure.to_string(), "failure");
    }
}
