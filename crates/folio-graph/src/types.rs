//! Identifier types shared by every stage of the history pipeline.
//!
//! Branch names and commit ids arrive from the backend as plain strings. They
//! are validated once at the boundary so the linker, deduplicator and
//! sequencer can compare them without re-checking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// BranchName
// ---------------------------------------------------------------------------

/// A validated branch name.
///
/// Branch names must be non-empty, must not contain whitespace or control
/// characters, must not start with `-` and must not contain `..`.
/// Examples: `master`, `feature/intro`, `draft-2`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// The maximum length of a branch name.
    pub const MAX_LEN: usize = 255;

    /// The conventional trunk branch.
    pub const MASTER: &'static str = "master";

    /// The `master` branch, the default base for history graphs.
    #[must_use]
    pub fn master() -> Self {
        Self(Self::MASTER.to_owned())
    }

    /// Create a new `BranchName`, validating format.
    ///
    /// # Errors
    /// Returns an error if the name is empty, too long, or malformed.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        Self::validate(s)?;
        Ok(Self(s.to_owned()))
    }

    /// Return the branch name as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        validate_token(IdKind::BranchName, s, Self::MAX_LEN)?;
        if s.starts_with('-') {
            return Err(ValidationError::new(
                IdKind::BranchName,
                s,
                "branch name must not start with a hyphen",
            ));
        }
        if s.contains("..") {
            return Err(ValidationError::new(
                IdKind::BranchName,
                s,
                "branch name must not contain '..'",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BranchName {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BranchName {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

// ---------------------------------------------------------------------------
// CommitId
// ---------------------------------------------------------------------------

/// An opaque commit identifier as reported by the backend.
///
/// The backend hands out full git object ids today, but nothing in the graph
/// pipeline depends on the format beyond equality, so only basic sanity is
/// checked: non-empty, bounded, no whitespace or control characters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommitId(String);

impl CommitId {
    /// The maximum length of a commit id.
    pub const MAX_LEN: usize = 128;

    /// Length of the abbreviated form returned by [`Self::short`].
    pub const SHORT_LEN: usize = 7;

    /// Create a new `CommitId`, validating format.
    ///
    /// # Errors
    /// Returns an error if the id is empty, too long, or contains whitespace.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validate_token(IdKind::CommitId, s, Self::MAX_LEN)?;
        Ok(Self(s.to_owned()))
    }

    /// Return the full id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated id for display (first [`Self::SHORT_LEN`] characters).
    #[must_use]
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(Self::SHORT_LEN)
            .map_or(self.0.as_str(), |(end, _)| &self.0[..end])
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommitId {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CommitId {
    type Error = ValidationError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate_token(IdKind::CommitId, &s, Self::MAX_LEN)?;
        Ok(Self(s))
    }
}

impl From<CommitId> for String {
    fn from(id: CommitId) -> Self {
        id.0
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_token(kind: IdKind, s: &str, max_len: usize) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::new(kind, s, "must not be empty"));
    }
    if s.len() > max_len {
        return Err(ValidationError::new(
            kind,
            s,
            format!("must be at most {max_len} bytes, got {}", s.len()),
        ));
    }
    if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::new(
            kind,
            s,
            "must not contain whitespace or control characters",
        ));
    }
    Ok(())
}

/// The kind of identifier that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// A [`BranchName`].
    BranchName,
    /// A [`CommitId`].
    CommitId,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BranchName => write!(f, "branch name"),
            Self::CommitId => write!(f, "commit id"),
        }
    }
}

/// A validation error for branch names and commit ids.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}: {reason}")]
pub struct ValidationError {
    /// What kind of value was being validated.
    pub kind: IdKind,
    /// The invalid value.
    pub value: String,
    /// Human-readable explanation.
    pub reason: String,
}

impl ValidationError {
    fn new(kind: IdKind, value: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.to_owned(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
