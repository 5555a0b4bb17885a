//! Permission result record and grant code conventions.
//!
//! The host reports one outcome code per requested permission, index-aligned
//! with the permission list. Code `0` means granted; any nonzero code means
//! denied. Codes are carried verbatim and never rewritten.

use serde::{Deserialize, Serialize};

/// Host convention for a granted permission.
pub const PERMISSION_GRANTED: i32 = 0;

/// Classified view over a raw grant code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStatus {
    /// The permission was granted (code 0).
    Granted,
    /// The permission was denied; the original nonzero code is kept.
    Denied(i32),
}

impl GrantStatus {
    /// Classify a raw host code.
    pub const fn from_code(code: i32) -> Self {
        if code == PERMISSION_GRANTED {
            Self::Granted
        } else {
            Self::Denied(code)
        }
    }

    /// The raw code this status was built from.
    pub const fn as_code(&self) -> i32 {
        match self {
            Self::Granted => PERMISSION_GRANTED,
            Self::Denied(code) => *code,
        }
    }

    /// Whether this status represents a granted permission.
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// One completed permission flow, as delivered by the host and stored in
/// the result slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResult {
    /// Opaque identifier the original request was issued with.
    pub request_code: i32,
    /// Requested permission identifiers, host order preserved.
    pub permissions: Vec<String>,
    /// Per-permission outcome codes, index-aligned with `permissions`.
    pub grant_results: Vec<i32>,
    /// Milliseconds since the Unix epoch at write time.
    pub timestamp_ms: i64,
}

impl PermissionResult {
    /// Whether the two sequences have matching lengths.
    ///
    /// The host contract guarantees alignment, but a violation is stored
    /// as-is rather than rejected, so readers can check before zipping.
    pub const fn is_aligned(&self) -> bool {
        self.permissions.len() == self.grant_results.len()
    }

    /// Iterate permission/status pairs in host order.
    ///
    /// Stops at the shorter sequence when the record is misaligned.
    pub fn outcomes(&self) -> impl Iterator<Item = (&str, GrantStatus)> {
        self.permissions
            .iter()
            .zip(&self.grant_results)
            .map(|(permission, &code)| (permission.as_str(), GrantStatus::from_code(code)))
    }

    /// Status of a single permission, if it appears in the record.
    pub fn status_of(&self, permission: &str) -> Option<GrantStatus> {
        let index = self.permissions.iter().position(|p| p == permission)?;
        self.grant_results
            .get(index)
            .map(|&code| GrantStatus::from_code(code))
    }

    /// True when the record is non-empty, aligned, and every code is granted.
    pub fn all_granted(&self) -> bool {
        !self.permissions.is_empty()
            && self.is_aligned()
            && self
                .grant_results
                .iter()
                .all(|&code| code == PERMISSION_GRANTED)
    }
}
