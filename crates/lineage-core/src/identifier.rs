//! Member identifiers.
//!
//! This module provides the [`MemberId`] type. Identifiers are supplied by the
//! caller, must be unique within a tree, and are totally ordered; every
//! tie-break in inference and layout falls back to ascending id order.

use std::{fmt, num::ParseIntError, str::FromStr};

/// Caller-supplied identity of a family member.
///
/// # Examples
///
/// ```
/// use lineage_core::identifier::MemberId;
///
/// let grandfather = MemberId::new(1);
/// let father = MemberId::from(3);
/// assert!(grandfather < father);
/// assert_eq!(father.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(u64);

impl MemberId {
    /// Creates a `MemberId` from its numeric value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value of this identifier.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for MemberId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MemberId> for svg::node::Value {
    fn from(id: MemberId) -> Self {
        Self::from(id.0.to_string())
    }
}
