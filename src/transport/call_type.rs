//! Call types and host acceptance.

use std::fmt;

/// Classification of a call as a read or a write.
///
/// The call type selects which hosts may receive the call and which base
/// timeout applies to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallType {
    /// Search and retrieval calls.
    Read,
    /// Indexing and settings calls.
    Write,
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// The call types a host accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Accept {
    /// Read-only host.
    Read,
    /// Write-only host.
    Write,
    /// Host serving both reads and writes.
    #[default]
    ReadWrite,
}

impl Accept {
    /// Returns `true` if a host with this mask may receive `call_type`.
    #[must_use]
    pub const fn accepts(self, call_type: CallType) -> bool {
        matches!(
            (self, call_type),
            (Self::ReadWrite, _) | (Self::Read, CallType::Read) | (Self::Write, CallType::Write)
        )
    }
}

impl From<CallType> for Accept {
    fn from(call_type: CallType) -> Self {
        match call_type {
            CallType::Read => Self::Read,
            CallType::Write => Self::Write,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_accepts_everything() {
        assert!(Accept::ReadWrite.accepts(CallType::Read));
        assert!(Accept::ReadWrite.accepts(CallType::Write));
    }

    #[test]
    fn test_single_masks_only_accept_their_call_type() {
        assert!(Accept::Read.accepts(CallType::Read));
        assert!(!Accept::Read.accepts(CallType::Write));
        assert!(Accept::Write.accepts(CallType::Write));
        assert!(!Accept::Write.accepts(CallType::Read));
    }

    #[test]
    fn test_accept_from_call_type() {
        assert_eq!(Accept::from(CallType::Read), Accept::Read);
        assert_eq!(Accept::from(CallType::Write), Accept::Write);
    }

    #[test]
    fn test_call_type_display() {
        assert_eq!(CallType::Read.to_string(), "read");
        assert_eq!(CallType::Write.to_string(), "write");
    }
}
