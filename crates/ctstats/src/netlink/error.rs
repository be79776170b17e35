//! Error types for statistics decoding.

use std::io;

/// Result type for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding conntrack statistics.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Message payload is too short to hold the netfilter header.
    #[error("expected at least {expected} bytes in netlink message payload")]
    MalformedMessage {
        /// Minimum payload length.
        expected: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// Attribute type is not part of the record's attribute table.
    #[error("attribute type '{0}' unknown")]
    UnknownAttribute(u16),

    /// Attribute payload is shorter than its field requires.
    #[error(
        "attribute type '{attr_type}' payload too short: expected at least {expected} bytes, got {actual}"
    )]
    ShortPayload {
        /// The attribute type code.
        attr_type: u16,
        /// Minimum payload length for the field.
        expected: usize,
        /// Actual payload length.
        actual: usize,
    },

    /// Invalid attribute framing.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Netlink header was truncated.
    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Expected header length.
        expected: usize,
        /// Actual bytes available.
        actual: usize,
    },

    /// Invalid netlink message framing.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Kernel answered the request with an error.
    #[error("kernel error: {message} (errno {errno})")]
    Kernel {
        /// The errno value from the kernel.
        errno: i32,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Create a kernel error from an errno value as found in `nlmsgerr`.
    ///
    /// The kernel stores a negated errno; a value with no positive
    /// counterpart is reported as an invalid message.
    pub fn from_errno(errno: i32) -> Self {
        match errno.checked_neg() {
            Some(errno) => Self::Kernel {
                errno,
                message: io::Error::from_raw_os_error(errno).to_string(),
            },
            None => Self::InvalidMessage(format!("nlmsgerr errno {errno} out of range")),
        }
    }

    /// Check if this error comes from broken framing or an out-of-schema
    /// payload rather than from the kernel refusing the request.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, Self::Kernel { .. })
    }

    /// Get the errno value if this is a kernel error.
    pub fn errno(&self) -> Option<i32> {
        match self {
            Self::Kernel { errno, .. } => Some(*errno),
            _ => None,
        }
    }
}
