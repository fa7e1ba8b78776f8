use thiserror::Error;

/// Fault classes used for host-side aggregation and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Memory access outside the addressable range.
    Memory,
    /// Decoder rejected an opcode or operand selector.
    Decode,
    /// A core value could not be constructed from the supplied input.
    Construction,
}

/// Fatal faults raised by the core. None of them are recovered internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// Read or write outside `[0, MEMORY_CAPACITY)`, including the second
    /// byte of a 16-bit little-endian read.
    #[error("memory address {address:#06x} is out of range")]
    AddressOutOfRange {
        /// Offending byte address.
        address: usize,
    },
    /// Opcode matched no pattern-table entry.
    #[error("opcode {0:#04x} is not implemented")]
    UnimplementedOpcode(u8),
    /// A register selector outside the 3-bit field range.
    #[error("invalid register selector {0}")]
    InvalidRegisterSelector(u8),
    /// Memory image supplied with a length other than the fixed capacity.
    #[error("memory image must be exactly {expected} bytes, got {actual}")]
    InvalidImageLength {
        /// Required image length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// Stack supplied with a pointer outside `0..STACK_DEPTH`.
    #[error("stack pointer {0} is outside the {depth} frames", depth = crate::STACK_DEPTH)]
    InvalidStackPointer(usize),
}

impl Fault {
    /// Returns the aggregation class for this fault.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::AddressOutOfRange { .. } => FaultClass::Memory,
            Self::UnimplementedOpcode(_) | Self::InvalidRegisterSelector(_) => FaultClass::Decode,
            Self::InvalidImageLength { .. } | Self::InvalidStackPointer(_) => {
                FaultClass::Construction
            }
        }
    }
}
