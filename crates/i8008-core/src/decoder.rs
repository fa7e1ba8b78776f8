//! Opcode decode: bit-field extraction and table classification.

use crate::encoding::{classify_opcode, OpcodeEncoding};
use crate::{Fault, Flag, Flags, RegisterId};

/// Bit fields of a single opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpcodeFields {
    bits: [bool; 8],
    destination: u8,
    source: u8,
}

impl OpcodeFields {
    /// Splits `opcode` into its eight bits and the two 3-bit fields.
    #[must_use]
    pub const fn extract(opcode: u8) -> Self {
        let mut bits = [false; 8];
        let mut index = 0;
        while index < 8 {
            bits[index] = (opcode >> index) & 1 == 1;
            index += 1;
        }

        Self {
            bits,
            destination: (opcode >> 3) & 0x07,
            source: opcode & 0x07,
        }
    }

    /// Value of bit `index` (`0` is the least significant bit).
    ///
    /// Indices above 7 read as `false`.
    #[must_use]
    pub const fn bit(&self, index: usize) -> bool {
        index < 8 && self.bits[index]
    }

    /// Bits 5..3: destination register, condition or restart vector.
    #[must_use]
    pub const fn destination(&self) -> u8 {
        self.destination
    }

    /// Bits 2..0: source register.
    #[must_use]
    pub const fn source(&self) -> u8 {
        self.source
    }
}

/// Flag test encoded in bits 5..3 of conditional jump, call and return.
///
/// Bits 4..3 pick the flag (`C, Z, S, P`); bit 5 picks whether the flag must
/// be set (`1`) or clear (`0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Condition {
    /// Flag under test.
    pub flag: Flag,
    /// Required flag value.
    pub when_set: bool,
}

impl Condition {
    /// Reads the condition from bits 5..3 of an opcode.
    #[must_use]
    pub const fn from_fields(fields: &OpcodeFields) -> Self {
        let flag_index = ((fields.bit(4) as usize) << 1) | fields.bit(3) as usize;
        Self {
            flag: Flag::ALL[flag_index],
            when_set: fields.bit(5),
        }
    }

    /// Returns `true` when `flags` satisfy this condition.
    #[must_use]
    pub const fn holds(self, flags: Flags) -> bool {
        flags.get(self.flag) == self.when_set
    }
}

/// Classified opcode together with its raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedInstruction {
    /// Raw opcode byte.
    pub opcode: u8,
    /// Group selected by the pattern table.
    pub encoding: OpcodeEncoding,
    /// Extracted bit fields.
    pub fields: OpcodeFields,
}

impl DecodedInstruction {
    /// Register selected by bits 5..3.
    ///
    /// # Errors
    ///
    /// Propagates [`Fault::InvalidRegisterSelector`]; unreachable for a 3-bit field.
    pub const fn destination_register(&self) -> Result<RegisterId, Fault> {
        RegisterId::decode(self.fields.destination())
    }

    /// Register selected by bits 2..0.
    ///
    /// # Errors
    ///
    /// Propagates [`Fault::InvalidRegisterSelector`]; unreachable for a 3-bit field.
    pub const fn source_register(&self) -> Result<RegisterId, Fault> {
        RegisterId::decode(self.fields.source())
    }

    /// Condition encoded in bits 5..3.
    #[must_use]
    pub const fn condition(&self) -> Condition {
        Condition::from_fields(&self.fields)
    }
}

/// Stateless opcode decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Extracts fields from `opcode` and classifies it against the pattern table.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnimplementedOpcode`] when no table row matches.
    pub fn decode(opcode: u8) -> Result<DecodedInstruction, Fault> {
        let encoding = classify_opcode(opcode).ok_or(Fault::UnimplementedOpcode(opcode))?;

        Ok(DecodedInstruction {
            opcode,
            encoding,
            fields: OpcodeFields::extract(opcode),
        })
    }
}
