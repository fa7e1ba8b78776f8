use std::fmt;

use crate::Fault;

/// Number of named 8-bit register slots (`A, B, C, D, E, H, L`).
pub const NAMED_REGISTER_COUNT: usize = 7;

/// Named 8-bit register slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    H = 5,
    L = 6,
}

impl Register {
    /// Ordered list of all named slots, in selector order.
    pub const ALL: [Self; NAMED_REGISTER_COUNT] =
        [Self::A, Self::B, Self::C, Self::D, Self::E, Self::H, Self::L];

    /// Returns the array index for this register (`0..=6`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter assembler name.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::H => 'H',
            Self::L => 'L',
        }
    }
}

/// Register identifier selected by a 3-bit opcode field.
///
/// Selector `7` names the `H:L` pair, which is only ever read as a memory
/// pointer and has no storage of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RegisterId {
    /// One of the seven byte slots.
    Named(Register),
    /// The derived `H:L` pair.
    Pair,
}

impl RegisterId {
    /// Decodes a 3-bit selector: `0..=6` map to `A..L`, `7` to the pair.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidRegisterSelector`] for any value above `7`.
    pub const fn decode(bits: u8) -> Result<Self, Fault> {
        match bits {
            0 => Ok(Self::Named(Register::A)),
            1 => Ok(Self::Named(Register::B)),
            2 => Ok(Self::Named(Register::C)),
            3 => Ok(Self::Named(Register::D)),
            4 => Ok(Self::Named(Register::E)),
            5 => Ok(Self::Named(Register::H)),
            6 => Ok(Self::Named(Register::L)),
            7 => Ok(Self::Pair),
            _ => Err(Fault::InvalidRegisterSelector(bits)),
        }
    }

    /// Returns the byte slot, or `None` for the pair.
    #[must_use]
    pub const fn named(self) -> Option<Register> {
        match self {
            Self::Named(register) => Some(register),
            Self::Pair => None,
        }
    }

    /// Assembler name; the pair is written `M` because it addresses memory.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Named(register) => register.letter(),
            Self::Pair => 'M',
        }
    }
}

/// Seven-slot 8-bit register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Registers {
    slots: [u8; NAMED_REGISTER_COUNT],
}

impl Registers {
    /// Reads a named slot.
    #[must_use]
    pub const fn get(&self, register: Register) -> u8 {
        self.slots[register.index()]
    }

    /// Reads the `H:L` pair as `(H << 8) | L`.
    #[must_use]
    pub const fn pair(&self) -> u16 {
        u16::from_be_bytes([self.get(Register::H), self.get(Register::L)])
    }

    /// Returns a register file with one slot replaced.
    #[must_use]
    pub const fn with(&self, register: Register, value: u8) -> Self {
        let mut slots = self.slots;
        slots[register.index()] = value;
        Self { slots }
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for register in Register::ALL {
            write!(f, "{}:{:#04x} ", register.letter(), self.get(register))?;
        }
        write!(f, "HL:{:#06x}", self.pair())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{Register, RegisterId, Registers, NAMED_REGISTER_COUNT};
    use crate::Fault;

    #[test]
    fn register_count_and_decode_match_architecture() {
        assert_eq!(NAMED_REGISTER_COUNT, 7);

        for (bits, register) in (0_u8..).zip(Register::ALL) {
            assert_eq!(RegisterId::decode(bits), Ok(RegisterId::Named(register)));
            assert_eq!(register.index(), usize::from(bits));
        }

        assert_eq!(RegisterId::decode(7), Ok(RegisterId::Pair));
    }

    #[rstest]
    #[case(8)]
    #[case(0x3F)]
    #[case(u8::MAX)]
    fn selectors_above_seven_are_rejected(#[case] bits: u8) {
        assert_eq!(
            RegisterId::decode(bits),
            Err(Fault::InvalidRegisterSelector(bits))
        );
    }

    #[test]
    fn defaults_to_all_zero() {
        let registers = Registers::default();
        for register in Register::ALL {
            assert_eq!(registers.get(register), 0);
        }
        assert_eq!(registers.pair(), 0);
    }

    #[test]
    fn with_returns_new_file_and_leaves_original() {
        let registers = Registers::default();
        let with_a = registers.with(Register::A, 0x7F);
        let with_l = with_a.with(Register::L, 0x99);

        assert_eq!(registers.get(Register::A), 0);
        assert_eq!(with_a.get(Register::A), 0x7F);
        assert_eq!(with_l.get(Register::L), 0x99);
        assert_eq!(with_l.get(Register::A), 0x7F);
    }

    #[test]
    fn pair_combines_h_high_and_l_low() {
        let registers = Registers::default()
            .with(Register::H, 0x12)
            .with(Register::L, 0x34);
        assert_eq!(registers.pair(), 0x1234);
    }

    #[test]
    fn pair_has_no_byte_slot() {
        assert_eq!(RegisterId::Pair.named(), None);
        assert_eq!(RegisterId::Pair.letter(), 'M');
        assert_eq!(RegisterId::Named(Register::E).named(), Some(Register::E));
    }

    #[test]
    fn display_renders_hex_dump() {
        let registers = Registers::default()
            .with(Register::A, 0x01)
            .with(Register::H, 0xAB)
            .with(Register::L, 0xCD);
        assert_eq!(
            registers.to_string(),
            "A:0x01 B:0x00 C:0x00 D:0x00 E:0x00 H:0xab L:0xcd HL:0xabcd"
        );
    }

    proptest! {
        #[test]
        fn writes_touch_only_the_selected_slot(
            index in 0_usize..NAMED_REGISTER_COUNT,
            value in any::<u8>(),
            seed in any::<[u8; NAMED_REGISTER_COUNT]>(),
        ) {
            let mut registers = Registers::default();
            for (register, byte) in Register::ALL.into_iter().zip(seed) {
                registers = registers.with(register, byte);
            }

            let target = Register::ALL[index];
            let updated = registers.with(target, value);

            for register in Register::ALL {
                if register == target {
                    prop_assert_eq!(updated.get(register), value);
                } else {
                    prop_assert_eq!(updated.get(register), registers.get(register));
                }
            }
        }
    }
}
