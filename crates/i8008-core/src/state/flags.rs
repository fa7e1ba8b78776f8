use std::fmt;

/// Condition flag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Flag {
    Carry,
    Zero,
    Sign,
    Parity,
}

impl Flag {
    /// Flag order used by the 2-bit condition selector (`C, Z, S, P`).
    pub const ALL: [Self; 4] = [Self::Carry, Self::Zero, Self::Sign, Self::Parity];
}

/// Four independent condition flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct Flags {
    carry: bool,
    zero: bool,
    sign: bool,
    parity: bool,
}

impl Flags {
    /// Derives zero, sign and parity from an 8-bit result. Carry is cleared;
    /// callers that produce a carry set it afterwards with [`Flags::with`].
    #[must_use]
    pub const fn from_result(value: u8) -> Self {
        Self {
            carry: false,
            zero: value == 0,
            sign: value & 0x80 != 0,
            parity: value.count_ones().is_multiple_of(2),
        }
    }

    /// Returns a copy with one flag overridden.
    #[must_use]
    pub const fn with(self, flag: Flag, value: bool) -> Self {
        match flag {
            Flag::Carry => Self {
                carry: value,
                ..self
            },
            Flag::Zero => Self {
                zero: value,
                ..self
            },
            Flag::Sign => Self {
                sign: value,
                ..self
            },
            Flag::Parity => Self {
                parity: value,
                ..self
            },
        }
    }

    /// Reads a flag by identifier.
    #[must_use]
    pub const fn get(self, flag: Flag) -> bool {
        match flag {
            Flag::Carry => self.carry,
            Flag::Zero => self.zero,
            Flag::Sign => self.sign,
            Flag::Parity => self.parity,
        }
    }

    /// Carry/borrow flag.
    #[must_use]
    pub const fn carry(self) -> bool {
        self.carry
    }

    /// Set when the last derived result was zero.
    #[must_use]
    pub const fn zero(self) -> bool {
        self.zero
    }

    /// Bit 7 of the last derived result.
    #[must_use]
    pub const fn sign(self) -> bool {
        self.sign
    }

    /// Set when the last derived result had an even number of one bits.
    #[must_use]
    pub const fn parity(self) -> bool {
        self.parity
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Flags(Carry:{} Zero:{} Sign:{} Parity:{})",
            self.carry, self.zero, self.sign, self.parity
        )
    }
}
