use std::fmt;

use crate::{Fault, Flag, Flags, Memory, Register, Registers, Stack};

/// Immutable snapshot of the whole machine.
///
/// Every `with_*` operation returns a new snapshot; the receiver is left
/// untouched. Memory is shared between snapshots until one of them writes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineState {
    stack: Stack,
    registers: Registers,
    flags: Flags,
    halted: bool,
    memory: Memory,
}

impl MachineState {
    /// Creates a running state over `memory` with zeroed registers, flags and stack.
    #[must_use]
    pub fn new(memory: Memory) -> Self {
        Self {
            memory,
            ..Self::default()
        }
    }

    /// Program counter, held in the current stack frame.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.stack.current_address()
    }

    /// Address stack.
    #[must_use]
    pub const fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Register file.
    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Reads one named register.
    #[must_use]
    pub const fn register(&self, register: Register) -> u8 {
        self.registers.get(register)
    }

    /// Reads the `H:L` pair used as the memory pointer.
    #[must_use]
    pub const fn pair(&self) -> u16 {
        self.registers.pair()
    }

    /// Condition flags.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// Returns `true` once a halt opcode has executed.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Memory image.
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Reads one memory byte.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `address` is not addressable.
    pub fn read_byte(&self, address: u16) -> Result<u8, Fault> {
        self.memory.read(address)
    }

    /// Returns a snapshot with the stack replaced.
    #[must_use]
    pub fn with_stack(&self, stack: Stack) -> Self {
        Self {
            stack,
            ..self.clone()
        }
    }

    /// Returns a snapshot with the register file replaced.
    #[must_use]
    pub fn with_registers(&self, registers: Registers) -> Self {
        Self {
            registers,
            ..self.clone()
        }
    }

    /// Returns a snapshot with one register replaced.
    #[must_use]
    pub fn with_register(&self, register: Register, value: u8) -> Self {
        self.with_registers(self.registers.with(register, value))
    }

    /// Returns a snapshot with all flags replaced.
    #[must_use]
    pub fn with_flags(&self, flags: Flags) -> Self {
        Self {
            flags,
            ..self.clone()
        }
    }

    /// Returns a snapshot with one flag overridden.
    #[must_use]
    pub fn with_flag(&self, flag: Flag, value: bool) -> Self {
        self.with_flags(self.flags.with(flag, value))
    }

    /// Returns a snapshot with the halt flag replaced.
    #[must_use]
    pub fn with_halt(&self, halted: bool) -> Self {
        Self {
            halted,
            ..self.clone()
        }
    }

    /// Returns a snapshot with the memory image replaced.
    #[must_use]
    pub fn with_memory(&self, memory: Memory) -> Self {
        Self {
            memory,
            ..self.clone()
        }
    }

    /// Returns a snapshot with `value` written at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `address` is not addressable.
    pub fn write_byte(&self, address: u16, value: u8) -> Result<Self, Fault> {
        Ok(self.with_memory(self.memory.write(address, value)?))
    }

    /// Returns a snapshot with the program counter advanced by `count` bytes.
    #[must_use]
    pub fn advance_pc(&self, count: u16) -> Self {
        let stack = (0..count).fold(self.stack, |stack, _| stack.increment_current());
        self.with_stack(stack)
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.stack)?;
        writeln!(f, "{}", self.registers)?;
        writeln!(f, "{}", self.flags)?;
        write!(f, "halt:{}", self.halted)
    }
}
