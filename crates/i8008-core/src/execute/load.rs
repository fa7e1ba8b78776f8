//! Load group plus register increment/decrement.

use super::helpers::read_immediate;
use crate::{Fault, Flag, Flags, MachineState, Register, RegisterId};

/// `LrM`: register from memory at `H:L`.
///
/// The program counter advances one step beyond the opcode even though the
/// instruction has no operand byte. Programs written for this core rely on it.
pub fn register_from_memory(
    state: &MachineState,
    destination: Register,
) -> Result<MachineState, Fault> {
    let value = state.read_byte(state.pair())?;
    Ok(state.advance_pc(1).with_register(destination, value))
}

/// `LMr`: memory at `H:L` from register.
pub fn memory_from_register(
    state: &MachineState,
    source: Register,
) -> Result<MachineState, Fault> {
    state.write_byte(state.pair(), state.register(source))
}

/// `Lrr`: register to register copy.
pub fn register_from_register(
    state: &MachineState,
    destination: Register,
    source: Register,
) -> MachineState {
    state.with_register(destination, state.register(source))
}

/// `LMI`: memory at `H:L` from the byte after the opcode.
pub fn memory_immediate(state: &MachineState) -> Result<MachineState, Fault> {
    let (value, next) = read_immediate(state)?;
    next.write_byte(next.pair(), value)
}

/// `LrI`: register from the byte after the opcode.
pub fn register_immediate(
    state: &MachineState,
    destination: Register,
) -> Result<MachineState, Fault> {
    let (value, next) = read_immediate(state)?;
    Ok(next.with_register(destination, value))
}

/// `INr`: wrapping increment; zero/sign/parity follow the result, carry is kept.
///
/// The pair has no byte slot of its own. `INM` leaves every register as it was
/// and only derives the flags from the low byte of `H:L + 1`.
pub fn increment(state: &MachineState, target: RegisterId) -> MachineState {
    let (value, next) = match target {
        RegisterId::Named(register) => {
            let value = state.register(register).wrapping_add(1);
            (value, state.with_register(register, value))
        }
        RegisterId::Pair => (state.pair().wrapping_add(1).to_le_bytes()[0], state.clone()),
    };
    let flags = Flags::from_result(value).with(Flag::Carry, state.flags().carry());
    next.with_flags(flags)
}

/// `DCr`: wrapping decrement; flags are not touched. `DCM` changes nothing.
pub fn decrement(state: &MachineState, target: RegisterId) -> MachineState {
    match target {
        RegisterId::Named(register) => {
            state.with_register(register, state.register(register).wrapping_sub(1))
        }
        RegisterId::Pair => state.clone(),
    }
}
