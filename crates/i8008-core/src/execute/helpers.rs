//! Operand resolution shared by the load and ALU groups.

use crate::decoder::DecodedInstruction;
use crate::{Fault, MachineState, Register};

/// Where an ALU instruction reads its right-hand operand from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Byte at the `H:L` address; the program counter advances one extra step.
    Memory,
    /// Byte following the opcode; the program counter advances past it.
    Immediate,
    /// Named register; no extra program counter change.
    Register(Register),
}

/// Reads the operand for `mode` and returns it with the state the operation
/// should continue from.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] when the memory or immediate byte is
/// not addressable.
pub fn resolve_operand(
    state: &MachineState,
    mode: AddressingMode,
) -> Result<(u8, MachineState), Fault> {
    match mode {
        AddressingMode::Memory => {
            let value = state.read_byte(state.pair())?;
            Ok((value, state.advance_pc(1)))
        }
        AddressingMode::Immediate => read_immediate(state),
        AddressingMode::Register(register) => Ok((state.register(register), state.clone())),
    }
}

/// Reads the byte at the program counter and steps past it.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] when the program counter is past the
/// end of memory.
pub fn read_immediate(state: &MachineState) -> Result<(u8, MachineState), Fault> {
    let value = state.read_byte(state.pc())?;
    Ok((value, state.advance_pc(1)))
}

/// Resolves the byte register named by bits 5..3.
///
/// # Errors
///
/// Returns [`Fault::UnimplementedOpcode`] when the field selects the pair,
/// which has no byte slot of its own.
pub fn destination_register(instr: &DecodedInstruction) -> Result<Register, Fault> {
    instr
        .destination_register()?
        .named()
        .ok_or(Fault::UnimplementedOpcode(instr.opcode))
}

/// Resolves the byte register named by bits 2..0.
///
/// # Errors
///
/// Returns [`Fault::UnimplementedOpcode`] when the field selects the pair.
pub fn source_register(instr: &DecodedInstruction) -> Result<Register, Fault> {
    instr
        .source_register()?
        .named()
        .ok_or(Fault::UnimplementedOpcode(instr.opcode))
}
