//! Instruction execution.
//!
//! One step is fetch (opcode at the program counter), advance the program
//! counter past the opcode, decode, then run the semantics of the decoded
//! group against the advanced state. Every group function consumes a
//! [`MachineState`] and returns a new one; a fault returns early and no state
//! is published.

mod alu;
mod control;
mod helpers;
mod load;
mod rotate;

pub use alu::{apply as apply_alu, AluResult};
pub use helpers::{read_immediate, resolve_operand, AddressingMode};
pub use rotate::rotate;

use crate::decoder::{DecodedInstruction, Decoder};
use crate::disasm::mnemonic;
use crate::encoding::OpcodeEncoding;
use crate::{CoreConfig, Fault, MachineState};

/// Runs the semantics of `instr` against `state`.
///
/// `state` is the post-fetch state: its program counter already points past
/// the opcode byte.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] for out-of-range operand, memory or
/// pair accesses.
pub fn execute_instruction(
    instr: &DecodedInstruction,
    state: &MachineState,
) -> Result<MachineState, Fault> {
    let taken = || instr.condition().holds(state.flags());

    match instr.encoding {
        OpcodeEncoding::Halt => Ok(control::halt(state)),
        OpcodeEncoding::Jump => control::jump(state, true),
        OpcodeEncoding::JumpIf => control::jump(state, taken()),
        OpcodeEncoding::Call => control::call(state, true),
        OpcodeEncoding::CallIf => control::call(state, taken()),
        OpcodeEncoding::Return => Ok(control::ret(state, true)),
        OpcodeEncoding::ReturnIf => Ok(control::ret(state, taken())),
        OpcodeEncoding::Restart => Ok(control::restart(state, instr.fields.destination())),
        OpcodeEncoding::LoadRegisterFromMemory => {
            load::register_from_memory(state, helpers::destination_register(instr)?)
        }
        OpcodeEncoding::LoadMemoryFromRegister => {
            load::memory_from_register(state, helpers::source_register(instr)?)
        }
        OpcodeEncoding::LoadRegisterFromRegister => Ok(load::register_from_register(
            state,
            helpers::destination_register(instr)?,
            helpers::source_register(instr)?,
        )),
        OpcodeEncoding::LoadMemoryImmediate => load::memory_immediate(state),
        OpcodeEncoding::LoadRegisterImmediate => {
            load::register_immediate(state, helpers::destination_register(instr)?)
        }
        OpcodeEncoding::Increment => Ok(load::increment(state, instr.destination_register()?)),
        OpcodeEncoding::Decrement => Ok(load::decrement(state, instr.destination_register()?)),
        OpcodeEncoding::AluMemory(op) => alu::execute(state, op, AddressingMode::Memory),
        OpcodeEncoding::AluImmediate(op) => alu::execute(state, op, AddressingMode::Immediate),
        OpcodeEncoding::AluRegister(op) => alu::execute(
            state,
            op,
            AddressingMode::Register(helpers::source_register(instr)?),
        ),
        OpcodeEncoding::Rotate(op) => Ok(rotate::execute(state, op)),
    }
}

/// Fetches, decodes and executes the instruction at the program counter.
///
/// The halt flag is not consulted; a halted state still steps.
///
/// # Errors
///
/// Returns any [`Fault`] raised by fetch, decode or execution.
pub fn step_one(state: &MachineState, config: &CoreConfig) -> Result<MachineState, Fault> {
    let pc = state.pc();
    fetch_decode_execute(state, config).inspect_err(|fault| {
        tracing::debug!(class = ?fault.class(), "fault at 0x{pc:04X}: {fault}");
    })
}

fn fetch_decode_execute(state: &MachineState, config: &CoreConfig) -> Result<MachineState, Fault> {
    let pc = state.pc();
    let opcode = state.read_byte(pc)?;
    let instr = Decoder::decode(opcode)?;

    if config.tracing_enabled {
        tracing::trace!(
            "0x{:04X}: 0x{:02X} {} | {}",
            pc,
            opcode,
            mnemonic(&instr),
            state.registers()
        );
    }

    let next = execute_instruction(&instr, &state.advance_pc(1))?;
    if next.is_halted() && !state.is_halted() {
        tracing::debug!("halted at 0x{pc:04X}");
    }
    Ok(next)
}
