//! Instruction engine for an 8008-class 8-bit processor.
//!
//! Each [`Cpu::step`] fetches one opcode, decodes it against a priority-ordered
//! pattern table and produces a new immutable [`MachineState`].

/// Fixed-capacity copy-on-write memory.
pub mod memory;
pub use memory::{validate_address, validate_word_access, Memory, MEMORY_CAPACITY};

/// Register file, flags, address stack and the aggregate snapshot.
pub mod state;
pub use state::{
    Flag, Flags, MachineState, Register, RegisterId, Registers, Stack, NAMED_REGISTER_COUNT,
    STACK_DEPTH,
};

/// Fault taxonomy.
pub mod fault;
pub use fault::{Fault, FaultClass};

/// Priority-ordered opcode pattern table.
pub mod encoding;
pub use encoding::{classify_opcode, AluOp, OpcodeEncoding, RotateOp, OPCODE_PATTERN_TABLE};

/// Opcode field extraction and classification.
pub mod decoder;
pub use decoder::{Condition, DecodedInstruction, Decoder, OpcodeFields};

/// Instruction semantics and the fetch-decode-execute step.
pub mod execute;
pub use execute::{execute_instruction, step_one};

/// Mnemonic rendering and memory listings.
pub mod disasm;
pub use disasm::{disassemble, disassemble_one, mnemonic, DisassemblyRow};

/// Host-facing engine handle and configuration.
pub mod api;
pub use api::{CoreConfig, Cpu};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use serde_json as _;
