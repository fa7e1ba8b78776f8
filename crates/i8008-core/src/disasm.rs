//! Instruction disassembly using the classic 8008 mnemonics.
//!
//! Used by the per-instruction trace events and by hosts that want a listing
//! of a memory range.

use crate::decoder::{DecodedInstruction, Decoder};
use crate::encoding::{AluOp, OpcodeEncoding, RotateOp};
use crate::{Flag, Memory, RegisterId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single disassembled instruction row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisassemblyRow {
    /// Address of the opcode byte.
    pub addr_start: u16,
    /// Program-counter advance when the instruction falls through. Includes
    /// the extra step taken by memory-operand loads and ALU operations.
    pub len_bytes: u8,
    /// Raw opcode byte.
    pub opcode: u8,
    /// Mnemonic (e.g. `LAB`, `ADI`, `JFC`).
    pub mnemonic: String,
    /// Formatted operand (`0x1234` address, `0x42` immediate) or empty.
    pub operands: String,
    /// Whether the opcode is not implemented.
    pub is_illegal: bool,
}

/// Disassembles up to `count` instructions starting at `start`.
///
/// Rows follow the fall-through program counter. The listing stops early
/// when an opcode or operand byte lies outside memory.
#[must_use]
pub fn disassemble(start: u16, count: usize, memory: &Memory) -> Vec<DisassemblyRow> {
    let mut rows = Vec::with_capacity(count);
    let mut pc = start;

    for _ in 0..count {
        let Some(row) = disassemble_one(pc, memory) else {
            break;
        };
        pc = pc.wrapping_add(u16::from(row.len_bytes));
        rows.push(row);
    }

    rows
}

/// Disassembles the instruction whose opcode is at `pc`.
///
/// Returns `None` when the opcode or one of its operand bytes is out of range.
#[must_use]
pub fn disassemble_one(pc: u16, memory: &Memory) -> Option<DisassemblyRow> {
    let opcode = memory.read(pc).ok()?;

    let Ok(instr) = Decoder::decode(opcode) else {
        return Some(DisassemblyRow {
            addr_start: pc,
            len_bytes: 1,
            opcode,
            mnemonic: ".byte".to_string(),
            operands: format!("0x{opcode:02X} ; ILLEGAL"),
            is_illegal: true,
        });
    };

    let operand_at = pc.wrapping_add(1);
    let operands = match operand_bytes(instr.encoding) {
        2 => format!("0x{:04X}", memory.read_address16(operand_at).ok()?),
        1 => format!("0x{:02X}", memory.read(operand_at).ok()?),
        _ => String::new(),
    };

    Some(DisassemblyRow {
        addr_start: pc,
        len_bytes: fall_through_len(instr.encoding),
        opcode,
        mnemonic: mnemonic(&instr),
        operands,
        is_illegal: false,
    })
}

/// Renders the mnemonic of a decoded instruction without operands.
///
/// The register pair is spelled `M`, as in `LAM` or `INM`.
#[must_use]
pub fn mnemonic(instr: &DecodedInstruction) -> String {
    let destination = instr.destination_register().map_or('?', RegisterId::letter);
    let source = instr.source_register().map_or('?', RegisterId::letter);
    let condition = instr.condition();
    let sense = if condition.when_set { 'T' } else { 'F' };
    let flag = flag_letter(condition.flag);

    match instr.encoding {
        OpcodeEncoding::Halt => "HLT".to_string(),
        OpcodeEncoding::Jump => "JMP".to_string(),
        OpcodeEncoding::JumpIf => format!("J{sense}{flag}"),
        OpcodeEncoding::Call => "CAL".to_string(),
        OpcodeEncoding::CallIf => format!("C{sense}{flag}"),
        OpcodeEncoding::Return => "RET".to_string(),
        OpcodeEncoding::ReturnIf => format!("R{sense}{flag}"),
        OpcodeEncoding::Restart => format!("RST {}", instr.fields.destination()),
        OpcodeEncoding::LoadRegisterFromMemory => format!("L{destination}M"),
        OpcodeEncoding::LoadMemoryFromRegister => format!("LM{source}"),
        OpcodeEncoding::LoadRegisterFromRegister => format!("L{destination}{source}"),
        OpcodeEncoding::LoadMemoryImmediate => "LMI".to_string(),
        OpcodeEncoding::LoadRegisterImmediate => format!("L{destination}I"),
        OpcodeEncoding::Increment => format!("IN{destination}"),
        OpcodeEncoding::Decrement => format!("DC{destination}"),
        OpcodeEncoding::AluMemory(op) => format!("{}M", alu_prefix(op)),
        OpcodeEncoding::AluImmediate(op) => format!("{}I", alu_prefix(op)),
        OpcodeEncoding::AluRegister(op) => format!("{}{source}", alu_prefix(op)),
        OpcodeEncoding::Rotate(op) => rotate_name(op).to_string(),
    }
}

const fn operand_bytes(encoding: OpcodeEncoding) -> u8 {
    match encoding {
        OpcodeEncoding::Jump
        | OpcodeEncoding::JumpIf
        | OpcodeEncoding::Call
        | OpcodeEncoding::CallIf => 2,
        OpcodeEncoding::LoadMemoryImmediate
        | OpcodeEncoding::LoadRegisterImmediate
        | OpcodeEncoding::AluImmediate(_) => 1,
        _ => 0,
    }
}

const fn fall_through_len(encoding: OpcodeEncoding) -> u8 {
    match encoding {
        OpcodeEncoding::LoadRegisterFromMemory | OpcodeEncoding::AluMemory(_) => 2,
        other => 1 + operand_bytes(other),
    }
}

const fn flag_letter(flag: Flag) -> char {
    match flag {
        Flag::Carry => 'C',
        Flag::Zero => 'Z',
        Flag::Sign => 'S',
        Flag::Parity => 'P',
    }
}

const fn alu_prefix(op: AluOp) -> &'static str {
    match op {
        AluOp::Add => "AD",
        AluOp::AddWithCarry => "AC",
        AluOp::Subtract => "SU",
        AluOp::SubtractWithBorrow => "SB",
        AluOp::And => "ND",
        AluOp::Xor => "XR",
        AluOp::Or => "OR",
        AluOp::Compare => "CP",
    }
}

const fn rotate_name(op: RotateOp) -> &'static str {
    match op {
        RotateOp::Left => "RLC",
        RotateOp::Right => "RRC",
        RotateOp::LeftThroughCarry => "RAL",
        RotateOp::RightThroughCarry => "RAR",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{disassemble, disassemble_one, mnemonic};
    use crate::decoder::Decoder;
    use crate::Memory;

    fn memory_with(bytes: &[u8]) -> Memory {
        Memory::new().write_bytes(0, bytes).expect("program fits")
    }

    #[rstest]
    #[case(0x00, "HLT")]
    #[case(0xFF, "HLT")]
    #[case(0x44, "JMP")]
    #[case(0x40, "JFC")]
    #[case(0x68, "JTZ")]
    #[case(0x42, "CFC")]
    #[case(0x7A, "CTP")]
    #[case(0x07, "RET")]
    #[case(0x33, "RTS")]
    #[case(0x2D, "RST 5")]
    #[case(0xC7, "LAM")]
    #[case(0xF8, "LMA")]
    #[case(0xC8, "LBA")]
    #[case(0x3E, "LMI")]
    #[case(0x06, "LAI")]
    #[case(0x08, "INB")]
    #[case(0x38, "INM")]
    #[case(0x31, "DCL")]
    #[case(0x87, "ADM")]
    #[case(0x24, "NDI")]
    #[case(0xA9, "XRB")]
    #[case(0xBE, "CPL")]
    #[case(0x1A, "RAR")]
    fn mnemonic_table(#[case] opcode: u8, #[case] expected: &str) {
        let instr = Decoder::decode(opcode).expect("classified");
        assert_eq!(mnemonic(&instr), expected);
    }

    #[test]
    fn disassemble_jump_reads_little_endian_address() {
        let row = disassemble_one(0, &memory_with(&[0x44, 0x04, 0x02])).expect("in range");
        assert_eq!(row.mnemonic, "JMP");
        assert_eq!(row.operands, "0x0204");
        assert_eq!(row.len_bytes, 3);
        assert!(!row.is_illegal);
    }

    #[test]
    fn disassemble_illegal_opcode() {
        let row = disassemble_one(0, &memory_with(&[0x41])).expect("in range");
        assert!(row.is_illegal);
        assert_eq!(row.operands, "0x41 ; ILLEGAL");
        assert_eq!(row.len_bytes, 1);
    }

    #[test]
    fn disassemble_follows_fall_through_pc() {
        let memory = memory_with(&[0x06, 0x05, 0xC7, 0x00, 0x04, 0x01, 0x00]);
        let rows = disassemble(0, 4, &memory);

        let listing: Vec<_> = rows
            .iter()
            .map(|row| (row.addr_start, row.mnemonic.as_str(), row.operands.as_str()))
            .collect();
        assert_eq!(
            listing,
            vec![
                (0x0000, "LAI", "0x05"),
                (0x0002, "LAM", ""),
                (0x0004, "ADI", "0x01"),
                (0x0006, "HLT", ""),
            ]
        );
    }

    #[test]
    fn disassemble_stops_at_memory_end() {
        assert!(disassemble_one(16_000, &Memory::new()).is_none());

        let memory = Memory::new().write(15_999, 0x44).expect("in range");
        assert!(disassemble_one(15_999, &memory).is_none());
    }
}
