//! Priority-ordered opcode pattern table.
//!
//! Several patterns overlap (the register-copy group subsumes the memory load
//! and store forms, the halt opcodes sit inside the increment and load groups),
//! so entries are tested strictly in table order and the first match wins.

/// Binary accumulator operation selected by bits 5..3 of an ALU opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum AluOp {
    Add,
    AddWithCarry,
    Subtract,
    SubtractWithBorrow,
    And,
    Xor,
    Or,
    Compare,
}

impl AluOp {
    /// Operations in opcode field order (`000` through `111`).
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::AddWithCarry,
        Self::Subtract,
        Self::SubtractWithBorrow,
        Self::And,
        Self::Xor,
        Self::Or,
        Self::Compare,
    ];
}

/// Accumulator rotate operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateOp {
    /// Rotate left, bit 7 into carry and bit 0.
    Left,
    /// Rotate right, bit 0 into carry and bit 7.
    Right,
    /// Rotate left through carry.
    LeftThroughCarry,
    /// Rotate right through carry.
    RightThroughCarry,
}

/// Instruction group selected by the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeEncoding {
    /// `0x00` or `0xFF`.
    Halt,
    /// `01 xxx 100`.
    Jump,
    /// `01 ccc 000`.
    JumpIf,
    /// `01 xxx 110`.
    Call,
    /// `01 ccc 010`.
    CallIf,
    /// `00 xxx 111`.
    Return,
    /// `00 ccc 011`.
    ReturnIf,
    /// `00 aaa 101`.
    Restart,
    /// `11 ddd 111`: register from memory at `H:L`.
    LoadRegisterFromMemory,
    /// `11 111 sss`: memory at `H:L` from register.
    LoadMemoryFromRegister,
    /// `11 ddd sss`: register to register copy.
    LoadRegisterFromRegister,
    /// `00 111 110`: memory at `H:L` from immediate.
    LoadMemoryImmediate,
    /// `00 ddd 110`: register from immediate.
    LoadRegisterImmediate,
    /// `00 ddd 000`.
    Increment,
    /// `00 ddd 001`.
    Decrement,
    /// `10 ppp 111`: operand from memory at `H:L`.
    AluMemory(AluOp),
    /// `00 ppp 100`: operand from the byte after the opcode.
    AluImmediate(AluOp),
    /// `10 ppp sss`: operand from a register.
    AluRegister(AluOp),
    /// `00 0rr 010`.
    Rotate(RotateOp),
}

/// One `(mask, pattern, encoding)` row: an opcode matches when
/// `opcode & mask == pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpcodePattern {
    /// Bits that take part in the comparison.
    pub mask: u8,
    /// Required values of the masked bits.
    pub pattern: u8,
    /// Group selected on match.
    pub encoding: OpcodeEncoding,
}

impl OpcodePattern {
    const fn new(mask: u8, pattern: u8, encoding: OpcodeEncoding) -> Self {
        Self {
            mask,
            pattern,
            encoding,
        }
    }

    /// Returns `true` when `opcode` matches this row.
    #[must_use]
    pub const fn matches(&self, opcode: u8) -> bool {
        opcode & self.mask == self.pattern
    }
}

const EXACT: u8 = 0xFF;
const GROUP: u8 = 0xC7;
const SOURCE: u8 = 0xF8;

/// Single source-of-truth opcode table, in priority order.
pub const OPCODE_PATTERN_TABLE: &[OpcodePattern] = &[
    OpcodePattern::new(EXACT, 0x00, OpcodeEncoding::Halt),
    OpcodePattern::new(EXACT, 0xFF, OpcodeEncoding::Halt),
    OpcodePattern::new(GROUP, 0x44, OpcodeEncoding::Jump),
    OpcodePattern::new(GROUP, 0x40, OpcodeEncoding::JumpIf),
    OpcodePattern::new(GROUP, 0x46, OpcodeEncoding::Call),
    OpcodePattern::new(GROUP, 0x42, OpcodeEncoding::CallIf),
    OpcodePattern::new(GROUP, 0x07, OpcodeEncoding::Return),
    OpcodePattern::new(GROUP, 0x03, OpcodeEncoding::ReturnIf),
    OpcodePattern::new(GROUP, 0x05, OpcodeEncoding::Restart),
    OpcodePattern::new(GROUP, 0xC7, OpcodeEncoding::LoadRegisterFromMemory),
    OpcodePattern::new(SOURCE, 0xF8, OpcodeEncoding::LoadMemoryFromRegister),
    OpcodePattern::new(0xC0, 0xC0, OpcodeEncoding::LoadRegisterFromRegister),
    OpcodePattern::new(EXACT, 0x3E, OpcodeEncoding::LoadMemoryImmediate),
    OpcodePattern::new(GROUP, 0x06, OpcodeEncoding::LoadRegisterImmediate),
    OpcodePattern::new(GROUP, 0x00, OpcodeEncoding::Increment),
    OpcodePattern::new(GROUP, 0x01, OpcodeEncoding::Decrement),
    OpcodePattern::new(EXACT, 0x87, OpcodeEncoding::AluMemory(AluOp::Add)),
    OpcodePattern::new(EXACT, 0x8F, OpcodeEncoding::AluMemory(AluOp::AddWithCarry)),
    OpcodePattern::new(EXACT, 0x97, OpcodeEncoding::AluMemory(AluOp::Subtract)),
    OpcodePattern::new(EXACT, 0x9F, OpcodeEncoding::AluMemory(AluOp::SubtractWithBorrow)),
    OpcodePattern::new(EXACT, 0xA7, OpcodeEncoding::AluMemory(AluOp::And)),
    OpcodePattern::new(EXACT, 0xAF, OpcodeEncoding::AluMemory(AluOp::Xor)),
    OpcodePattern::new(EXACT, 0xB7, OpcodeEncoding::AluMemory(AluOp::Or)),
    OpcodePattern::new(EXACT, 0xBF, OpcodeEncoding::AluMemory(AluOp::Compare)),
    OpcodePattern::new(EXACT, 0x04, OpcodeEncoding::AluImmediate(AluOp::Add)),
    OpcodePattern::new(EXACT, 0x0C, OpcodeEncoding::AluImmediate(AluOp::AddWithCarry)),
    OpcodePattern::new(EXACT, 0x14, OpcodeEncoding::AluImmediate(AluOp::Subtract)),
    OpcodePattern::new(EXACT, 0x1C, OpcodeEncoding::AluImmediate(AluOp::SubtractWithBorrow)),
    OpcodePattern::new(EXACT, 0x24, OpcodeEncoding::AluImmediate(AluOp::And)),
    OpcodePattern::new(EXACT, 0x2C, OpcodeEncoding::AluImmediate(AluOp::Xor)),
    OpcodePattern::new(EXACT, 0x34, OpcodeEncoding::AluImmediate(AluOp::Or)),
    OpcodePattern::new(EXACT, 0x3C, OpcodeEncoding::AluImmediate(AluOp::Compare)),
    OpcodePattern::new(SOURCE, 0x80, OpcodeEncoding::AluRegister(AluOp::Add)),
    OpcodePattern::new(SOURCE, 0x88, OpcodeEncoding::AluRegister(AluOp::AddWithCarry)),
    OpcodePattern::new(SOURCE, 0x90, OpcodeEncoding::AluRegister(AluOp::Subtract)),
    OpcodePattern::new(SOURCE, 0x98, OpcodeEncoding::AluRegister(AluOp::SubtractWithBorrow)),
    OpcodePattern::new(SOURCE, 0xA0, OpcodeEncoding::AluRegister(AluOp::And)),
    OpcodePattern::new(SOURCE, 0xA8, OpcodeEncoding::AluRegister(AluOp::Xor)),
    OpcodePattern::new(SOURCE, 0xB0, OpcodeEncoding::AluRegister(AluOp::Or)),
    OpcodePattern::new(SOURCE, 0xB8, OpcodeEncoding::AluRegister(AluOp::Compare)),
    OpcodePattern::new(EXACT, 0x02, OpcodeEncoding::Rotate(RotateOp::Left)),
    OpcodePattern::new(EXACT, 0x0A, OpcodeEncoding::Rotate(RotateOp::Right)),
    OpcodePattern::new(EXACT, 0x12, OpcodeEncoding::Rotate(RotateOp::LeftThroughCarry)),
    OpcodePattern::new(EXACT, 0x1A, OpcodeEncoding::Rotate(RotateOp::RightThroughCarry)),
];

/// Returns the encoding of the first table row matching `opcode`.
///
/// `None` means the opcode is not implemented.
#[must_use]
pub fn classify_opcode(opcode: u8) -> Option<OpcodeEncoding> {
    OPCODE_PATTERN_TABLE
        .iter()
        .find(|row| row.matches(opcode))
        .map(|row| row.encoding)
}
