//! Accumulator arithmetic and logic.

use super::helpers::{resolve_operand, AddressingMode};
use crate::encoding::AluOp;
use crate::{Fault, Flag, Flags, MachineState, Register};

/// Result byte and carry/borrow produced by one ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AluResult {
    /// Value used for zero/sign/parity; written back to `A` unless comparing.
    pub value: u8,
    /// Carry out of an add, borrow out of a subtract, clear for logic ops.
    pub carry: bool,
}

/// Applies `op` to the accumulator `a` and operand `b`.
#[must_use]
pub const fn apply(op: AluOp, a: u8, b: u8, carry_in: bool) -> AluResult {
    let borrow = carry_in as u8;
    let (wide_a, wide_b, wide_carry) = (a as u16, b as u16, carry_in as u16);

    match op {
        AluOp::Add => add(wide_a + wide_b),
        AluOp::AddWithCarry => add(wide_a + wide_b + wide_carry),
        AluOp::Subtract => AluResult {
            value: a.wrapping_sub(b),
            carry: wide_a < wide_b,
        },
        AluOp::SubtractWithBorrow => AluResult {
            value: a.wrapping_sub(b).wrapping_sub(borrow),
            carry: wide_a < wide_b + wide_carry,
        },
        AluOp::And => logic(a & b),
        AluOp::Xor => logic(a ^ b),
        AluOp::Or => logic(a | b),
        AluOp::Compare => AluResult {
            value: a,
            carry: wide_a < wide_b,
        },
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn add(sum: u16) -> AluResult {
    AluResult {
        value: sum as u8,
        carry: sum > 0xFF,
    }
}

const fn logic(value: u8) -> AluResult {
    AluResult {
        value,
        carry: false,
    }
}

/// Runs `op` against the operand selected by `mode` and commits the result.
pub fn execute(
    state: &MachineState,
    op: AluOp,
    mode: AddressingMode,
) -> Result<MachineState, Fault> {
    let (operand, state) = resolve_operand(state, mode)?;
    let result = apply(
        op,
        state.register(Register::A),
        operand,
        state.flags().carry(),
    );
    let flags = Flags::from_result(result.value).with(Flag::Carry, result.carry);

    let state = state.with_flags(flags);
    if op == AluOp::Compare {
        Ok(state)
    } else {
        Ok(state.with_register(Register::A, result.value))
    }
}
