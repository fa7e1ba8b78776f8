//! Accumulator rotates. Only the carry flag changes.

use crate::encoding::RotateOp;
use crate::{Flag, MachineState, Register};

/// Rotates `a` one bit and returns the new value with the carry out.
#[must_use]
pub const fn rotate(op: RotateOp, a: u8, carry_in: bool) -> (u8, bool) {
    let high = a & 0x80 != 0;
    let low = a & 0x01 != 0;

    match op {
        RotateOp::Left => (a.rotate_left(1), high),
        RotateOp::Right => (a.rotate_right(1), low),
        RotateOp::LeftThroughCarry => ((a << 1) | carry_in as u8, high),
        RotateOp::RightThroughCarry => ((a >> 1) | ((carry_in as u8) << 7), low),
    }
}

pub fn execute(state: &MachineState, op: RotateOp) -> MachineState {
    let (value, carry) = rotate(op, state.register(Register::A), state.flags().carry());
    state
        .with_register(Register::A, value)
        .with_flag(Flag::Carry, carry)
}
