//! Halt, jump, call, return and restart.
//!
//! Control-flow instructions only touch the stack and the halt flag; registers
//! and condition flags pass through unchanged.

use crate::{Fault, MachineState};

/// Size of the little-endian address operand following jump and call opcodes.
const ADDRESS_OPERAND_BYTES: u16 = 2;

pub fn halt(state: &MachineState) -> MachineState {
    state.with_halt(true)
}

/// Overwrites the program counter with the operand address when `taken`,
/// otherwise skips the operand.
pub fn jump(state: &MachineState, taken: bool) -> Result<MachineState, Fault> {
    if !taken {
        return Ok(state.advance_pc(ADDRESS_OPERAND_BYTES));
    }

    let target = state.memory().read_address16(state.pc())?;
    Ok(state.with_stack(state.stack().overwrite_current(target)))
}

/// Leaves the return address (just past the operand) in the current frame and
/// pushes a new frame holding the target when `taken`.
pub fn call(state: &MachineState, taken: bool) -> Result<MachineState, Fault> {
    if !taken {
        return Ok(state.advance_pc(ADDRESS_OPERAND_BYTES));
    }

    let target = state.memory().read_address16(state.pc())?;
    let returned_to = state.advance_pc(ADDRESS_OPERAND_BYTES);
    Ok(returned_to.with_stack(returned_to.stack().push_frame(target)))
}

pub fn ret(state: &MachineState, taken: bool) -> MachineState {
    if taken {
        state.with_stack(state.stack().pop_frame())
    } else {
        state.clone()
    }
}

/// Pushes a frame holding `vector << 3`.
pub fn restart(state: &MachineState, vector: u8) -> MachineState {
    state.with_stack(state.stack().push_frame(u16::from(vector) << 3))
}

#[cfg(test)]
mod tests {
    use super::{call, jump, restart, ret};
    use crate::{Fault, MachineState, Memory, Stack};

    fn post_fetch(bytes: &[u8]) -> MachineState {
        let memory = Memory::new().write_bytes(0, bytes).expect("program fits");
        MachineState::new(memory).advance_pc(1)
    }

    #[test]
    fn taken_jump_overwrites_current_frame() {
        let state = post_fetch(&[0x44, 0x04, 0x02]);
        let next = jump(&state, true).expect("operand in range");

        assert_eq!(next.pc(), 0x0204);
        assert_eq!(next.stack().pointer(), 0);
    }

    #[test]
    fn untaken_jump_skips_operand() {
        let state = post_fetch(&[0x40, 0x04, 0x02]);
        assert_eq!(jump(&state, false).expect("no read").pc(), 0x0003);
    }

    #[test]
    fn taken_call_records_return_address_below_target() {
        let state = post_fetch(&[0x46, 0x04, 0x02]);
        let next = call(&state, true).expect("operand in range");

        assert_eq!(next.pc(), 0x0204);
        assert_eq!(next.stack().pointer(), 1);
        assert_eq!(ret(&next, true).pc(), 0x0003);
    }

    #[test]
    fn untaken_return_changes_nothing() {
        let state = post_fetch(&[0x03]);
        assert_eq!(ret(&state, false), state);
    }

    #[test]
    fn restart_pushes_vector_address() {
        let state = post_fetch(&[0x3D]);
        let next = restart(&state, 0b111);

        assert_eq!(next.pc(), 0x0038);
        assert_eq!(next.stack().pointer(), 1);
        assert_eq!(ret(&next, true).pc(), 0x0001);
    }

    #[test]
    fn taken_jump_faults_on_operand_past_memory_end() {
        let state = MachineState::default()
            .with_stack(Stack::default().overwrite_current(15_999));
        assert_eq!(
            jump(&state, true),
            Err(Fault::AddressOutOfRange { address: 16_000 })
        );
    }
}
