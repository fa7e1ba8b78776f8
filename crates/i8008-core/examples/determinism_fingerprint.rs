//! Deterministic run fingerprint used for cross-host comparison.

use i8008_core::{Cpu, Fault, Flag, MachineState, Memory, Register};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;
use tracing as _;

const STEP_LIMIT: usize = 10_000;

/// Sums 1..=10 into `A`, then calls a subroutine that rotates the sum and
/// stores it at 0x0100.
const MAIN: [u8; 16] = [
    0x16, 0xF6, // LCI 0xF6
    0x06, 0x00, // LAI 0x00
    0x0E, 0x01, // LBI 0x01
    0x81, // ADB
    0x08, // INB
    0x10, // INC
    0x48, 0x06, 0x00, // JFZ 0x0006
    0x46, 0x20, 0x00, // CAL 0x0020
    0x00, // HLT
];

const SUBROUTINE: [u8; 7] = [
    0x02, // RLC
    0x2E, 0x01, // LHI 0x01
    0x36, 0x00, // LLI 0x00
    0xF8, // LMA
    0x07, // RET
];

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn run_to_halt(cpu: &mut Cpu) -> Result<usize, Fault> {
    for steps in 1..=STEP_LIMIT {
        if cpu.step()?.is_halted() {
            return Ok(steps);
        }
    }
    Ok(STEP_LIMIT)
}

fn fingerprint(steps: usize, state: &MachineState) -> String {
    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    hash_bytes(&mut hash, &steps.to_le_bytes());

    for register in Register::ALL {
        hash_bytes(&mut hash, &[state.register(register)]);
    }
    for flag in Flag::ALL {
        hash_bytes(&mut hash, &[u8::from(state.flags().get(flag))]);
    }
    hash_bytes(&mut hash, &state.stack().pointer().to_le_bytes());
    for frame in state.stack().frames() {
        hash_bytes(&mut hash, &frame.to_le_bytes());
    }
    hash_bytes(&mut hash, &[u8::from(state.is_halted())]);
    hash_bytes(&mut hash, state.memory().as_slice());

    format!("{hash:016x}")
}

fn main() -> Result<(), Fault> {
    let memory = Memory::new()
        .write_bytes(0x0000, &MAIN)?
        .write_bytes(0x0020, &SUBROUTINE)?;

    let mut cpu = Cpu::new(memory);
    let steps = run_to_halt(&mut cpu)?;
    let state = cpu.state();

    println!("{state}");
    println!("result 0x{:02X} after {steps} steps", state.read_byte(0x0100)?);
    println!("{}", fingerprint(steps, state));
    Ok(())
}
