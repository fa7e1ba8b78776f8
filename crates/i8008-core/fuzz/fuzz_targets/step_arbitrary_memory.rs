#![no_main]

use i8008_core::{
    disassemble_one, step_one, validate_word_access, CoreConfig, Decoder, MachineState, Memory,
    Register, Stack,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let pc = u16::from_le_bytes([data[0], data[1]]);
    let pair = u16::from_le_bytes([data[2], data[3]]);
    let program = &data[4..];

    let _ = Decoder::decode(program.first().copied().unwrap_or_default());
    let _ = validate_word_access(usize::from(pc));

    let Ok(memory) = Memory::new().write_bytes(0, &program[..program.len().min(64)]) else {
        return;
    };
    let [high, low] = pair.to_be_bytes();
    let state = MachineState::new(memory)
        .with_stack(Stack::default().overwrite_current(pc % 64))
        .with_register(Register::H, high)
        .with_register(Register::L, low);

    let _ = disassemble_one(state.pc(), state.memory());

    let config = CoreConfig::default();
    let mut current = state;
    for _ in 0..16 {
        match step_one(&current, &config) {
            Ok(next) => current = next,
            Err(_) => break,
        }
    }
});
