//! Host-facing engine handle and configuration.

use crate::execute::step_one;
use crate::{Fault, MachineState, Memory};

/// Core configuration shared by all stepping APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Emits a `trace` event for every executed instruction.
    pub tracing_enabled: bool,
}

/// Engine instance holding the current machine state.
///
/// [`Cpu::step`] replaces the held state with the next snapshot. Snapshots
/// returned earlier stay valid and unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Cpu {
    state: MachineState,
    config: CoreConfig,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(Memory::new())
    }
}

impl Cpu {
    /// Creates an engine over `memory` with zeroed registers, flags and stack.
    #[must_use]
    pub fn new(memory: Memory) -> Self {
        Self::with_state(MachineState::new(memory))
    }

    /// Creates an engine starting from a complete machine state.
    #[must_use]
    pub fn with_state(state: MachineState) -> Self {
        Self::with_config(state, CoreConfig::default())
    }

    /// Creates an engine from a machine state and explicit configuration.
    #[must_use]
    pub const fn with_config(state: MachineState, config: CoreConfig) -> Self {
        Self { state, config }
    }

    /// Executes exactly one instruction and returns the new current state.
    ///
    /// The halt flag is reported but not enforced; deciding when to stop
    /// stepping is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns the [`Fault`] raised by fetch, decode or execution. The held
    /// state is left as it was before the call.
    pub fn step(&mut self) -> Result<MachineState, Fault> {
        let next = step_one(&self.state, &self.config)?;
        self.state = next.clone();
        Ok(next)
    }

    /// Current machine state.
    #[must_use]
    pub const fn state(&self) -> &MachineState {
        &self.state
    }

    /// Replaces the current machine state.
    pub fn set_state(&mut self, state: MachineState) {
        self.state = state;
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, Cpu};
    use crate::{Fault, Flag, MachineState, Memory, Register};

    fn cpu_with_program(bytes: &[u8]) -> Cpu {
        Cpu::new(Memory::new().write_bytes(0, bytes).expect("program fits"))
    }

    #[test]
    fn default_config_disables_tracing() {
        assert!(!CoreConfig::default().tracing_enabled);
        assert_eq!(Cpu::default().config(), CoreConfig::default());
    }

    #[test]
    fn step_replaces_held_state() {
        let mut cpu = cpu_with_program(&[0x06, 0x42, 0x00]);
        let first = cpu.step().expect("LAI");

        assert_eq!(&first, cpu.state());
        assert_eq!(first.register(Register::A), 0x42);

        let second = cpu.step().expect("HLT");
        assert!(second.is_halted());
        assert!(!first.is_halted());
    }

    #[test]
    fn failed_step_keeps_previous_state() {
        let mut cpu = cpu_with_program(&[0x06, 0x42, 0x41]);
        let before = cpu.step().expect("LAI");

        assert_eq!(cpu.step(), Err(Fault::UnimplementedOpcode(0x41)));
        assert_eq!(cpu.state(), &before);
    }

    #[test]
    fn with_config_accepts_state_overrides() {
        let state = MachineState::default()
            .with_register(Register::A, 0x10)
            .with_flag(Flag::Carry, true);
        let config = CoreConfig {
            tracing_enabled: true,
        };
        let cpu = Cpu::with_config(state.clone(), config);

        assert_eq!(cpu.config(), config);
        assert_eq!(cpu.state(), &state);
    }
}
