//! Machine state model: register file, flags, address stack and the
//! aggregate snapshot.

/// Condition flags.
pub mod flags;
/// Aggregate machine snapshot.
pub mod machine;
/// Register file and register selectors.
pub mod registers;
/// Circular address stack holding the program counter.
pub mod stack;

pub use flags::{Flag, Flags};
pub use machine::MachineState;
pub use registers::{Register, RegisterId, Registers, NAMED_REGISTER_COUNT};
pub use stack::{Stack, STACK_DEPTH};
