use std::fmt;

use crate::Fault;

/// Number of 16-bit frames in the address stack.
pub const STACK_DEPTH: usize = 8;

/// Circular address stack whose current frame is the program counter.
///
/// Pushing advances the pointer and overwrites the frame it lands on; popping
/// only retreats the pointer, so the caller's frame becomes current again with
/// whatever address it held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "StackFrames")
)]
pub struct Stack {
    pointer: usize,
    frames: [u16; STACK_DEPTH],
}

/// Unchecked wire shape of a [`Stack`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StackFrames {
    pointer: usize,
    frames: [u16; STACK_DEPTH],
}

#[cfg(feature = "serde")]
impl TryFrom<StackFrames> for Stack {
    type Error = Fault;

    fn try_from(raw: StackFrames) -> Result<Self, Self::Error> {
        Self::from_parts(raw.pointer, raw.frames)
    }
}

impl Stack {
    /// Builds a stack from a pointer and its frames.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidStackPointer`] when `pointer` is not below
    /// [`STACK_DEPTH`].
    pub const fn from_parts(pointer: usize, frames: [u16; STACK_DEPTH]) -> Result<Self, Fault> {
        if pointer >= STACK_DEPTH {
            return Err(Fault::InvalidStackPointer(pointer));
        }
        Ok(Self { pointer, frames })
    }

    /// Address held by the current frame (the program counter).
    #[must_use]
    pub const fn current_address(&self) -> u16 {
        self.frames[self.pointer]
    }

    /// Current stack pointer, always in `0..STACK_DEPTH`.
    #[must_use]
    pub const fn pointer(&self) -> usize {
        self.pointer
    }

    /// All frames in slot order.
    #[must_use]
    pub const fn frames(&self) -> &[u16; STACK_DEPTH] {
        &self.frames
    }

    /// Advances the pointer (wrapping) and stores `address` in the new frame.
    #[must_use]
    pub const fn push_frame(&self, address: u16) -> Self {
        let pointer = (self.pointer + 1) % STACK_DEPTH;
        let mut frames = self.frames;
        frames[pointer] = address;
        Self { pointer, frames }
    }

    /// Retreats the pointer (wrapping) without touching any frame.
    #[must_use]
    pub const fn pop_frame(&self) -> Self {
        Self {
            pointer: (self.pointer + STACK_DEPTH - 1) % STACK_DEPTH,
            frames: self.frames,
        }
    }

    /// Replaces the address held by the current frame.
    #[must_use]
    pub const fn overwrite_current(&self, address: u16) -> Self {
        let mut frames = self.frames;
        frames[self.pointer] = address;
        Self {
            pointer: self.pointer,
            frames,
        }
    }

    /// Adds one to the current frame, wrapping at 16 bits.
    #[must_use]
    pub const fn increment_current(&self) -> Self {
        self.overwrite_current(self.current_address().wrapping_add(1))
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PC:{:#06x} Stack(", self.current_address())?;
        for (slot, frame) in self.frames.iter().enumerate() {
            if slot > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{frame:#06x}")?;
        }
        write!(f, ") sp:{:#04x}", self.pointer)
    }
}
