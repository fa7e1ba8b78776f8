//! Fixed-capacity byte memory with copy-on-write updates.
//!
//! A [`Memory`] value is never mutated in place. Every write allocates a new
//! backing buffer, so snapshots taken before the write keep observing the old
//! contents. Clones share the same buffer until one of them is written.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::Fault;

/// Bounds policy helpers shared by the memory operations.
pub mod access;

pub use access::{validate_address, validate_word_access};

/// Number of addressable byte cells.
pub const MEMORY_CAPACITY: usize = 16_000;

/// Bytes rendered per line by [`Memory::hex_dump`].
pub const HEX_DUMP_BYTES_PER_LINE: usize = 8;

/// Immutable byte-addressable memory image.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct Memory {
    cells: Arc<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<u8>> for Memory {
    type Error = Fault;

    fn try_from(image: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_image(&image)
    }
}

impl From<Memory> for Vec<u8> {
    fn from(memory: Memory) -> Self {
        memory.cells.to_vec()
    }
}

impl Memory {
    /// Allocates a zeroed memory image.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Arc::from(vec![0; MEMORY_CAPACITY]),
        }
    }

    /// Builds a memory image from a buffer of exactly [`MEMORY_CAPACITY`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidImageLength`] when `image` has any other length.
    pub fn from_image(image: &[u8]) -> Result<Self, Fault> {
        if image.len() != MEMORY_CAPACITY {
            return Err(Fault::InvalidImageLength {
                expected: MEMORY_CAPACITY,
                actual: image.len(),
            });
        }

        Ok(Self {
            cells: Arc::from(image),
        })
    }

    /// Reads the byte at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `address` is not addressable.
    pub fn read(&self, address: u16) -> Result<u8, Fault> {
        let index = validate_address(usize::from(address))?;
        Ok(self.cells[index])
    }

    /// Reads a little-endian 16-bit value: low byte at `address`, high byte
    /// at `address + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when either byte is not addressable.
    pub fn read_address16(&self, address: u16) -> Result<u16, Fault> {
        let (low, high) = validate_word_access(usize::from(address))?;
        Ok(u16::from_le_bytes([self.cells[low], self.cells[high]]))
    }

    /// Returns a new image with `value` stored at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] when `address` is not addressable.
    pub fn write(&self, address: u16, value: u8) -> Result<Self, Fault> {
        let index = validate_address(usize::from(address))?;
        let mut cells = self.cells.to_vec();
        cells[index] = value;
        Ok(Self {
            cells: Arc::from(cells),
        })
    }

    /// Returns a new image with `bytes` stored contiguously from `address`.
    ///
    /// Used by loaders to install a program in one copy instead of one per byte.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::AddressOutOfRange`] naming the first cell that does not
    /// fit. Nothing is written in that case.
    pub fn write_bytes(&self, address: u16, bytes: &[u8]) -> Result<Self, Fault> {
        let start = validate_address(usize::from(address))?;
        if bytes.is_empty() {
            return Ok(self.clone());
        }
        validate_address(start + bytes.len() - 1)?;

        let mut cells = self.cells.to_vec();
        cells[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            cells: Arc::from(cells),
        })
    }

    /// Number of addressable cells (always [`MEMORY_CAPACITY`]).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; memory has a fixed non-zero capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Borrows the full backing image.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Renders `length` bytes from `start` as lines of lowercase hex pairs.
    ///
    /// The window is clamped to the end of memory.
    #[must_use]
    pub fn hex_dump(&self, start: u16, length: usize) -> Vec<String> {
        let start = usize::from(start).min(self.cells.len());
        let end = start.saturating_add(length).min(self.cells.len());

        self.cells[start..end]
            .chunks(HEX_DUMP_BYTES_PER_LINE)
            .map(|chunk| {
                chunk.iter().fold(String::new(), |mut line, byte| {
                    let _ = write!(line, "{byte:02x} ");
                    line
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{Memory, MEMORY_CAPACITY};
    use crate::Fault;

    #[test]
    fn new_memory_is_zeroed_at_full_capacity() {
        let memory = Memory::new();
        assert_eq!(memory.len(), MEMORY_CAPACITY);
        assert!(memory.as_slice().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn write_returns_new_image_and_keeps_previous_snapshot() {
        let memory = Memory::new();
        let updated = memory.write(0, 0x42).expect("address 0 is in range");

        assert_eq!(updated.read(0), Ok(0x42));
        assert_eq!(memory.read(0), Ok(0x00));
    }

    #[test]
    fn reads_and_writes_past_capacity_fault() {
        let memory = Memory::new();
        let address = u16::try_from(MEMORY_CAPACITY).expect("capacity fits in u16");

        assert_eq!(
            memory.read(address),
            Err(Fault::AddressOutOfRange {
                address: MEMORY_CAPACITY
            })
        );
        assert_eq!(
            memory.write(address, 1),
            Err(Fault::AddressOutOfRange {
                address: MEMORY_CAPACITY
            })
        );
    }

    #[test]
    fn address16_reads_little_endian() {
        let memory = Memory::new()
            .write_bytes(0x0010, &[0x04, 0x02])
            .expect("in range");
        assert_eq!(memory.read_address16(0x0010), Ok(0x0204));
    }

    #[test]
    fn address16_faults_when_high_byte_is_out_of_range() {
        let memory = Memory::new();
        let last = u16::try_from(MEMORY_CAPACITY - 1).expect("capacity fits in u16");
        assert_eq!(
            memory.read_address16(last),
            Err(Fault::AddressOutOfRange {
                address: MEMORY_CAPACITY
            })
        );
    }

    #[test]
    fn image_must_match_capacity() {
        assert_eq!(
            Memory::from_image(&[0; 16]),
            Err(Fault::InvalidImageLength {
                expected: MEMORY_CAPACITY,
                actual: 16
            })
        );

        let mut image = vec![0; MEMORY_CAPACITY];
        image[7] = 0xAB;
        let memory = Memory::from_image(&image).expect("exact length");
        assert_eq!(memory.read(7), Ok(0xAB));
    }

    #[test]
    fn vec_conversions_go_through_image_check() {
        let memory = Memory::new().write(0x0010, 0xAB).expect("in range");
        let image = Vec::from(memory.clone());

        assert_eq!(Memory::try_from(image), Ok(memory));
        assert_eq!(
            Memory::try_from(vec![1, 2, 3]),
            Err(Fault::InvalidImageLength {
                expected: MEMORY_CAPACITY,
                actual: 3
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_short_image() {
        let error = serde_json::from_str::<Memory>("[1,2,3]").expect_err("3 bytes");
        assert!(error.to_string().contains("got 3"));

        let memory = Memory::new().write(0x3E7F, 0x5A).expect("last cell");
        let encoded = serde_json::to_string(&memory).expect("serialize");
        let decoded: Memory = serde_json::from_str(&encoded).expect("full image");
        assert_eq!(decoded, memory);
        assert_eq!(decoded.len(), MEMORY_CAPACITY);
    }

    #[test]
    fn write_bytes_rejects_overrun_without_partial_write() {
        let memory = Memory::new();
        let near_end = u16::try_from(MEMORY_CAPACITY - 1).expect("capacity fits in u16");
        assert_eq!(
            memory.write_bytes(near_end, &[1, 2]),
            Err(Fault::AddressOutOfRange {
                address: MEMORY_CAPACITY
            })
        );
        assert_eq!(memory.read(near_end), Ok(0));
    }

    #[test]
    fn hex_dump_groups_eight_bytes_per_line() {
        let memory = Memory::new()
            .write_bytes(0, &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0xFF])
            .expect("in range");
        let lines = memory.hex_dump(0, 9);

        assert_eq!(lines, vec!["00 01 02 03 04 05 06 07 ", "ff "]);
    }

    #[test]
    fn hex_dump_clamps_to_capacity() {
        let memory = Memory::new();
        let start = u16::try_from(MEMORY_CAPACITY - 2).expect("capacity fits in u16");
        assert_eq!(memory.hex_dump(start, 64), vec!["00 00 "]);
    }

    proptest! {
        #[test]
        fn write_then_read_roundtrips_and_old_snapshot_is_unchanged(
            address in 0_u16..16_000,
            value in any::<u8>(),
        ) {
            let before = Memory::new();
            let after = before.write(address, value).expect("in range");
            prop_assert_eq!(after.read(address), Ok(value));
            prop_assert_eq!(before.read(address), Ok(0));
        }
    }
}
