//! Bounds policy for byte and little-endian word accesses.

use crate::{Fault, MEMORY_CAPACITY};

/// Validates that a byte address lies inside `[0, MEMORY_CAPACITY)`.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] when `address` is past the last cell.
pub const fn validate_address(address: usize) -> Result<usize, Fault> {
    if address < MEMORY_CAPACITY {
        Ok(address)
    } else {
        Err(Fault::AddressOutOfRange { address })
    }
}

/// Validates both cells touched by a little-endian 16-bit read at `address`.
///
/// Returns the `(low, high)` byte indices on success.
///
/// # Errors
///
/// Returns [`Fault::AddressOutOfRange`] naming the first offending cell.
pub const fn validate_word_access(address: usize) -> Result<(usize, usize), Fault> {
    let low = match validate_address(address) {
        Ok(low) => low,
        Err(fault) => return Err(fault),
    };
    match validate_address(low + 1) {
        Ok(high) => Ok((low, high)),
        Err(fault) => Err(fault),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{validate_address, validate_word_access};
    use crate::{Fault, MEMORY_CAPACITY};

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(0x1234)]
    #[case(MEMORY_CAPACITY - 1)]
    fn in_range_addresses_are_accepted(#[case] address: usize) {
        assert_eq!(validate_address(address), Ok(address));
    }

    #[rstest]
    #[case(MEMORY_CAPACITY)]
    #[case(MEMORY_CAPACITY + 1)]
    #[case(usize::from(u16::MAX))]
    fn out_of_range_addresses_fault(#[case] address: usize) {
        assert_eq!(
            validate_address(address),
            Err(Fault::AddressOutOfRange { address })
        );
    }

    #[test]
    fn word_access_checks_the_implicit_high_byte() {
        assert_eq!(
            validate_word_access(MEMORY_CAPACITY - 2),
            Ok((MEMORY_CAPACITY - 2, MEMORY_CAPACITY - 1))
        );
        assert_eq!(
            validate_word_access(MEMORY_CAPACITY - 1),
            Err(Fault::AddressOutOfRange {
                address: MEMORY_CAPACITY
            })
        );
    }
}
