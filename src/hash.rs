//! FNV-1a (32-bit) fingerprinting of encoded lookup keys.
//!
//! The compiled catalog stores only fingerprints, so a runtime consumer must be able
//! to re-derive exactly the same value from the bytes it encodes at lookup time.

/// FNV-1a 32-bit offset basis.
pub const FNV1_32_INIT: u32 = 0x811c_9dc5;

/// FNV 32-bit prime.
pub const FNV_32_PRIME: u32 = 0x0100_0193;

/// Hashes `bytes` with the standard FNV-1a offset basis.
///
/// An empty input returns [`FNV1_32_INIT`] unchanged.
#[must_use]
pub const fn fnv1a_32(bytes: &[u8]) -> u32 {
    fnv1a_32_with_seed(bytes, FNV1_32_INIT)
}

/// Hashes `bytes` starting from an arbitrary `seed`.
///
/// Feeding the result of one call as the seed of the next is equivalent to hashing
/// the concatenation of both inputs.
#[must_use]
pub const fn fnv1a_32_with_seed(bytes: &[u8], seed: u32) -> u32 {
    let mut hval = seed;
    let mut rest = bytes;
    while let [byte, tail @ ..] = rest {
        hval ^= *byte as u32;
        hval = hval.wrapping_mul(FNV_32_PRIME);
        rest = tail;
    }
    hval
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty(b"", 0x811c_9dc5)]
    #[case::single_byte(b"a", 0xe40c_292c)]
    #[case::ascii_word(b"foobar", 0xbf9c_f968)]
    fn test_fnv1a_32_reference_vectors(#[case] input: &[u8], #[case] expected: u32) {
        assert_that!(fnv1a_32(input), eq(expected));
    }

    #[rstest]
    fn test_fnv1a_32_utf16le_key() {
        // "Hello" as UTF-16LE
        let bytes = [b'H', 0, b'e', 0, b'l', 0, b'l', 0, b'o', 0];

        assert_that!(fnv1a_32(&bytes), eq(0x7f98_a1d7));
    }

    #[rstest]
    fn test_fnv1a_32_is_deterministic() {
        let bytes = "メニュー\u{4}開く".as_bytes();

        assert_that!(fnv1a_32(bytes), eq(fnv1a_32(bytes)));
    }

    #[rstest]
    fn test_seed_chaining_matches_concatenation() {
        let head = fnv1a_32(b"foo");

        assert_that!(fnv1a_32_with_seed(b"bar", head), eq(fnv1a_32(b"foobar")));
    }

    #[rstest]
    fn test_empty_input_returns_seed() {
        assert_that!(fnv1a_32_with_seed(&[], 42), eq(42));
    }

    #[rstest]
    fn test_usable_in_const_context() {
        const HELLO: u32 = fnv1a_32(b"a");

        assert_that!(HELLO, eq(0xe40c_292c));
    }
}
