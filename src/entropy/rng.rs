//! HMAC-keyed deterministic draws.
//!
//! Each draw is a pure function of `(key, data, counter)`:
//! `HMAC-SHA256(key, data || decimal(counter))`, of which the first 48 bits
//! are read as a big-endian integer. Dividing by 2^48 gives a fraction in
//! `[0, 1)`; indices are derived from it in exact integer arithmetic.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Bits taken from each HMAC tag.
pub const DRAW_BITS: u32 = 48;

/// A keyed draw source bound to one message.
///
/// The key and message are absorbed once; each draw clones the primed
/// state and appends only the counter.
#[derive(Clone)]
pub struct KeyedDraw {
    mac: HmacSha256,
}

impl KeyedDraw {
    /// Binds a draw source to `key` and `data`.
    pub fn new(key: &[u8], data: &[u8]) -> Self {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(data);
        Self { mac }
    }

    /// Returns the 48-bit draw for `counter`.
    pub fn draw(&self, counter: usize) -> u64 {
        let mut mac = self.mac.clone();
        mac.update(counter.to_string().as_bytes());
        let tag = mac.finalize().into_bytes();

        let mut bytes = [0u8; 8];
        bytes[2..].copy_from_slice(&tag[..6]);
        u64::from_be_bytes(bytes)
    }

    /// Returns the draw for `counter` as a fraction in `[0, 1)`.
    pub fn fraction(&self, counter: usize) -> f64 {
        self.draw(counter) as f64 / (1u64 << DRAW_BITS) as f64
    }

    /// Returns `floor(fraction(counter) * bound)`, always below `bound`.
    pub fn index(&self, counter: usize, bound: usize) -> usize {
        ((u128::from(self.draw(counter)) * bound as u128) >> DRAW_BITS) as usize
    }

    /// Fisher-Yates shuffle driven by this source.
    ///
    /// For `i` from `len - 1` down to 1, swaps `items[i]` with
    /// `items[index(i, i + 1)]`. Slices of length 0 or 1 are left as is.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i, i + 1);
            items.swap(i, j);
        }
    }
}

impl std::fmt::Debug for KeyedDraw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedDraw").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_matches_truncated_hmac() {
        let source = KeyedDraw::new(b"123456", b"ERIKA");

        let mut mac = HmacSha256::new_from_slice(b"123456").unwrap();
        mac.update(b"ERIKA7");
        let tag = mac.finalize().into_bytes();
        let expected = u64::from_str_radix(&hex::encode(&tag[..6]), 16).unwrap();

        assert_eq!(source.draw(7), expected);
    }

    #[test]
    fn test_draw_is_deterministic() {
        let a = KeyedDraw::new(b"key", b"data");
        let b = KeyedDraw::new(b"key", b"data");
        assert_eq!(a.draw(3), b.draw(3));
        assert_ne!(a.draw(3), a.draw(4));
    }

    #[test]
    fn test_key_and_data_both_matter() {
        let base = KeyedDraw::new(b"key", b"data");
        assert_ne!(base.draw(1), KeyedDraw::new(b"kez", b"data").draw(1));
        assert_ne!(base.draw(1), KeyedDraw::new(b"key", b"datb").draw(1));
    }

    #[test]
    fn test_fraction_in_unit_interval() {
        let source = KeyedDraw::new(b"key", b"data");
        for counter in 0..200 {
            let r = source.fraction(counter);
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_index_below_bound() {
        let source = KeyedDraw::new(b"key", b"data");
        for bound in 1..64 {
            assert!(source.index(bound, bound) < bound);
        }
        assert_eq!(source.index(5, 1), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let source = KeyedDraw::new(b"secret", b"payload");
        let mut items: Vec<u32> = (0..50).collect();
        source.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        assert_ne!(items, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_trivial_slices_untouched() {
        let source = KeyedDraw::new(b"secret", b"payload");
        let mut empty: [u8; 0] = [];
        let mut single = [42u8];
        source.shuffle(&mut empty);
        source.shuffle(&mut single);
        assert_eq!(single, [42]);
    }
}
