use ethnum::U256;
use rand::{CryptoRng, Rng, RngCore};

use crate::Element;

impl Element {
    /// Sample a uniformly random canonical [`Element`]
    ///
    /// Rejection sampling keeps the distribution uniform over `0..MODULUS`
    #[must_use]
    pub fn secure_random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        loop {
            let candidate = Self(U256::from_be_bytes(rng.gen()) >> 2u32);
            if candidate.is_canonical() {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn random_elements_are_canonical_and_distinct() {
        let mut rng = ChaChaRng::from_seed([7; 32]);

        let a = Element::secure_random(&mut rng);
        let b = Element::secure_random(&mut rng);

        assert!(a.is_canonical());
        assert!(b.is_canonical());
        assert_ne!(a, b);
    }
}
