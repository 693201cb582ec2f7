use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

pub const TABLE_SIZE: usize = 256;

// Seeded permutation of 0..=255, duplicated into 512 entries
// so that lookups like perm[perm[xi + 1] + yi + 1] never need a modulo.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; TABLE_SIZE * 2],
}

impl PermutationTable {
    pub fn new(seed: u64) -> Self {
        let mut p: Vec<u8> = (0..TABLE_SIZE).map(|i| i as u8).collect();
        // Fisher–Yates over a seeded ChaCha stream, so a seed always yields the same table
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        p.shuffle(&mut rng);

        let mut perm = [0u8; TABLE_SIZE * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }
        Self { perm }
    }

    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.perm[index] as usize
    }

    // Hash of lattice corner (xi, yi), both already masked to [0, 255]
    #[inline]
    pub fn hash2(&self, xi: usize, yi: usize) -> u8 {
        self.perm[self.get(xi) + yi]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{PermutationTable, TABLE_SIZE};

    #[test]
    fn permutation_is_a_permutation() {
        for seed in [0, 1, 42, 12345, u64::MAX] {
            let t = PermutationTable::new(seed);
            let mut seen = [false; TABLE_SIZE];
            for &v in &t.as_slice()[..TABLE_SIZE] {
                assert!(!seen[v as usize], "value {} repeated for seed {}", v, seed);
                seen[v as usize] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn permutation_upper_half_duplicates_lower() {
        let t = PermutationTable::new(2025);
        let s = t.as_slice();
        assert_eq!(s.len(), 512);
        for i in 0..TABLE_SIZE {
            assert_eq!(s[i], s[i + TABLE_SIZE]);
        }
    }

    #[test]
    fn permutation_determinism() {
        assert_eq!(PermutationTable::new(99), PermutationTable::new(99));
        assert_ne!(PermutationTable::new(99), PermutationTable::new(100));
    }

    #[test]
    fn hash2_stays_in_table_at_upper_corner() {
        let t = PermutationTable::new(7);
        // xi + 1 and yi + 1 may reach 256
        let h = t.hash2(256, 256);
        assert_eq!(h, t.as_slice()[t.get(256) + 256]);
    }
}
