//! Fenwick tree (binary indexed tree) with order-statistic selection.
//!
//! Maintains per-slot counts over a fixed 1-based domain $[1, n]$ and
//! answers prefix aggregates and rank selections in $O(\log n)$.
//!
//! # Theory
//!
//! The array `bit` is an implicit forest: entry `bit[i]` aggregates the
//! slots $(i - 2^{\nu(i)}, i]$, where $\nu(i)$ is the number of trailing
//! zeros of $i$. Repeatedly clearing the lowest set bit of $i$ walks the
//! chain of disjoint blocks whose union is exactly $[1, i]$, so a prefix
//! sum touches $O(\log n)$ entries. Point updates walk the mirrored chain
//! `i += i & -i`.
//!
//! Rank selection (`kth`) runs a binary-lifting descent over the same
//! implicit tree: starting from the largest power of two $\le n$, it
//! commits each step whose block keeps the accumulated count below the
//! target rank. This is the classic $O(\log n)$ alternative to binary
//! searching over `prefix_sum`, and it is why slot counts must stay
//! non-negative: the descent assumes prefix sums are monotone in the index.

use std::ops::Sub;

use num_traits::Zero;

use crate::error::{Error, Result};

/// A Fenwick tree over the 1-based domain `1..=n`, generic over the
/// count type.
#[derive(Debug, Clone)]
pub struct FenwickTree<T> {
    /// Implicit tree, 1-indexed; `bit[0]` is unused padding.
    bit: Vec<T>,
    n: usize,
}

impl<T: Copy + Zero + Sub<Output = T> + PartialOrd> FenwickTree<T> {
    /// Create a tree of size `n` with every slot count zero.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            bit: vec![T::zero(); n + 1],
            n,
        }
    }

    /// Return the domain size `n`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the domain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Add `delta` to the slot at `index` (1-based).
    pub fn add(&mut self, index: usize, delta: T) -> Result<()> {
        if index == 0 || index > self.n {
            return Err(Error::IndexOutOfBounds(index));
        }
        let mut i = index;
        while i <= self.n {
            self.bit[i] = self.bit[i] + delta;
            i += i & i.wrapping_neg();
        }
        Ok(())
    }

    /// Return the total count over `1..=index`; `index` 0 yields zero.
    pub fn prefix_sum(&self, index: usize) -> Result<T> {
        if index > self.n {
            return Err(Error::IndexOutOfBounds(index));
        }
        Ok(self.prefix(index))
    }

    /// Return the total count over `l..=r` (1-based, inclusive).
    pub fn range_sum(&self, l: usize, r: usize) -> Result<T> {
        if l == 0 {
            return Err(Error::IndexOutOfBounds(l));
        }
        Ok(self.prefix_sum(r)? - self.prefix_sum(l - 1)?)
    }

    /// Return the total count over the whole domain.
    #[must_use]
    pub fn total(&self) -> T {
        self.prefix(self.n)
    }

    /// Return the smallest index `i` with `prefix_sum(i) >= k`.
    ///
    /// Requires `1 <= k <= total()`; a rank outside that range fails with
    /// [`Error::InvalidRank`]. Every slot count must be non-negative when
    /// this is called: the descent silently assumes monotone prefix sums
    /// and does not detect violations.
    pub fn kth(&self, k: T) -> Result<usize> {
        if k <= T::zero() || self.total() < k {
            return Err(Error::InvalidRank);
        }

        // Largest power of two <= n. The rank check above guarantees a
        // positive total, so n >= 1 here.
        let mut step = 1usize << (usize::BITS - 1 - self.n.leading_zeros());
        let mut idx = 0usize;
        let mut acc = T::zero();

        while step > 0 {
            let next = idx + step;
            if next <= self.n && acc + self.bit[next] < k {
                idx = next;
                acc = acc + self.bit[next];
            }
            step >>= 1;
        }
        Ok(idx + 1)
    }

    /// Unchecked prefix walk; `index` must be `<= n`.
    fn prefix(&self, index: usize) -> T {
        let mut acc = T::zero();
        let mut i = index;
        while i > 0 {
            acc = acc + self.bit[i];
            i -= i & i.wrapping_neg();
        }
        acc
    }
}

impl FenwickTree<i64> {
    /// Serialize this tree to a stable binary encoding (little-endian).
    ///
    /// Format (versioned):
    /// - magic: 8 bytes (`RWNDFT01`)
    /// - n: u64
    /// - `n + 1` i64 words (the implicit tree, padding slot included)
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"RWNDFT01");

        out.extend_from_slice(&(self.n as u64).to_le_bytes());
        for &w in &self.bit {
            out.extend_from_slice(&w.to_le_bytes());
        }

        out
    }

    /// Deserialize a tree from `to_bytes()` output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        const MAGIC: &[u8; 8] = b"RWNDFT01";
        let mut off = 0usize;

        let mut take = |n: usize| -> Result<&[u8]> {
            if off + n > bytes.len() {
                return Err(Error::InvalidEncoding(
                    "unexpected end of input".to_string(),
                ));
            }
            let slice = &bytes[off..off + n];
            off += n;
            Ok(slice)
        };

        let magic = take(8)?;
        if magic != MAGIC {
            return Err(Error::InvalidEncoding(
                "bad magic for FenwickTree".to_string(),
            ));
        }

        let n = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
        let mut bit = Vec::with_capacity(n + 1);
        for _ in 0..=n {
            let w = i64::from_le_bytes(take(8)?.try_into().unwrap());
            bit.push(w);
        }

        if off != bytes.len() {
            return Err(Error::InvalidEncoding(
                "trailing bytes after FenwickTree".to_string(),
            ));
        }

        Ok(Self { bit, n })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenwick_prefix_basic() {
        let mut fw = FenwickTree::<i64>::new(8);
        fw.add(3, 5).unwrap();
        fw.add(5, 2).unwrap();
        fw.add(3, -1).unwrap();

        assert_eq!(fw.prefix_sum(0).unwrap(), 0);
        assert_eq!(fw.prefix_sum(2).unwrap(), 0);
        assert_eq!(fw.prefix_sum(3).unwrap(), 4);
        assert_eq!(fw.prefix_sum(8).unwrap(), 6);
        assert_eq!(fw.range_sum(4, 8).unwrap(), 2);
        assert_eq!(fw.total(), 6);
    }

    #[test]
    fn test_fenwick_bounds() {
        let mut fw = FenwickTree::<i64>::new(4);
        assert!(matches!(fw.add(0, 1), Err(Error::IndexOutOfBounds(0))));
        assert!(matches!(fw.add(5, 1), Err(Error::IndexOutOfBounds(5))));
        assert!(matches!(fw.prefix_sum(5), Err(Error::IndexOutOfBounds(5))));
        assert!(matches!(fw.range_sum(0, 3), Err(Error::IndexOutOfBounds(0))));
    }

    #[test]
    fn test_fenwick_kth_basic() {
        let mut fw = FenwickTree::<i64>::new(10);
        fw.add(2, 3).unwrap();
        fw.add(7, 1).unwrap();
        fw.add(9, 2).unwrap();

        assert_eq!(fw.kth(1).unwrap(), 2);
        assert_eq!(fw.kth(3).unwrap(), 2);
        assert_eq!(fw.kth(4).unwrap(), 7);
        assert_eq!(fw.kth(5).unwrap(), 9);
        assert_eq!(fw.kth(6).unwrap(), 9);
        assert!(matches!(fw.kth(0), Err(Error::InvalidRank)));
        assert!(matches!(fw.kth(7), Err(Error::InvalidRank)));
    }

    #[test]
    fn test_fenwick_kth_non_power_of_two_domain() {
        // Domain 11 exercises the `next <= n` guard in the descent.
        let mut fw = FenwickTree::<i64>::new(11);
        for i in 1..=11 {
            fw.add(i, 1).unwrap();
        }
        for k in 1..=11 {
            assert_eq!(fw.kth(k as i64).unwrap(), k);
        }
    }

    #[test]
    fn test_fenwick_serialization_roundtrip() {
        let mut fw = FenwickTree::<i64>::new(6);
        fw.add(1, 4).unwrap();
        fw.add(6, -2).unwrap();

        let bytes = fw.to_bytes();
        let back = FenwickTree::from_bytes(&bytes).unwrap();
        assert_eq!(back.len(), 6);
        for i in 0..=6 {
            assert_eq!(back.prefix_sum(i).unwrap(), fw.prefix_sum(i).unwrap());
        }

        assert!(FenwickTree::from_bytes(b"BADMAGIC").is_err());
        assert!(FenwickTree::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }
}
