//! Persistent fixed-size array with full-copy-on-write versions.
//!
//! One flat arena holds every version as a consecutive block of `n`
//! elements; version `v` occupies `v*n..(v+1)*n` and is immutable once
//! appended. A write copies the whole source block and substitutes one
//! element, so each `set_value` costs $O(n)$ time and space.
//!
//! That is a deliberate trade: no structural sharing means reads are a
//! single offset computation with perfect locality, and the immutability
//! invariant is just "the arena only grows". A path-copying tree would
//! bring writes down to $O(\log n)$ at the price of pointer chasing on
//! every read; callers who need that should swap the internals and keep
//! this interface.

use num_traits::Zero;

use crate::error::{Error, Result};

/// A persistent array of fixed logical length; every write yields a new
/// version and all prior versions stay readable.
pub struct PersistentArray<T> {
    n: usize,
    versions: Vec<T>,
    version_count: usize,
}

impl<T> std::fmt::Debug for PersistentArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistentArray")
            .field("len", &self.n)
            .field("versions", &self.version_count)
            .finish()
    }
}

impl<T: Clone + Default> PersistentArray<T> {
    /// Create an array of logical length `n`; version 0 is all
    /// default-valued.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self::with_fill(n, T::default())
    }
}

impl<T: Clone> PersistentArray<T> {
    /// Create an array of logical length `n`; version 0 is all `fill`.
    #[must_use]
    pub fn with_fill(n: usize, fill: T) -> Self {
        Self {
            n,
            versions: vec![fill; n],
            version_count: 1,
        }
    }

    /// Return the fixed logical length `n`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the logical length is 0.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the number of materialized versions (always >= 1).
    #[must_use]
    pub fn versions(&self) -> usize {
        self.version_count
    }

    /// Approximate heap memory usage in bytes.
    #[must_use]
    pub fn heap_bytes(&self) -> usize {
        self.versions.capacity() * std::mem::size_of::<T>()
    }

    /// Write `value` at `idx` on top of version `ver`; returns the new
    /// version id. Copies the whole block: O(n).
    pub fn set_value(&mut self, ver: usize, idx: usize, value: T) -> Result<usize> {
        if idx >= self.n {
            return Err(Error::IndexOutOfBounds(idx));
        }
        let base = self.base(ver)?;

        self.versions.reserve(self.n);
        for i in 0..self.n {
            let cell = if i == idx {
                value.clone()
            } else {
                self.versions[base + i].clone()
            };
            self.versions.push(cell);
        }
        self.version_count += 1;
        Ok(self.version_count - 1)
    }

    /// Read the element at `idx` of version `ver`. Pure read.
    pub fn get(&self, ver: usize, idx: usize) -> Result<&T> {
        if idx >= self.n {
            return Err(Error::IndexOutOfBounds(idx));
        }
        let base = self.base(ver)?;
        Ok(&self.versions[base + idx])
    }

    fn base(&self, ver: usize) -> Result<usize> {
        if ver >= self.version_count {
            return Err(Error::InvalidVersion(ver));
        }
        Ok(ver * self.n)
    }
}

impl<T: Clone + Zero> PersistentArray<T> {
    /// Sum the elements of version `ver` over `l..=r` (0-based,
    /// inclusive). Linear scan.
    pub fn range_sum(&self, ver: usize, l: usize, r: usize) -> Result<T> {
        if r >= self.n {
            return Err(Error::IndexOutOfBounds(r));
        }
        if l > r {
            return Err(Error::IndexOutOfBounds(l));
        }
        let base = self.base(ver)?;
        let mut acc = T::zero();
        for i in l..=r {
            acc = acc + self.versions[base + i].clone();
        }
        Ok(acc)
    }
}
