//! Disjoint-set union with exact rollback.
//!
//! Tracks a partition of `0..n` under reversible `union` operations. Every
//! `union` appends exactly one record to a linear undo log, including
//! unions of already-connected elements, so log length stays aligned with
//! call count and `snapshot()` tokens are just log lengths.
//!
//! `find` deliberately performs no path compression. Compression would
//! mutate parent pointers outside the undo log and silently break
//! `rollback`; the trade is $O(\log n)$ finds (union-by-size keeps trees
//! shallow) for exact state restoration.

use crate::error::{Error, Result};

/// A union-find structure over `0..n` whose unions can be undone to any
/// earlier snapshot.
#[derive(Clone)]
pub struct RollbackUnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    log: Vec<HistoryEntry>,
    components: usize,
}

#[derive(Clone)]
enum HistoryEntry {
    Noop,
    Merge {
        child: usize,
        parent: usize,
        parent_size_before: usize,
    },
}

impl std::fmt::Debug for RollbackUnionFind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RollbackUnionFind")
            .field("len", &self.parent.len())
            .field("components", &self.components)
            .field("log_len", &self.log.len())
            .finish()
    }
}

impl RollbackUnionFind {
    /// Create `n` singleton components.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            log: Vec::new(),
            components: n,
        }
    }

    /// Return the number of elements `n`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Return true if the element universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Return the current number of components.
    #[must_use]
    pub fn components(&self) -> usize {
        self.components
    }

    /// Return the root of the component containing `x`.
    ///
    /// Pure parent-pointer walk; never writes, so no find ever needs to
    /// be undone.
    pub fn find(&self, x: usize) -> Result<usize> {
        if x >= self.parent.len() {
            return Err(Error::IndexOutOfBounds(x));
        }
        let mut node = x;
        while self.parent[node] != node {
            node = self.parent[node];
        }
        Ok(node)
    }

    /// Return the size of the component containing `x`.
    pub fn component_size(&self, x: usize) -> Result<usize> {
        Ok(self.size[self.find(x)?])
    }

    /// Return true if `a` and `b` are in the same component.
    pub fn connected(&self, a: usize, b: usize) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// Merge the components of `a` and `b`; returns true if they were
    /// previously disjoint.
    ///
    /// Appends exactly one log record per call. The smaller component is
    /// attached under the larger; already-connected arguments record a
    /// no-op so log length still tracks call count.
    pub fn union(&mut self, a: usize, b: usize) -> Result<bool> {
        let mut ra = self.find(a)?;
        let mut rb = self.find(b)?;
        if ra == rb {
            self.log.push(HistoryEntry::Noop);
            return Ok(false);
        }

        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }

        self.log.push(HistoryEntry::Merge {
            child: rb,
            parent: ra,
            parent_size_before: self.size[ra],
        });

        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        self.components -= 1;
        Ok(true)
    }

    /// Return a token identifying the current point in the undo log.
    #[must_use]
    pub fn snapshot(&self) -> usize {
        self.log.len()
    }

    /// Undo unions until the log is back at `token`.
    ///
    /// Backward-only: a token larger than the current log length fails
    /// with [`Error::InvalidSnapshot`]. Rolling back past intermediate
    /// snapshots is legal and simply unwinds through them.
    pub fn rollback(&mut self, token: usize) -> Result<()> {
        if token > self.log.len() {
            return Err(Error::InvalidSnapshot(token));
        }
        while self.log.len() > token {
            match self.log.pop() {
                None | Some(HistoryEntry::Noop) => {}
                Some(HistoryEntry::Merge {
                    child,
                    parent,
                    parent_size_before,
                }) => {
                    self.parent[child] = child;
                    self.size[parent] = parent_size_before;
                    self.components += 1;
                }
            }
        }
        Ok(())
    }

    /// Serialize this structure to a stable binary encoding
    /// (little-endian).
    ///
    /// Format (versioned):
    /// - magic: 8 bytes (`RWNDUF01`)
    /// - n: u64, then `n` parent words and `n` size words (u64)
    /// - components: u64
    /// - log_len: u64, then per record a tag byte (0 = no-op, 1 = merge)
    ///   followed, for merges, by child/parent/parent_size_before (u64)
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"RWNDUF01");

        out.extend_from_slice(&(self.parent.len() as u64).to_le_bytes());
        for &w in &self.parent {
            out.extend_from_slice(&(w as u64).to_le_bytes());
        }
        for &w in &self.size {
            out.extend_from_slice(&(w as u64).to_le_bytes());
        }

        out.extend_from_slice(&(self.components as u64).to_le_bytes());

        out.extend_from_slice(&(self.log.len() as u64).to_le_bytes());
        for entry in &self.log {
            match entry {
                HistoryEntry::Noop => out.push(0),
                HistoryEntry::Merge {
                    child,
                    parent,
                    parent_size_before,
                } => {
                    out.push(1);
                    out.extend_from_slice(&(*child as u64).to_le_bytes());
                    out.extend_from_slice(&(*parent as u64).to_le_bytes());
                    out.extend_from_slice(&(*parent_size_before as u64).to_le_bytes());
                }
            }
        }

        out
    }

    /// Deserialize a structure from `to_bytes()` output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        const MAGIC: &[u8; 8] = b"RWNDUF01";
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
                "bad magic for RollbackUnionFind".to_string(),
            ));
        }

        let n = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;

        let mut parent = Vec::with_capacity(n);
        for _ in 0..n {
            let w = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
            if w >= n {
                return Err(Error::InvalidEncoding(
                    "parent pointer out of range".to_string(),
                ));
            }
            parent.push(w);
        }

        let mut size = Vec::with_capacity(n);
        for _ in 0..n {
            let w = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
            size.push(w);
        }

        let components = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
        if components > n {
            return Err(Error::InvalidEncoding(
                "component count exceeds element count".to_string(),
            ));
        }

        let log_len = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
        let mut log = Vec::with_capacity(log_len);
        for _ in 0..log_len {
            match take(1)?[0] {
                0 => log.push(HistoryEntry::Noop),
                1 => {
                    let child = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
                    let parent_root = u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
                    let parent_size_before =
                        u64::from_le_bytes(take(8)?.try_into().unwrap()) as usize;
                    if child >= n || parent_root >= n {
                        return Err(Error::InvalidEncoding(
                            "log record index out of range".to_string(),
                        ));
                    }
                    log.push(HistoryEntry::Merge {
                        child,
                        parent: parent_root,
                        parent_size_before,
                    });
                }
                tag => {
                    return Err(Error::InvalidEncoding(format!(
                        "unknown log record tag {tag}"
                    )));
                }
            }
        }

        if off != bytes.len() {
            return Err(Error::InvalidEncoding(
                "trailing bytes after RollbackUnionFind".to_string(),
            ));
        }

        Ok(Self {
            parent,
            size,
            log,
            components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_find_basic() {
        let mut dsu = RollbackUnionFind::new(5);
        assert_eq!(dsu.components(), 5);

        assert!(dsu.union(0, 1).unwrap());
        assert!(dsu.union(3, 4).unwrap());
        assert!(!dsu.union(1, 0).unwrap());
        assert_eq!(dsu.components(), 3);

        assert!(dsu.connected(0, 1).unwrap());
        assert!(!dsu.connected(0, 3).unwrap());
        assert_eq!(dsu.component_size(1).unwrap(), 2);
        assert_eq!(dsu.component_size(2).unwrap(), 1);
    }

    #[test]
    fn test_union_find_bounds() {
        let mut dsu = RollbackUnionFind::new(3);
        assert!(matches!(dsu.find(3), Err(Error::IndexOutOfBounds(3))));
        assert!(matches!(dsu.union(0, 9), Err(Error::IndexOutOfBounds(9))));
        assert!(matches!(dsu.rollback(1), Err(Error::InvalidSnapshot(1))));
    }

    #[test]
    fn test_rollback_chain_round_trip() {
        let n = 3000;
        let mut dsu = RollbackUnionFind::new(n);

        let s1 = dsu.snapshot();
        for i in 1..n {
            dsu.union(i - 1, i).unwrap();
        }
        assert_eq!(dsu.components(), 1);

        dsu.rollback(s1).unwrap();
        assert_eq!(dsu.components(), n);
        for i in 0..n {
            assert_eq!(dsu.find(i).unwrap(), i);
            assert_eq!(dsu.component_size(i).unwrap(), 1);
        }
    }

    #[test]
    fn test_rollback_through_nested_snapshots() {
        let n = 300;
        let mut dsu = RollbackUnionFind::new(n);

        let s1 = dsu.snapshot();
        let mut j = 0;
        while j + 2 < n {
            dsu.union(j, j + 2).unwrap();
            j += 3;
        }
        let mid = dsu.components();
        assert!(mid < n);

        let s2 = dsu.snapshot();
        let mut k = 0;
        while k + 1 < n {
            dsu.union(k, k + 1).unwrap();
            k += 2;
        }
        assert!(dsu.components() <= mid);

        dsu.rollback(s2).unwrap();
        assert_eq!(dsu.components(), mid);

        // Unwinds straight through s2.
        dsu.rollback(s1).unwrap();
        assert_eq!(dsu.components(), n);
    }

    #[test]
    fn test_noop_records_keep_log_aligned() {
        let mut dsu = RollbackUnionFind::new(4);
        dsu.union(0, 1).unwrap();
        let before = dsu.snapshot();
        assert!(!dsu.union(0, 1).unwrap());
        assert_eq!(dsu.snapshot(), before + 1);

        dsu.rollback(before).unwrap();
        assert_eq!(dsu.components(), 3);
        assert!(dsu.connected(0, 1).unwrap());
    }

    #[test]
    fn test_union_find_serialization_roundtrip() {
        let mut dsu = RollbackUnionFind::new(6);
        dsu.union(0, 1).unwrap();
        dsu.union(1, 2).unwrap();
        dsu.union(0, 2).unwrap();
        let snap = dsu.snapshot();
        dsu.union(4, 5).unwrap();

        let bytes = dsu.to_bytes();
        let mut back = RollbackUnionFind::from_bytes(&bytes).unwrap();
        assert_eq!(back.len(), 6);
        assert_eq!(back.components(), dsu.components());
        for i in 0..6 {
            assert_eq!(back.find(i).unwrap(), dsu.find(i).unwrap());
        }

        // The undo log survives the round-trip.
        back.rollback(snap).unwrap();
        assert!(!back.connected(4, 5).unwrap());

        assert!(RollbackUnionFind::from_bytes(b"GARBAGE!").is_err());
    }
}
