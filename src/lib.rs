//! # Versioned & Rollback-Capable Collections
//!
//! *Every past state of the structure stays one index away.*
//!
//! ## Intuition First
//!
//! Imagine an accountant who never uses an eraser. Corrections are new
//! ledger lines; checkpoints are just line numbers. To see the books as
//! they stood last Tuesday, you don't restore a backup; you read the
//! ledger only up to Tuesday's line number.
//!
//! Everything in this crate is built that way: state lives in flat,
//! append-only arrays, and "going back" is either replaying an undo log
//! tail in reverse (rollback) or simply addressing an older block of the
//! arena (persistence).
//!
//! ## The Problem
//!
//! Mutable structures answer queries about *now* and destroy the past;
//! naive snapshotting keeps the past but costs a full copy per mutation.
//! Offline algorithms want both cheaply: branch-and-bound over unions,
//! divide-and-conquer over time, rank queries against any historical
//! state.
//!
//! ## Historical Context
//!
//! ```text
//! 1964  Galler-Fischer  Disjoint-set forests for equivalence relations
//! 1975  Tarjan          Inverse-Ackermann bound for union-find
//! 1986  Driscoll et al. General techniques for making structures persistent
//! 1989  Westbrook       Union-find with backtracking, analyzed
//! 1994  Fenwick         Binary indexed trees for cumulative frequencies
//! 1998  Okasaki         Purely functional structures popularize versioning
//! ```
//!
//! ## Mathematical Formulation
//!
//! For a multiset over $[1, n]$ with slot counts $c_i \ge 0$:
//! - `prefix_sum(i)` $= \sum_{j \le i} c_j$ in $O(\log n)$.
//! - `kth(k)` $= \min \{ i : \mathrm{prefix\_sum}(i) \ge k \}$ in
//!   $O(\log n)$, valid for $1 \le k \le \mathrm{prefix\_sum}(n)$.
//!
//! A structure is *fully persistent* when an update applied to any
//! version yields a new version and leaves all existing versions
//! readable. A structure is *rollback-capable* when updates can be
//! undone in LIFO order to any recorded checkpoint.
//!
//! ## Complexity Analysis
//!
//! - **`FenwickTree`**: $O(\log n)$ update, prefix, and rank selection.
//! - **`RollbackUnionFind`**: $O(\log n)$ find/union (union-by-size, no
//!   compression), $O(1)$ amortized per undone record.
//! - **`PersistentStack`**: $O(1)$ push/pop/top per version, with
//!   structural sharing across versions.
//! - **`PersistentArray`**: $O(1)$ reads, $O(n)$ per write (full block
//!   copy, no sharing).
//!
//! ## What Could Go Wrong
//!
//! 1. **Path compression**: the classic union-find "optimization" writes
//!    parent pointers outside the undo log and silently corrupts
//!    rollback. `find` here never mutates; resist restoring compression
//!    without also logging its writes.
//! 2. **Negative slot counts**: `kth`'s descent assumes prefix sums are
//!    monotone in the index. `add` happily accepts negative deltas for
//!    prefix queries, but a structure with any negative slot gives
//!    meaningless rank selections.
//! 3. **Unbounded history**: nothing here garbage-collects superseded
//!    versions or log records. Memory grows monotonically with writes,
//!    on purpose.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`FenwickTree`**: implicit binary-indexed counts with rank
//!   selection.
//! - **`OrderedMultiset`**: ordered integer multiset layered on the
//!   Fenwick tree.
//! - **`RollbackUnionFind`**: disjoint sets with snapshot/rollback.
//! - **`PersistentStack`**: cons-cell arena, branching version history.
//! - **`PersistentArray`**: flat block arena, full-copy-on-write.
//!
//! All four core structures are single-threaded by contract: reads of
//! frozen versions are freely shareable, mutation requires exclusive
//! access, and no operation blocks.
//!
//! ## References
//!
//! - Fenwick, P. M. (1994). "A New Data Structure for Cumulative
//!   Frequency Tables."
//! - Driscoll, J. R., Sarnak, N., Sleator, D. D., & Tarjan, R. E.
//!   (1989). "Making Data Structures Persistent."
//! - Westbrook, J., & Tarjan, R. E. (1989). "Amortized Analysis of
//!   Algorithms for Set Union with Backtracking."
//! - Okasaki, C. (1998). "Purely Functional Data Structures."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod error;
pub mod fenwick;
pub mod multiset;
pub mod naive;
pub mod stack;
pub mod union_find;

pub use array::PersistentArray;
pub use error::Error;
pub use fenwick::FenwickTree;
pub use multiset::OrderedMultiset;
pub use stack::PersistentStack;
pub use union_find::RollbackUnionFind;
