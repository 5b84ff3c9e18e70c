//! # skasort
//!
//! `skasort` is a generic in-place radix sort. It sorts slices of integers, floats, strings,
//! tuples, options, enums, nested vectors and user types in linear time, falling back to
//! comparison sorting only for tiny partitions and pathologically long shared prefixes.
//!
//! Keys describe themselves through the [`RadixKey`] trait: a key breaks down into bytes,
//! booleans and nested keys, and the engine partitions on each piece in turn, most
//! significant first.
//!
//! ## Key Features
//!
//! - **In-Place**: elements are moved with swaps only. The one exception is forward-only
//!   containers such as `LinkedList`, which are sorted through index proxies and permuted
//!   once at the end.
//! - **Two Partition Strategies**: American flag sort for partitions below 2048 elements,
//!   ska_byte sort (fewer swaps, more bookkeeping) above that.
//! - **Prefix Skipping**: sequences skip the prefix a whole partition shares before
//!   partitioning, so long common prefixes cost one comparison pass instead of one
//!   partition pass per byte.
//! - **Composite Keys**: tuples, `Option`, enums and structs chain the sort of each
//!   component without re-sorting anything.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use skasort::radix_sort;
//!
//! let mut data = vec!["banana", "apple", "cherry", "date"];
//! radix_sort(&mut data);
//!
//! assert_eq!(data, vec!["apple", "banana", "cherry", "date"]);
//! ```
//!
//! Or through the extension trait:
//!
//! ```rust
//! use skasort::RadixSort;
//!
//! let mut data = vec![(2u8, -1.5f32), (1, 4.0), (2, -3.0)];
//! data.radix_sort_unstable();
//!
//! assert_eq!(data, vec![(1, 4.0), (2, -3.0), (2, -1.5)]);
//! ```
//!
//! ### Custom Types
//!
//! Structs and enums get their implementation from a macro:
//!
//! ```rust
//! use skasort::{radix_key_struct, radix_sort_by_key};
//!
//! struct User {
//!     username: String,
//!     age: u8,
//! }
//!
//! struct Entry {
//!     user: User,
//!     visits: u64,
//! }
//!
//! radix_key_struct!(User { age, username });
//!
//! let mut entries = vec![
//!     Entry { user: User { username: "carol".into(), age: 31 }, visits: 1 },
//!     Entry { user: User { username: "alice".into(), age: 31 }, visits: 7 },
//!     Entry { user: User { username: "bob".into(), age: 19 }, visits: 3 },
//! ];
//! radix_sort_by_key(&mut entries, |entry| &entry.user);
//!
//! let visits: Vec<u64> = entries.iter().map(|entry| entry.visits).collect();
//! assert_eq!(visits, vec![3, 7, 1]);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Fixed-width keys**: O(N * key bytes), with one counting pass and one swap pass per
//!   byte level.
//! - **Sequences**: O(N * distinguishing prefix), plus one comparison pass per level to
//!   find the shared prefix.
//! - **Memory Overhead**: none for random-access keys beyond the recursion stack; one
//!   `(key, index)` pair per element for [`radix_sort_by_cached_key`] and forward-only
//!   containers.

pub mod algo;
mod bitset;
pub mod core;
mod keys;
mod partition;
mod primitives;
pub mod settings;
mod sorter;

pub use algo::{
    RadixSort, radix_sort, radix_sort_by_cached_key, radix_sort_by_cached_key_with_settings,
    radix_sort_by_key, radix_sort_by_key_with_settings, radix_sort_with_settings,
};
pub use crate::core::{ByteKey, IndexedSequence, RadixKey, Sequence, TaggedUnion, lexicographic_cmp};
pub use keys::{sort_tagged_union, tagged_cmp};
pub use settings::{CountWidth, InsertionSortLimits, SettingsError, SortSettings, SortSettingsBuilder};
pub use sorter::Sorter;

pub mod prelude {
    pub use crate::algo::{RadixSort, radix_sort, radix_sort_by_cached_key, radix_sort_by_key};
    pub use crate::core::RadixKey;
    pub use crate::{radix_key_enum, radix_key_struct};
}
