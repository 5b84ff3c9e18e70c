//! [`RadixKey`](crate::RadixKey) implementations for the standard types, plus the helpers
//! and macros that make user types sortable.

mod float;
mod option;
mod primitive;
mod sequence;
mod tuple;
mod variant;

pub use variant::{sort_tagged_union, tagged_cmp};
