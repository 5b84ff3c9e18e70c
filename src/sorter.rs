//! Recursion controller.
//!
//! A [`Sorter`] is handed to [`RadixKey::decompose`] for every partition that still needs
//! sorting. The key issues one step on it, and the sorter partitions the range and carries
//! on into every resulting bucket:
//!
//! - buckets below the insertion sort ceiling are insertion sorted with the best comparator
//!   available at that level,
//! - otherwise the step's continuation (`next`) sorts the bucket by the rest of the same key,
//! - otherwise, when the key was itself nested inside a composite key, the bucket is handed
//!   back to the enclosing key (`resume`) to sort by the fields that follow,
//! - otherwise the bucket is fully sorted.
//!
//! Every sorter must be handled exactly once: by a partition step, a skip or a fallback.
//! Debug builds check this on every level.

use std::cmp::Ordering;
use std::marker::PhantomData;
use std::ops::Range;

use crate::core::{ByteKey, RadixKey};
use crate::partition::partition_by_byte;
use crate::primitives::{insertion_sort, partition};
use crate::settings::SortSettings;

/// Hands a bucket back to the enclosing composite key: `(bucket, offset of the bucket)`.
pub(crate) type Resume<'s, T> = &'s dyn Fn(&mut [T], usize);

/// Borrows the key at the current level out of an element.
///
/// The key lives as long as both the element and the extractor, which is what lets a
/// projection be chained onto an extractor whose key type is unrelated to `T`.
pub(crate) trait Extract<T, K: ?Sized> {
    fn extract<'a>(&'a self, item: &'a T) -> &'a K;
}

/// Extractor from a key-projection closure.
pub(crate) struct KeyFn<F>(pub(crate) F);

impl<T, K: ?Sized, F> Extract<T, K> for KeyFn<F>
where
    F: Fn(&T) -> &K,
{
    #[inline(always)]
    fn extract<'a>(&'a self, item: &'a T) -> &'a K {
        (self.0)(item)
    }
}

/// Wraps `f` as an extractor, pinning the closure to `for<'a> Fn(&'a T) -> &'a K`.
#[inline(always)]
pub(crate) fn key_fn<T, K: ?Sized, F: Fn(&T) -> &K>(f: F) -> KeyFn<F> {
    KeyFn(f)
}

/// An enclosing key's extractor followed by a projection to one of its sub-keys.
struct ThenProject<'e, T, K: ?Sized, P> {
    outer: &'e dyn Extract<T, K>,
    project: P,
}

impl<T, K: ?Sized, K2: ?Sized, P> Extract<T, K2> for ThenProject<'_, T, K, P>
where
    P: Fn(&K) -> &K2,
{
    #[inline(always)]
    fn extract<'a>(&'a self, item: &'a T) -> &'a K2 {
        (self.project)(self.outer.extract(item))
    }
}

/// Insertion sorts `items` if it is below the ceiling for its element size.
///
/// Returns `true` if `items` is now sorted.
pub(crate) fn insertion_sort_if_small<T>(
    items: &mut [T],
    settings: &SortSettings,
    compare: &dyn Fn(&T, &T) -> Ordering,
) -> bool {
    let len = items.len();
    if len <= 1 {
        return true;
    }
    if len >= settings.insertion_sort_upper_limit(size_of::<T>()) {
        return false;
    }
    insertion_sort(items, compare);
    true
}

/// One partition of the sort, viewed through the key currently being decomposed.
///
/// `T` is the element type being moved, `K` the key type at this level. The sorter keeps
/// the key extraction from `T` to `K`, the full element comparator, the settings and the
/// continuation of an enclosing composite key, if any.
pub struct Sorter<'s, T, K: ?Sized> {
    pub(crate) items: &'s mut [T],
    pub(crate) offset: usize,
    pub(crate) extract: &'s dyn Extract<T, K>,
    pub(crate) compare: &'s dyn Fn(&T, &T) -> Ordering,
    pub(crate) resume: Option<Resume<'s, T>>,
    pub(crate) settings: &'s SortSettings,
    pub(crate) handled: bool,
    // Keys are borrowed for at most `'s`.
    key: PhantomData<&'s K>,
}

impl<'s, T, K: ?Sized> Sorter<'s, T, K> {
    pub(crate) fn new(
        items: &'s mut [T],
        extract: &'s dyn Extract<T, K>,
        compare: &'s dyn Fn(&T, &T) -> Ordering,
        settings: &'s SortSettings,
    ) -> Self {
        Self {
            items,
            offset: 0,
            extract,
            compare,
            resume: None,
            settings,
            handled: false,
            key: PhantomData,
        }
    }

    /// Number of elements in this partition.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Key of the first element.
    ///
    /// Keys handed a partition by the engine always have at least two elements, and all of
    /// them agree on everything decomposed so far, so this is a representative.
    pub fn first_item(&self) -> &K {
        self.extract.extract(&self.items[0])
    }

    /// Keys of every element of the partition, in their current order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        let extract = self.extract;
        self.items.iter().map(move |item| extract.extract(item))
    }

    pub fn settings(&self) -> &SortSettings {
        self.settings
    }

    pub(crate) fn is_handled(&self) -> bool {
        self.handled
    }

    pub(crate) fn mark_handled(&mut self) {
        debug_assert!(!self.handled, "sorting step issued twice on one partition");
        self.handled = true;
    }

    /// Partitions by one byte. The key is fully sorted once this byte is.
    pub fn sort_bytes<B>(&mut self, byte: B)
    where
        B: Fn(&K) -> u8,
    {
        self.byte_step(byte, None);
    }

    /// Partitions by one byte, then runs `next` on every bucket too large to insertion sort.
    pub fn sort_bytes_then<B>(&mut self, byte: B, next: &dyn Fn(&mut Sorter<'_, T, K>))
    where
        B: Fn(&K) -> u8,
    {
        self.byte_step(byte, Some(next));
    }

    /// Partitions into `false` followed by `true`. The key is fully sorted afterwards.
    pub fn sort_bools<P>(&mut self, pred: P)
    where
        P: Fn(&K) -> bool,
    {
        self.bool_step(pred, None);
    }

    /// Partitions into `false` followed by `true`, then runs `next` on both halves.
    pub fn sort_bools_then<P>(&mut self, pred: P, next: &dyn Fn(&mut Sorter<'_, T, K>))
    where
        P: Fn(&K) -> bool,
    {
        self.bool_step(pred, Some(next));
    }

    /// Sorts by a sub-key. The key is fully sorted once the sub-key is.
    pub fn sort_key<K2, P>(&mut self, project: P)
    where
        K2: RadixKey + ?Sized,
        P: Fn(&K) -> &K2,
    {
        self.key_step(project, None);
    }

    /// Sorts by a sub-key, then runs `next` on every run of equal sub-keys.
    ///
    /// This is how composite keys chain their fields: `next` usually projects the
    /// following field with another `sort_key` call.
    pub fn sort_key_then<K2, P>(&mut self, project: P, next: &dyn Fn(&mut Sorter<'_, T, K>))
    where
        K2: RadixKey + ?Sized,
        P: Fn(&K) -> &K2,
    {
        self.key_step(project, Some(next));
    }

    /// Installs `compare` as the comparator for insertion sorts and fallbacks below this
    /// level and runs `step` with it.
    ///
    /// `compare` only needs to order keys that agree on everything decomposed so far. When
    /// an enclosing key still has fields to sort, the full comparator is kept instead and
    /// `step` runs on this sorter directly.
    pub fn with_comparison<C, S>(&mut self, compare: C, step: S)
    where
        C: Fn(&K, &K) -> Ordering,
        S: FnOnce(&mut Sorter<'_, T, K>),
    {
        if self.resume.is_some() {
            step(self);
            return;
        }
        debug_assert!(!self.handled, "sorting step issued twice on one partition");

        let extract = self.extract;
        let faster = |a: &T, b: &T| compare(extract.extract(a), extract.extract(b));
        let mut sorter = Sorter {
            items: &mut *self.items,
            offset: self.offset,
            extract,
            compare: &faster,
            resume: None,
            settings: self.settings,
            handled: false,
            key: PhantomData,
        };
        step(&mut sorter);
        debug_assert!(sorter.handled, "sorting step left a partition unhandled");
        self.handled = true;
    }

    /// Marks every key of this partition as equal: nothing is left to sort at this level.
    pub fn skip(&mut self) {
        self.mark_handled();
        if let Some(resume) = self.resume {
            resume(self.items, self.offset);
        }
    }

    /// Sorts the partition with a comparison sort on the full comparator.
    pub fn fallback(&mut self) {
        self.mark_handled();
        let compare = self.compare;
        self.items.sort_unstable_by(|a, b| compare(a, b));
    }

    /// Sorts the partition with a comparison sort on `compare`.
    ///
    /// Like [`with_comparison`](Self::with_comparison), `compare` only needs to order keys
    /// that agree on everything decomposed so far; when an enclosing key still has fields
    /// to sort, the full comparator is used instead.
    pub fn fallback_by<C>(&mut self, compare: C)
    where
        C: Fn(&K, &K) -> Ordering,
    {
        if self.resume.is_some() {
            self.fallback();
            return;
        }
        self.mark_handled();
        let extract = self.extract;
        self.items
            .sort_unstable_by(|a, b| compare(extract.extract(a), extract.extract(b)));
    }

    fn byte_step<B>(&mut self, byte: B, next: Option<&dyn Fn(&mut Sorter<'_, T, K>)>)
    where
        B: Fn(&K) -> u8,
    {
        self.mark_handled();
        let extract = self.extract;
        let byte_of = |item: &T| byte(extract.extract(item));
        let buckets = partition_by_byte(self.items, self.settings, &byte_of);
        if next.is_none() && self.resume.is_none() {
            return;
        }
        for range in buckets.ranges() {
            self.recurse(range, next);
        }
    }

    fn bool_step<P>(&mut self, pred: P, next: Option<&dyn Fn(&mut Sorter<'_, T, K>)>)
    where
        P: Fn(&K) -> bool,
    {
        self.mark_handled();
        let extract = self.extract;
        let middle = partition(self.items, |item| !pred(extract.extract(item)));
        if next.is_none() && self.resume.is_none() {
            return;
        }
        let len = self.items.len();
        self.recurse(0..middle, next);
        self.recurse(middle..len, next);
    }

    fn key_step<K2, P>(&mut self, project: P, next: Option<&dyn Fn(&mut Sorter<'_, T, K>)>)
    where
        K2: RadixKey + ?Sized,
        P: Fn(&K) -> &K2,
    {
        self.mark_handled();
        let extract = self.extract;
        let compare = self.compare;
        let outer = self.resume;
        let settings = self.settings;

        // Runs of equal sub-keys come back here to be sorted by the rest of this key.
        let resume_here;
        let resume: Option<Resume<'_, T>> = match next {
            Some(next) => {
                resume_here = move |items: &mut [T], offset: usize| {
                    let mut sorter = Sorter {
                        items,
                        offset,
                        extract,
                        compare,
                        resume: outer,
                        settings,
                        handled: false,
                        key: PhantomData,
                    };
                    next(&mut sorter);
                    debug_assert!(sorter.handled, "sorting step left a partition unhandled");
                };
                Some(&resume_here)
            }
            None => outer,
        };

        let composed = ThenProject {
            outer: extract,
            project,
        };
        let mut sorter: Sorter<'_, T, K2> = Sorter {
            items: &mut *self.items,
            offset: self.offset,
            extract: &composed,
            compare,
            resume,
            settings,
            handled: false,
            key: PhantomData,
        };
        K2::decompose(&mut sorter);
        debug_assert!(sorter.handled, "sorting step left a partition unhandled");
    }

    /// Finishes one bucket left behind by a partition step.
    fn recurse(&mut self, range: Range<usize>, next: Option<&dyn Fn(&mut Sorter<'_, T, K>)>) {
        let offset = self.offset + range.start;
        let items = &mut self.items[range];
        if insertion_sort_if_small(items, self.settings, self.compare) {
            return;
        }
        match next {
            Some(next) => {
                let mut sorter = Sorter {
                    items,
                    offset,
                    extract: self.extract,
                    compare: self.compare,
                    resume: self.resume,
                    settings: self.settings,
                    handled: false,
                    key: PhantomData,
                };
                next(&mut sorter);
                debug_assert!(sorter.handled, "sorting step left a partition unhandled");
            }
            None => {
                if let Some(resume) = self.resume {
                    resume(items, offset);
                }
            }
        }
    }
}

impl<'s, T, K: ByteKey + ?Sized> Sorter<'s, T, K> {
    /// Partitions by every byte of a fixed-width key, most significant first.
    pub fn sort_byte_levels(&mut self) {
        sort_levels(self, 0);
    }
}

fn sort_levels<T, K: ByteKey + ?Sized>(sorter: &mut Sorter<'_, T, K>, level: usize) {
    let byte = move |key: &K| key.get_level(level);
    if level + 1 >= K::LEVELS {
        sorter.sort_bytes(byte);
    } else {
        sorter.sort_bytes_then(byte, &|s: &mut Sorter<'_, T, K>| sort_levels(s, level + 1));
    }
}
