//! Sequence keys: strings, slices, vectors and forward-only containers.
//!
//! Sequences sort lexicographically, a proper prefix first. Each level skips the prefix
//! the whole partition shares, partitions on "has an element at this position", then on
//! the element itself, and moves on to the next position for every run of equal elements.
//! After [`SortSettings::sequence_recursion_limit`] positions the rest of the partition is
//! comparison sorted.
//!
//! Random-access sequences ([`IndexedSequence`]) are moved directly. Forward-only ones
//! ([`Sequence`]) are sorted through `(cursor, index)` proxies which are advanced in place,
//! and the original elements are permuted once at the end.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{BTreeSet, LinkedList, VecDeque};
use std::ops::Range;

use crate::algo::apply_permutation;
use crate::core::{IndexedSequence, RadixKey, Sequence, lexicographic_cmp};
use crate::settings::SortSettings;
use crate::sorter::{Extract, Sorter, key_fn};

impl<'s, T, S: IndexedSequence + ?Sized> Sorter<'s, T, S> {
    /// Sorts random-access sequences lexicographically by their elements.
    pub fn sort_indexed(&mut self) {
        let limit = self.settings.sequence_recursion_limit();
        sort_indexed_from(self, 0, limit);
    }
}

/// Length of the prefix, from `start` on, shared by every sequence of the partition.
fn common_prefix<T, S>(sorter: &Sorter<'_, T, S>, start: usize) -> usize
where
    S: IndexedSequence + ?Sized,
{
    let mut keys = sorter.keys();
    let Some(first) = keys.next() else {
        return start;
    };
    let mut largest = first.element_count();
    if largest <= start {
        return start;
    }
    for current in keys {
        largest = largest.min(current.element_count());
        if largest <= start {
            return start;
        }
        let mismatch = (start..largest).find(|&i| {
            first.element(i).radix_cmp(current.element(i)) != Ordering::Equal
        });
        if let Some(index) = mismatch {
            if index == start {
                return start;
            }
            largest = index;
        }
    }
    largest
}

fn sort_indexed_from<T, S>(sorter: &mut Sorter<'_, T, S>, index: usize, limit: usize)
where
    S: IndexedSequence + ?Sized,
{
    let index = common_prefix(sorter, index);
    sorter.sort_bools_then(
        move |sequence: &S| sequence.element_count() > index,
        &move |s: &mut Sorter<'_, T, S>| {
            if s.first_item().element_count() <= index {
                s.skip();
                return;
            }
            s.with_comparison(
                move |a: &S, b: &S| a.tail_cmp(b, index),
                move |s: &mut Sorter<'_, T, S>| sort_element(s, index, limit),
            );
        },
    );
}

fn sort_element<T, S>(sorter: &mut Sorter<'_, T, S>, index: usize, limit: usize)
where
    S: IndexedSequence + ?Sized,
{
    sorter.sort_key_then(
        move |sequence: &S| sequence.element(index),
        &move |s: &mut Sorter<'_, T, S>| {
            let index = index + 1;
            if limit <= 1 {
                log::debug!(
                    "sequence keys still tied after {index} elements, comparison sorting {} items",
                    s.len()
                );
                s.fallback_by(move |a: &S, b: &S| a.tail_cmp(b, index));
            } else {
                sort_indexed_from(s, index, limit - 1);
            }
        },
    );
}

/// A forward cursor with its current element pulled out, so that the element can be used
/// as a key by reference.
struct ForwardCursor<I: Iterator> {
    head: Option<I::Item>,
    rest: I,
}

impl<'a, E, I> ForwardCursor<I>
where
    E: RadixKey + ?Sized + 'a,
    I: Iterator<Item = &'a E> + Clone,
{
    fn new(mut rest: I) -> Self {
        let head = rest.next();
        Self { head, rest }
    }

    fn advance(&mut self) {
        self.head = self.rest.next();
    }

    /// Current element followed by the rest of the sequence.
    fn elements(&self) -> impl Iterator<Item = &'a E> + use<'a, E, I> {
        self.head.into_iter().chain(self.rest.clone())
    }

    fn cmp_remaining(&self, other: &Self) -> Ordering {
        lexicographic_cmp(self.elements(), other.elements())
    }
}

type Proxy<I> = (ForwardCursor<I>, usize);

impl<'s, T, S: Sequence + ?Sized> Sorter<'s, T, S> {
    /// Sorts forward-only sequences lexicographically by their elements.
    ///
    /// The sequences are not moved while they are being compared: a `(cursor, index)` proxy
    /// per element is sorted instead and the resulting permutation applied at the end. When
    /// an enclosing key still has fields to sort, the runs of equal sequences are recorded
    /// on the proxies and handed back to it once the elements are in place.
    pub fn sort_sequence(&mut self) {
        self.mark_handled();
        log::trace!("sorting {} forward sequences through proxies", self.len());

        let outer = self.resume;
        let (order, runs) = sort_proxies(
            &*self.items,
            self.extract,
            self.compare,
            outer.is_some(),
            self.settings,
        );

        apply_permutation(self.items, order);
        if let Some(resume) = outer {
            for run in runs {
                let offset = self.offset + run.start;
                resume(&mut self.items[run], offset);
            }
        }
    }
}

/// Sorts proxies for `items`, returning the final position of every item and, when
/// `record_runs` is set, the runs of equal sequences still needing the enclosing key.
fn sort_proxies<'a, T, S>(
    items: &'a [T],
    extract: &'a dyn Extract<T, S>,
    compare: &dyn Fn(&T, &T) -> Ordering,
    record_runs: bool,
    settings: &SortSettings,
) -> (Vec<usize>, Vec<Range<usize>>)
where
    S: Sequence + ?Sized + 'a,
{
    let mut proxies: Vec<Proxy<S::Cursor<'a>>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (ForwardCursor::new(extract.extract(item).cursor()), index))
        .collect();

    let runs = RefCell::new(Vec::new());
    let record = |run: &mut [Proxy<S::Cursor<'a>>], offset: usize| {
        runs.borrow_mut().push(offset..offset + run.len());
    };
    let by_item = |a: &Proxy<S::Cursor<'a>>, b: &Proxy<S::Cursor<'a>>| {
        compare(&items[a.1], &items[b.1])
    };
    let by_cursor = |a: &Proxy<S::Cursor<'a>>, b: &Proxy<S::Cursor<'a>>| a.0.cmp_remaining(&b.0);
    let cursor_of = key_fn::<Proxy<S::Cursor<'a>>, ForwardCursor<S::Cursor<'a>>, _>(|proxy| &proxy.0);

    let limit = settings.sequence_recursion_limit();
    if record_runs {
        let mut sorter = Sorter::new(&mut proxies, &cursor_of, &by_item, settings);
        sorter.resume = Some(&record);
        sort_cursors(&mut sorter, limit);
        debug_assert!(sorter.is_handled(), "sorting step left a partition unhandled");
    } else {
        let mut sorter = Sorter::new(&mut proxies, &cursor_of, &by_cursor, settings);
        sort_cursors(&mut sorter, limit);
        debug_assert!(sorter.is_handled(), "sorting step left a partition unhandled");
    }

    let order = proxies.into_iter().map(|(_, index)| index).collect();
    (order, runs.into_inner())
}

/// Advances every cursor past the elements the whole partition has in common.
fn skip_common_prefix<'a, E, I>(sorter: &mut Sorter<'_, Proxy<I>, ForwardCursor<I>>)
where
    E: RadixKey + ?Sized + 'a,
    I: Iterator<Item = &'a E> + Clone,
{
    let shared = {
        let mut keys = sorter.keys();
        let Some(first) = keys.next() else {
            return;
        };
        if first.head.is_none() {
            return;
        }
        let mut shared = usize::MAX;
        for current in keys {
            let matched = current
                .elements()
                .zip(first.elements())
                .take(shared)
                .take_while(|(a, b)| a.radix_cmp(b) == Ordering::Equal)
                .count();
            shared = shared.min(matched);
            if shared == 0 {
                return;
            }
        }
        shared
    };
    if shared == usize::MAX {
        return;
    }
    for (cursor, _) in sorter.items.iter_mut() {
        for _ in 0..shared {
            cursor.advance();
        }
    }
}

fn sort_cursors<'a, E, I>(sorter: &mut Sorter<'_, Proxy<I>, ForwardCursor<I>>, limit: usize)
where
    E: RadixKey + ?Sized + 'a,
    I: Iterator<Item = &'a E> + Clone,
{
    skip_common_prefix(sorter);
    sorter.sort_key_then(
        |cursor: &ForwardCursor<I>| &cursor.head,
        &move |s: &mut Sorter<'_, Proxy<I>, ForwardCursor<I>>| {
            if s.first_item().head.is_none() {
                s.skip();
                return;
            }
            for (cursor, _) in s.items.iter_mut() {
                cursor.advance();
            }
            if limit <= 1 {
                log::debug!(
                    "forward sequence keys still tied, comparison sorting {} items",
                    s.len()
                );
                s.fallback_by(|a: &ForwardCursor<I>, b: &ForwardCursor<I>| a.cmp_remaining(b));
            } else {
                sort_cursors(s, limit - 1);
            }
        },
    );
}

impl<E: RadixKey> IndexedSequence for [E] {
    type Element = E;

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn element(&self, index: usize) -> &E {
        &self[index]
    }

    fn tail_cmp(&self, other: &Self, from: usize) -> Ordering {
        E::slice_cmp(&self[from..], &other[from..])
    }
}

impl<E: RadixKey> RadixKey for [E] {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_indexed();
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        E::slice_cmp(self, other)
    }
}

impl IndexedSequence for str {
    type Element = u8;

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn element(&self, index: usize) -> &u8 {
        &self.as_bytes()[index]
    }

    fn tail_cmp(&self, other: &Self, from: usize) -> Ordering {
        self.as_bytes()[from..].cmp(&other.as_bytes()[from..])
    }
}

impl RadixKey for str {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_indexed();
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl RadixKey for String {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_key(String::as_str);
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl<E: RadixKey> RadixKey for Vec<E> {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_key(|vec: &Vec<E>| vec.as_slice());
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        E::slice_cmp(self, other)
    }
}

impl<E: RadixKey, const N: usize> RadixKey for [E; N] {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_key(|array: &[E; N]| array.as_slice());
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        E::slice_cmp(self, other)
    }
}

impl<E: RadixKey> IndexedSequence for VecDeque<E> {
    type Element = E;

    #[inline]
    fn element_count(&self) -> usize {
        self.len()
    }

    #[inline]
    fn element(&self, index: usize) -> &E {
        &self[index]
    }
}

impl<E: RadixKey> RadixKey for VecDeque<E> {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_indexed();
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        lexicographic_cmp(self.iter(), other.iter())
    }
}

macro_rules! impl_forward_sequence {
    ($($container:ident => $module:ident;)*) => {
        $(
            impl<E: RadixKey> Sequence for $container<E> {
                type Element = E;
                type Cursor<'a>
                    = std::collections::$module::Iter<'a, E>
                where
                    E: 'a;

                fn cursor(&self) -> Self::Cursor<'_> {
                    self.iter()
                }
            }

            impl<E: RadixKey> RadixKey for $container<E> {
                fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
                    sorter.sort_sequence();
                }

                fn radix_cmp(&self, other: &Self) -> Ordering {
                    lexicographic_cmp(self.iter(), other.iter())
                }
            }
        )*
    };
}

impl_forward_sequence! {
    LinkedList => linked_list;
    BTreeSet => btree_set;
}
