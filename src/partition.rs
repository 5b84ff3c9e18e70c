//! Single-byte partitioning passes.
//!
//! Both strategies rearrange a range in place so that it is bucket sorted by the byte
//! returned from the extraction step, and report the populated buckets in ascending
//! byte order:
//!
//! - **American flag**: one counting pass, then every unsettled bucket chases its
//!   misplaced elements around displacement cycles until the cycle closes.
//! - **Ska byte**: the same counting pass, then repeated settling rounds over the list of
//!   unsettled buckets. Each round sweeps a bucket's remaining region once and swaps every
//!   element straight into its target bucket, which amortizes the bookkeeping across long
//!   runs of already placed elements.
//!
//! Small ranges use American flag partitioning with 8-bit counters; everything at or above
//! [`SortSettings::american_flag_sort_upper_limit`] uses ska byte partitioning.

use std::ops::Range;

use crate::bitset::PresenceSet;
use crate::primitives::{partition_non_empty, unroll_for_each};
use crate::settings::{CountWidth, SortSettings};

const BUCKETS: usize = 256;

/// Histogram counter type.
pub(crate) trait Count: Copy + Default {
    fn from_usize(value: usize) -> Self;
    fn to_usize(self) -> usize;
}

macro_rules! impl_count {
    ($($t:ty)*) => {
        $(
            impl Count for $t {
                #[inline(always)]
                fn from_usize(value: usize) -> Self {
                    value as $t
                }

                #[inline(always)]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_count!(u8 u16 u32 u64);

/// Populated buckets of a partitioned range.
pub(crate) struct Buckets {
    ends: [usize; BUCKETS],
    present: PresenceSet,
}

impl Buckets {
    /// Number of populated buckets.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.present.len()
    }

    /// Sub-ranges of the populated buckets, in ascending byte order.
    pub(crate) fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let mut start = 0;
        self.present.iter().map(move |byte| {
            let end = self.ends[byte as usize];
            let range = start..end;
            start = end;
            range
        })
    }
}

/// Partitions `items` by `byte`, choosing the strategy and counter width from `settings`.
pub(crate) fn partition_by_byte<T, F>(items: &mut [T], settings: &SortSettings, byte: &F) -> Buckets
where
    F: Fn(&T) -> u8,
{
    let len = items.len();
    let first = settings.first_loop_unroll();
    let width = settings.count_width().max(CountWidth::required_for(len));

    if len < settings.american_flag_sort_upper_limit() {
        let width = if len <= u8::MAX as usize {
            CountWidth::U8
        } else {
            width
        };
        match width {
            CountWidth::U8 => american_flag::<T, u8, F>(items, first, byte),
            CountWidth::U16 => american_flag::<T, u16, F>(items, first, byte),
            CountWidth::U32 => american_flag::<T, u32, F>(items, first, byte),
            CountWidth::U64 => american_flag::<T, u64, F>(items, first, byte),
        }
    } else {
        let second = settings.second_loop_unroll();
        match width {
            CountWidth::U8 => ska_byte::<T, u8, F>(items, first, second, byte),
            CountWidth::U16 => ska_byte::<T, u16, F>(items, first, second, byte),
            CountWidth::U32 => ska_byte::<T, u32, F>(items, first, second, byte),
            CountWidth::U64 => ska_byte::<T, u64, F>(items, first, second, byte),
        }
    }
}

/// Counts, starting offsets and end offsets of every populated bucket.
struct Layout<C> {
    offsets: [C; BUCKETS],
    ends: [usize; BUCKETS],
    order: [u8; BUCKETS],
    populated: usize,
    present: PresenceSet,
}

#[inline]
fn layout<T, C, F>(items: &[T], unroll: usize, byte: &F) -> Layout<C>
where
    C: Count,
    F: Fn(&T) -> u8,
{
    // 1. Histogram plus presence of every byte value.
    let mut offsets = [C::default(); BUCKETS];
    let mut present = PresenceSet::new();
    unroll_for_each(unroll, 0, items.len(), |i| {
        let b = byte(&items[i]);
        let count = &mut offsets[b as usize];
        *count = C::from_usize(count.to_usize() + 1);
        present.insert(b);
    });

    // 2. Counts become starting offsets, only populated buckets are touched.
    let mut ends = [0usize; BUCKETS];
    let mut order = [0u8; BUCKETS];
    let mut populated = 0;
    let mut total = 0;
    for b in present.iter() {
        let count = offsets[b as usize].to_usize();
        offsets[b as usize] = C::from_usize(total);
        total += count;
        ends[b as usize] = total;
        order[populated] = b;
        populated += 1;
    }

    Layout {
        offsets,
        ends,
        order,
        populated,
        present,
    }
}

fn american_flag<T, C, F>(items: &mut [T], unroll: usize, byte: &F) -> Buckets
where
    C: Count,
    F: Fn(&T) -> u8,
{
    let Layout {
        mut offsets,
        ends,
        order,
        populated,
        present,
    } = layout::<T, C, F>(items, unroll, byte);

    if populated > 1 {
        let mut block = 0;
        let mut current = order[0];
        let mut index = offsets[current as usize].to_usize();
        let mut block_end = ends[current as usize];

        'chase: loop {
            // Swap the occupant into its destination until one belongs here.
            loop {
                let target = byte(&items[index]);
                let slot = offsets[target as usize].to_usize();
                offsets[target as usize] = C::from_usize(slot + 1);
                if target == current {
                    break;
                }
                items.swap(index, slot);
            }
            index += 1;
            if index != block_end {
                continue;
            }

            // Next bucket with unsettled elements. The last one is settled by the others.
            loop {
                if block + 2 == populated {
                    break 'chase;
                }
                block += 1;
                current = order[block];
                index = offsets[current as usize].to_usize();
                block_end = ends[current as usize];
                if index != block_end {
                    break;
                }
            }
        }
    }

    Buckets { ends, present }
}

fn ska_byte<T, C, F>(items: &mut [T], first_unroll: usize, second_unroll: usize, byte: &F) -> Buckets
where
    C: Count,
    F: Fn(&T) -> u8,
{
    let Layout {
        mut offsets,
        ends,
        mut order,
        populated,
        present,
    } = layout::<T, C, F>(items, first_unroll, byte);

    let mut unsettled = populated;
    while unsettled > 1 {
        unsettled = partition_non_empty(&mut order[..unsettled], |&bucket| {
            let bucket = bucket as usize;
            let begin = offsets[bucket].to_usize();
            let end = ends[bucket];
            if begin == end {
                return false;
            }
            unroll_for_each(second_unroll, begin, end - begin, |i| {
                let target = byte(&items[i]) as usize;
                let slot = offsets[target].to_usize();
                offsets[target] = C::from_usize(slot + 1);
                items.swap(i, slot);
            });
            offsets[bucket].to_usize() != end
        });
    }

    Buckets { ends, present }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn check_buckets(items: &[u16], buckets: &Buckets, byte: fn(&u16) -> u8) {
        let mut covered = 0;
        let mut last = None;
        for range in buckets.ranges() {
            assert_eq!(range.start, covered);
            assert!(!range.is_empty());
            let b = byte(&items[range.start]);
            assert!(items[range.clone()].iter().all(|v| byte(v) == b));
            assert!(last < Some(b));
            last = Some(b);
            covered = range.end;
        }
        assert_eq!(covered, items.len());
    }

    fn run_all_strategies(input: &[u16], byte: fn(&u16) -> u8) {
        let mut expected = input.to_vec();
        expected.sort_unstable();

        for width in [CountWidth::U8, CountWidth::U16, CountWidth::U32, CountWidth::U64] {
            for limit in [1, usize::MAX] {
                for unroll in [1, 3, 4, 8] {
                    let settings = SortSettings::builder()
                        .with_american_flag_sort_upper_limit(limit)
                        .with_count_width(width)
                        .with_first_loop_unroll(unroll)
                        .with_second_loop_unroll(unroll)
                        .build()
                        .unwrap();
                    let mut data = input.to_vec();
                    let buckets = partition_by_byte(&mut data, &settings, &byte);
                    check_buckets(&data, &buckets, byte);

                    data.sort_unstable();
                    assert_eq!(data, expected, "items lost or duplicated");
                }
            }
        }
    }

    #[test]
    fn test_random_low_byte() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in [2, 7, 255, 256, 1000, 5000] {
            let input: Vec<u16> = (0..len).map(|_| rng.random()).collect();
            run_all_strategies(&input, |v| *v as u8);
        }
    }

    #[test]
    fn test_few_distinct_bytes() {
        let mut rng = StdRng::seed_from_u64(7);
        let input: Vec<u16> = (0..3000).map(|_| rng.random_range(0..3) << 8).collect();
        run_all_strategies(&input, |v| (*v >> 8) as u8);
    }

    #[test]
    fn test_single_bucket_is_untouched() {
        let input: Vec<u16> = (0..600u32).map(|i| ((i % 256) * 256 + 9) as u16).collect();
        for limit in [1, usize::MAX] {
            let settings = SortSettings::builder()
                .with_american_flag_sort_upper_limit(limit)
                .build()
                .unwrap();
            let mut data = input.clone();
            let buckets = partition_by_byte(&mut data, &settings, &|v: &u16| *v as u8);
            assert_eq!(buckets.len(), 1);
            assert_eq!(data, input);
        }
    }
}
