//! IEEE 754 floats.
//!
//! The most significant byte is sorted first, transformed so that negative values come
//! before positive ones and both zeros land in the same bucket. Every bucket then holds
//! values of a single sign, so one element decides the direction for the rest of the
//! bytes: ascending for non-negative values, descending (inverted bytes) for negative ones.
//! The comparator installed for the remaining bytes only looks at the bits that have not
//! been partitioned yet.

use std::cmp::Ordering;

use crate::core::RadixKey;
use crate::sorter::Sorter;

trait IeeeFloat: Copy {
    const BYTES: usize;

    fn raw(self) -> u64;

    fn is_zero(self) -> bool;

    #[inline(always)]
    fn sign_bit() -> u64 {
        1 << (Self::BYTES * 8 - 1)
    }

    #[inline(always)]
    fn is_negative(self) -> bool {
        self.raw() & Self::sign_bit() != 0
    }

    #[inline(always)]
    fn byte(self, index: usize) -> u8 {
        (self.raw() >> (index * 8)) as u8
    }

    /// Sort byte for the sign and exponent.
    #[inline(always)]
    fn first_byte(self) -> u8 {
        if self.is_zero() {
            return 0x80;
        }
        let top = self.byte(Self::BYTES - 1);
        if top & 0x80 != 0 { !top } else { top | 0x80 }
    }

    /// Bits below the top two bytes.
    #[inline(always)]
    fn low_bits(self) -> u64 {
        self.raw() & ((1 << ((Self::BYTES - 2) * 8)) - 1)
    }

    /// Unsigned image with the same order as the float, both zeros mapped together.
    #[inline]
    fn ordered_bits(self) -> u64 {
        let all = u64::MAX >> (64 - Self::BYTES * 8);
        if self.is_zero() {
            Self::sign_bit()
        } else if self.is_negative() {
            !self.raw() & all
        } else {
            self.raw() | Self::sign_bit()
        }
    }
}

impl IeeeFloat for f32 {
    const BYTES: usize = 4;

    #[inline(always)]
    fn raw(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline(always)]
    fn is_zero(self) -> bool {
        self == 0.0
    }
}

impl IeeeFloat for f64 {
    const BYTES: usize = 8;

    #[inline(always)]
    fn raw(self) -> u64 {
        self.to_bits()
    }

    #[inline(always)]
    fn is_zero(self) -> bool {
        self == 0.0
    }
}

fn sort_after_sign<T, F: IeeeFloat>(sorter: &mut Sorter<'_, T, F>) {
    let first = *sorter.first_item();
    if first.is_zero() || !first.is_negative() {
        sorter.with_comparison(
            |a: &F, b: &F| a.low_bits().cmp(&b.low_bits()),
            |s: &mut Sorter<'_, T, F>| sort_low_bytes(s, F::BYTES - 2, false),
        );
    } else {
        sorter.with_comparison(
            |a: &F, b: &F| b.low_bits().cmp(&a.low_bits()),
            |s: &mut Sorter<'_, T, F>| sort_low_bytes(s, F::BYTES - 2, true),
        );
    }
}

fn sort_low_bytes<T, F: IeeeFloat>(sorter: &mut Sorter<'_, T, F>, index: usize, descending: bool) {
    let byte = move |value: &F| {
        let b = value.byte(index);
        if descending { !b } else { b }
    };
    if index == 0 {
        sorter.sort_bytes(byte);
    } else {
        sorter.sort_bytes_then(byte, &|s: &mut Sorter<'_, T, F>| {
            sort_low_bytes(s, index - 1, descending)
        });
    }
}

macro_rules! impl_float {
    ($($t:ty)*) => {
        $(
            impl RadixKey for $t {
                fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
                    sorter.sort_bytes_then(
                        |value: &$t| value.first_byte(),
                        &|s: &mut Sorter<'_, T, $t>| sort_after_sign(s),
                    );
                }

                #[inline]
                fn radix_cmp(&self, other: &Self) -> Ordering {
                    self.ordered_bits().cmp(&other.ordered_bits())
                }
            }
        )*
    };
}

impl_float!(f32 f64);
