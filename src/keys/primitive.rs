//! Integers, characters, booleans, pointers and the reference wrappers.

use std::cmp::Ordering;
use std::ptr::NonNull;
use std::rc::Rc;
use std::sync::Arc;

use crate::core::{ByteKey, RadixKey};
use crate::sorter::Sorter;

macro_rules! impl_unsigned {
    ($($t:ty)*) => {
        $(
            impl ByteKey for $t {
                const LEVELS: usize = size_of::<$t>();

                #[inline(always)]
                fn get_level(&self, level: usize) -> u8 {
                    (*self >> ((Self::LEVELS - 1 - level) * 8)) as u8
                }
            }

            impl RadixKey for $t {
                fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
                    sorter.sort_byte_levels();
                }

                #[inline]
                fn radix_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn slice_cmp(left: &[Self], right: &[Self]) -> Ordering {
                    left.cmp(right)
                }
            }
        )*
    };
}

// Flipping the sign bit maps two's complement onto unsigned order.
macro_rules! impl_signed {
    ($($t:ty)*) => {
        $(
            impl ByteKey for $t {
                const LEVELS: usize = size_of::<$t>();

                #[inline(always)]
                fn get_level(&self, level: usize) -> u8 {
                    ((*self ^ <$t>::MIN) >> ((Self::LEVELS - 1 - level) * 8)) as u8
                }
            }

            impl RadixKey for $t {
                fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
                    sorter.sort_byte_levels();
                }

                #[inline]
                fn radix_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn slice_cmp(left: &[Self], right: &[Self]) -> Ordering {
                    left.cmp(right)
                }
            }
        )*
    };
}

impl_unsigned!(u8 u16 u32 u64 u128 usize);
impl_signed!(i8 i16 i32 i64 i128 isize);

// Scalar values stop at 0x10FFFF, the top byte of the u32 is always zero.
impl ByteKey for char {
    const LEVELS: usize = 3;

    #[inline(always)]
    fn get_level(&self, level: usize) -> u8 {
        (*self as u32 >> ((Self::LEVELS - 1 - level) * 8)) as u8
    }
}

impl RadixKey for char {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_byte_levels();
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn slice_cmp(left: &[Self], right: &[Self]) -> Ordering {
        left.cmp(right)
    }
}

impl RadixKey for bool {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.sort_bools(|value: &bool| *value);
    }

    fn radix_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn slice_cmp(left: &[Self], right: &[Self]) -> Ordering {
        left.cmp(right)
    }
}

impl RadixKey for () {
    fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
        sorter.skip();
    }

    fn radix_cmp(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}

// Raw pointers sort by address only, ignoring any metadata.
macro_rules! impl_pointer {
    ($($ptr:ty => $as_ptr:expr;)*) => {
        $(
            impl<P: ?Sized> ByteKey for $ptr {
                const LEVELS: usize = size_of::<usize>();

                #[inline(always)]
                fn get_level(&self, level: usize) -> u8 {
                    $as_ptr(self).addr().get_level(level)
                }
            }

            impl<P: ?Sized> RadixKey for $ptr {
                fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
                    sorter.sort_byte_levels();
                }

                fn radix_cmp(&self, other: &Self) -> Ordering {
                    $as_ptr(self).addr().cmp(&$as_ptr(other).addr())
                }
            }
        )*
    };
}

impl_pointer! {
    *const P => |ptr: &*const P| ptr.cast::<()>();
    *mut P => |ptr: &*mut P| ptr.cast::<()>();
    NonNull<P> => |ptr: &NonNull<P>| ptr.as_ptr().cast::<()>();
}

// References and owning pointers order by their pointee, like `Ord` does.
macro_rules! impl_deref {
    ($($wrapper:ty),*) => {
        $(
            impl<K: RadixKey + ?Sized> RadixKey for $wrapper {
                fn decompose<T>(sorter: &mut Sorter<'_, T, Self>) {
                    sorter.sort_key(|wrapper: &$wrapper| &**wrapper);
                }

                fn radix_cmp(&self, other: &Self) -> Ordering {
                    (**self).radix_cmp(&**other)
                }
            }
        )*
    };
}

impl_deref!(&K, &mut K, Box<K>, Rc<K>, Arc<K>);
