use std::cmp::Reverse;

pub trait HasAddIdent {
    const IDENT: Self;
}

pub trait HasMulIdent {
    const IDENT: Self;
}

macro_rules! has_add_ident_num_impl {
    ($($t:ty),* $(,)?) => {
        $(impl HasAddIdent for $t {
            const IDENT: Self = 0;
        })*
    };
}

macro_rules! has_mul_ident_num_impl {
    ($($t:ty),* $(,)?) => {
        $(impl HasMulIdent for $t {
            const IDENT: Self = 1;
        })*
    };
}

has_add_ident_num_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
has_mul_ident_num_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

pub trait HasMin {
    const MIN: Self;
}

pub trait HasMax {
    const MAX: Self;
}

macro_rules! has_min_max_num_impl {
    ($($t:ty),* $(,)?) => {
        $(impl HasMin for $t {
            const MIN: Self = <$t>::MIN;
        }
        impl HasMax for $t {
            const MAX: Self = <$t>::MAX;
        })*
    };
}

has_min_max_num_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<T: HasMax> HasMin for Reverse<T> {
    const MIN: Self = Self(<T as HasMax>::MAX);
}

impl<T: HasMin> HasMax for Reverse<T> {
    const MAX: Self = Self(<T as HasMin>::MIN);
}

/// `n`個分の和。区間加算で長さ`n`の区間の和に加える量を求めるのに使う。
pub trait Times {
    type Output;

    fn times(&self, n: usize) -> Self::Output;
}

macro_rules! times_num_impl {
    ($($t:ty),* $(,)?) => {
        $(impl Times for $t {
            type Output = $t;
            fn times(&self, n: usize) -> Self::Output {
                self * n as $t
            }
        })*
    };
}

times_num_impl!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
