use std::{
    cmp::Ordering,
    ops::{Add, Mul, Rem},
};

use self::ident::{HasAddIdent, HasMax, HasMin, HasMulIdent};

pub mod ident;

/// セグメント木に載せるモノイド。
///
/// `query`は結合的で、`ident()`はその単位元でなければならない。可換性は仮定しない。
/// これらが満たされない場合でもパニックはしないが、クエリの結果は意味のない値になる。
pub trait Query<T> {
    fn ident(&self) -> T;
    fn query(&self, x: &T, y: &T) -> T;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MinQuery;

impl<T: Ord + HasMax + Clone> Query<T> for MinQuery {
    fn ident(&self) -> T {
        T::MAX
    }
    fn query(&self, x: &T, y: &T) -> T {
        match x.cmp(y) {
            Ordering::Less => x.clone(),
            _ => y.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MaxQuery;

impl<T: Ord + HasMin + Clone> Query<T> for MaxQuery {
    fn ident(&self) -> T {
        T::MIN
    }
    fn query(&self, x: &T, y: &T) -> T {
        match x.cmp(y) {
            Ordering::Less => y.clone(),
            _ => x.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SumQuery;

impl<T: Add<Output = T> + HasAddIdent + Clone> Query<T> for SumQuery {
    fn ident(&self) -> T {
        T::IDENT
    }
    fn query(&self, x: &T, y: &T) -> T {
        x.clone() + y.clone()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProdQuery;

impl<T: Mul<Output = T> + HasMulIdent + Clone> Query<T> for ProdQuery {
    fn ident(&self) -> T {
        T::IDENT
    }
    fn query(&self, x: &T, y: &T) -> T {
        x.clone() * y.clone()
    }
}

/// 別のクエリの結果を`modulo`で割った余りを返すクエリ。
#[derive(Clone, Copy, Debug)]
pub struct Mod<Q, T> {
    base: Q,
    modulo: T,
}

impl<Q, T: Rem<Output = T>> Mod<Q, T> {
    pub fn new(query: Q, modulo: T) -> Self {
        Self {
            base: query,
            modulo,
        }
    }
}

impl<Q, T, U> Query<U> for Mod<Q, T>
where
    Q: Query<U>,
    T: Clone,
    U: Clone + Rem<T, Output = U>,
{
    fn ident(&self) -> U {
        self.base.ident()
    }
    fn query(&self, x: &U, y: &U) -> U {
        self.base.query(x, y) % self.modulo.clone()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GcdQuery;

impl<T: Rem<Output = T> + HasAddIdent + Eq + Clone> Query<T> for GcdQuery {
    fn ident(&self) -> T {
        T::IDENT
    }
    fn query(&self, x: &T, y: &T) -> T {
        if x == &T::IDENT {
            return y.clone();
        }
        let mut x = x.clone();
        let mut y = y.clone();
        while y != T::IDENT {
            let tmp = x.clone() % y.clone();
            x = std::mem::replace(&mut y, tmp);
        }
        x
    }
}

/// 単位元と二項演算を直接与えて作るクエリ。[`from_fn`]で作る。
#[derive(Clone, Copy, Debug)]
pub struct FnQuery<T, F> {
    ident: T,
    f: F,
}

/// `ident`を単位元、`f`を二項演算とするクエリを作る。
///
/// ```
/// use lazy_segtree::{query, SegTree};
///
/// let segtree = SegTree::new(query::from_fn((0, 1), |a: &(u64, u64), b: &(u64, u64)| {
///     (a.0 * b.1 + b.0, a.1 * b.1)
/// }), &[(1, 10), (2, 10), (3, 10)]);
/// assert_eq!(segtree.query(..), (123, 1000));
/// ```
pub fn from_fn<T, F>(ident: T, f: F) -> FnQuery<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    FnQuery { ident, f }
}

impl<T, F> Query<T> for FnQuery<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    fn ident(&self) -> T {
        self.ident.clone()
    }
    fn query(&self, x: &T, y: &T) -> T {
        (self.f)(x, y)
    }
}

/// `query`の単位元律と結合律を、与えられた値について検査する。
#[cfg(test)]
pub(crate) fn assert_monoid_laws<T, Q>(query: &Q, samples: &[T])
where
    T: PartialEq + std::fmt::Debug,
    Q: Query<T>,
{
    for x in samples {
        assert_eq!(&query.query(&query.ident(), x), x);
        assert_eq!(&query.query(x, &query.ident()), x);
        for y in samples {
            for z in samples {
                assert_eq!(
                    query.query(x, &query.query(y, z)),
                    query.query(&query.query(x, y), z)
                );
            }
        }
    }
}
