pub mod error;
pub mod lazy;
pub mod point;
pub mod query;

use std::{
    fmt::Debug,
    iter,
    ops::{Bound, RangeBounds},
};

use log::debug;

pub use error::RangeError;
pub use lazy::LazySegTree;
use point::{Assign, PointOperator};
use query::Query;

/// 一点更新・区間取得のセグメント木。
///
/// 葉の数は要素数以上の最小の2冪に切り上げられ、余った葉は単位元で埋められる。
/// `tree[1]`が根で、`tree[i]`の子は`tree[2 * i]`と`tree[2 * i + 1]`、
/// 論理的な添字`j`の葉は`tree[len + j]`にある。
#[derive(Clone, Debug)]
pub struct SegTree<Q, T, P = Assign> {
    tree: Box<[T]>,
    query: Q,
    point: P,
}

/// 戻り値を`(l, r)`とすると以下が保証される。
///
/// * `l <= r <= len`
fn get_lr(len: usize, range: impl RangeBounds<usize>) -> error::Result<(usize, usize)> {
    let l = match range.start_bound() {
        Bound::Excluded(s) => s.checked_add(1).ok_or(RangeError::StartOverflow)?,
        Bound::Included(s) => *s,
        Bound::Unbounded => 0,
    };
    let r = match range.end_bound() {
        Bound::Excluded(e) => *e,
        Bound::Included(e) => e.checked_add(1).ok_or(RangeError::EndOverflow)?,
        Bound::Unbounded => len,
    };
    if l > r {
        Err(RangeError::StartAfterEnd { start: l, end: r })
    } else if r > len {
        Err(RangeError::EndOutOfRange { end: r, len })
    } else {
        Ok((l, r))
    }
}

fn check_index(len: usize, i: usize) -> error::Result<usize> {
    if i < len {
        Ok(i)
    } else {
        Err(RangeError::IndexOutOfRange { index: i, len })
    }
}

fn check_bound(len: usize, i: usize) -> error::Result<usize> {
    if i <= len {
        Ok(i)
    } else {
        Err(RangeError::EndOutOfRange { end: i, len })
    }
}

fn unwrap_range<T>(res: error::Result<T>) -> T {
    res.unwrap_or_else(|e| panic!("{e}"))
}

/// 木を根から順に段ごとのスライスに分ける。
fn tree_levels<T>(tree: &[T]) -> impl Iterator<Item = &[T]> + '_ {
    let mut width = 1;
    iter::from_fn(move || {
        let level = tree.get(width..width * 2)?;
        width <<= 1;
        Some(level)
    })
}

impl<Q: Query<T>, T> SegTree<Q, T> {
    /// データのスライスからセグメント木を構築する。
    pub fn new(query: Q, data: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_iter_operator(query, Assign, data.iter().cloned())
    }

    pub fn from_iter_query<I>(query: Q, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_iter_operator(query, Assign, iter)
    }

    /// 全要素が単位元の、長さ`len`のセグメント木を作る。
    pub fn with_len(query: Q, len: usize) -> Self {
        Self::with_len_operator(query, Assign, len)
    }
}

impl<Q: Query<T>, T, P> SegTree<Q, T, P> {
    pub fn from_iter_operator<I>(query: Q, point: P, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let data = iter.into_iter().collect::<Vec<_>>();
        let orig_len = data.len();
        if orig_len == 0 {
            return Self::new_empty(query, point);
        }
        let half_len = orig_len.next_power_of_two();
        let tree = iter::repeat_with(|| query.ident())
            .take(half_len)
            .chain(data)
            .chain(iter::repeat_with(|| query.ident()).take(half_len - orig_len))
            .collect();
        let mut segtree = Self { tree, query, point };
        segtree.build();
        segtree
    }

    pub fn with_len_operator(query: Q, point: P, len: usize) -> Self {
        if len == 0 {
            return Self::new_empty(query, point);
        }
        let tree = iter::repeat_with(|| query.ident())
            .take(len.next_power_of_two() * 2)
            .collect();
        debug!("segment tree allocated with {} leaves", len.next_power_of_two());
        Self { tree, query, point }
    }

    fn new_empty(query: Q, point: P) -> Self {
        Self {
            tree: Box::new([]),
            query,
            point,
        }
    }

    /// 葉の数(要素数以上の最小の2冪)を返す。
    pub fn len(&self) -> usize {
        self.tree.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn get(&self, i: usize) -> &T {
        let i = unwrap_range(check_index(self.len(), i));
        &self.tree[self.len() + i]
    }

    /// 葉に直接値を書き込む。親は更新しないので、クエリの前に[`SegTree::build`]を呼ぶこと。
    pub fn set_leaf(&mut self, i: usize, val: T) {
        let i = unwrap_range(check_index(self.len(), i));
        let half_len = self.len();
        self.tree[half_len + i] = val;
    }

    /// 全ての内部ノードを葉から組み立て直す。O(n)
    pub fn build(&mut self) {
        for i in (1..self.len()).rev() {
            self.tree[i] = self.query.query(&self.tree[i * 2], &self.tree[i * 2 + 1]);
        }
        debug!("segment tree built with {} leaves", self.len());
    }

    /// 指定区間のクエリをO(log(n))で求める。
    ///
    /// # Panics
    /// 区間が`0..self.len()`に収まらない場合。
    pub fn query(&self, range: impl RangeBounds<usize>) -> T {
        unwrap_range(self.try_query(range))
    }

    pub fn try_query(&self, range: impl RangeBounds<usize>) -> error::Result<T> {
        let (mut l, mut r) = get_lr(self.len(), range)?;
        if l == r {
            return Ok(self.query.ident());
        }
        l += self.len();
        r += self.len();
        let mut l_query = self.query.ident();
        let mut r_query = self.query.ident();
        while l < r {
            if l & 1 == 1 {
                l_query = self.query.query(&l_query, &self.tree[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                r_query = self.query.query(&self.tree[r], &r_query);
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(self.query.query(&l_query, &r_query))
    }

    /// 全区間のクエリをO(1)で返す。
    pub fn query_all(&self) -> T
    where
        T: Clone,
    {
        match self.tree.get(1) {
            Some(root) => root.clone(),
            None => self.query.ident(),
        }
    }

    /// `i`番目の要素に`payload`を作用させ、O(log(n))で祖先を更新する。
    pub fn update(&mut self, i: usize, payload: P::Payload)
    where
        P: PointOperator<T>,
    {
        unwrap_range(self.try_update(i, payload))
    }

    pub fn try_update(&mut self, i: usize, payload: P::Payload) -> error::Result<()>
    where
        P: PointOperator<T>,
    {
        let mut i = check_index(self.len(), i)? + self.len();
        self.tree[i] = self.point.apply(&self.tree[i], payload);
        while i > 1 {
            i >>= 1;
            self.tree[i] = self.query.query(&self.tree[i * 2], &self.tree[i * 2 + 1]);
        }
        Ok(())
    }

    /// `pred(self.query(l..j))`が`true`となる最大の`j`をO(log(n))で求める。
    ///
    /// `pred`は単位元に対して`true`を返し、`j`を大きくしていくとある所から`false`になり続けるものとする。
    pub fn partition_point<F>(&self, l: usize, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let l = unwrap_range(check_bound(self.len(), l));
        self.partition_point_unchecked(l, &mut pred)
    }

    fn partition_point_unchecked<F>(&self, l: usize, pred: &mut F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        if l == self.len() {
            return l;
        }
        let mut l = l + self.len();
        let mut l_query = self.query.ident();
        loop {
            while l & 1 == 0 {
                l >>= 1;
            }
            let next_query = self.query.query(&l_query, &self.tree[l]);
            if !pred(&next_query) {
                break;
            }
            l_query = next_query;
            l += 1;
            if l.is_power_of_two() {
                return self.len();
            }
        }
        while l < self.len() {
            l <<= 1;
            let next_query = self.query.query(&l_query, &self.tree[l]);
            if pred(&next_query) {
                l_query = next_query;
                l += 1;
            }
        }
        l - self.len()
    }

    /// `pred(self.query(j..r))`が`true`となる最小の`j`をO(log(n))で求める。
    ///
    /// `pred`は単位元に対して`true`を返し、`j`を小さくしていくとある所から`false`になり続けるものとする。
    pub fn rpartition_point<F>(&self, r: usize, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let r = unwrap_range(check_bound(self.len(), r));
        self.rpartition_point_unchecked(r, &mut pred)
    }

    fn rpartition_point_unchecked<F>(&self, r: usize, pred: &mut F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        if r == 0 {
            return 0;
        }
        let mut r = r + self.len();
        let mut r_query = self.query.ident();
        loop {
            r -= 1;
            while r > 1 && r & 1 == 1 {
                r >>= 1;
            }
            let next_query = self.query.query(&self.tree[r], &r_query);
            if !pred(&next_query) {
                break;
            }
            r_query = next_query;
            if r.is_power_of_two() {
                return 0;
            }
        }
        while r < self.len() {
            r = r * 2 + 1;
            let next_query = self.query.query(&self.tree[r], &r_query);
            if pred(&next_query) {
                r_query = next_query;
                r -= 1;
            }
        }
        r + 1 - self.len()
    }

    /// `pred(self.query(l..k))`が`true`となる`l..=r`の範囲で最小の`k`を返す。
    /// そのような`k`が無ければ`r`を返す。
    ///
    /// `pred`は`k`を大きくしていくとある所から`true`になり続けるものとする。
    /// そうでない場合、戻り値は決定的だが意味を持たない。
    pub fn min_left<F>(&self, l: usize, r: usize, pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        unwrap_range(self.try_min_left(l, r, pred))
    }

    pub fn try_min_left<F>(&self, l: usize, r: usize, mut pred: F) -> error::Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let (l, r) = get_lr(self.len(), l..r)?;
        if pred(&self.query.ident()) {
            return Ok(l);
        }
        let j = self
            .partition_point_unchecked(l, &mut |x: &T| !pred(x))
            .min(r);
        Ok(if j == r { r } else { j + 1 })
    }

    /// `pred(self.query(k..r))`が`true`となる`l..=r`の範囲で最大の`k`を返す。
    /// そのような`k`が無ければ`l`を返す。
    ///
    /// `pred`は`k`を小さくしていくとある所から`true`になり続けるものとする。
    pub fn max_right<F>(&self, l: usize, r: usize, pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        unwrap_range(self.try_max_right(l, r, pred))
    }

    pub fn try_max_right<F>(&self, l: usize, r: usize, mut pred: F) -> error::Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let (l, r) = get_lr(self.len(), l..r)?;
        if pred(&self.query.ident()) {
            return Ok(r);
        }
        let j = self
            .rpartition_point_unchecked(r, &mut |x: &T| !pred(x))
            .max(l);
        Ok(if j == l { l } else { j - 1 })
    }

    /// 木を根から順に段ごとのスライスとして返す。
    pub fn levels(&self) -> impl Iterator<Item = &[T]> + '_ {
        tree_levels(&self.tree)
    }

    /// 木の中身を段ごとに`debug`レベルでログに出す。
    pub fn log_levels(&self)
    where
        T: Debug,
    {
        for (depth, level) in self.levels().enumerate() {
            debug!("depth {depth}: {level:?}");
        }
    }
}

impl<I, Q: Query<I> + Default> FromIterator<I> for SegTree<Q, I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from_iter_query(Q::default(), iter)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::{
        point::{self, AddAssign},
        query::{self, MaxQuery, MinQuery, SumQuery},
    };

    use super::*;

    #[test]
    fn new_test() {
        let segtree = SegTree::new(MinQuery, &[1u32, 2, 3, 4, 5, 6]);
        assert_eq!(
            &segtree.tree[1..],
            &[
                1,
                1,
                5,
                1,
                3,
                5,
                u32::MAX,
                1,
                2,
                3,
                4,
                5,
                6,
                u32::MAX,
                u32::MAX
            ]
        );
    }

    #[test]
    fn from_iter_test() {
        let segtree = [100, 200, 15, 40]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();
        assert_eq!(&segtree.tree[1..], &[355, 300, 55, 100, 200, 15, 40]);
    }

    #[test]
    fn empty_test() {
        let segtree = SegTree::<SumQuery, i32>::with_len(SumQuery, 0);
        assert!(segtree.is_empty());
        assert_eq!(segtree.query(..), 0);
        assert_eq!(segtree.query_all(), 0);
        assert_eq!(segtree.try_query(0..1), Err(RangeError::EndOutOfRange { end: 1, len: 0 }));
    }

    #[test]
    fn sum_query_test() {
        let segtree = [-4, 6, -3, 2, 1, 1, 7]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();

        assert_eq!(segtree.query(..), 10);
        assert_eq!(segtree.query(3..), 11);
        assert_eq!(segtree.query(3..6), 4);
        assert_eq!(segtree.query(..3), -1);

        assert_eq!(segtree.query(0..1), -4);
        assert_eq!(segtree.query(0..=0), -4);
        assert_eq!(segtree.query(0..=1), 2);
        assert_eq!(segtree.query(0..0), 0);
        assert_eq!(segtree.query(1..1), 0);
        assert_eq!(segtree.query(7..7), 0);
        assert_eq!(segtree.query(6..8), 7);
        assert_eq!(segtree.query_all(), 10);
    }

    #[test]
    fn min_query_test() {
        let segtree = [23i32, 12, -3, 0, 3, -2, 7, 8]
            .into_iter()
            .collect::<SegTree<MinQuery, _>>();

        assert_eq!(segtree.query(..), -3);
        assert_eq!(segtree.query(3..), -2);
        assert_eq!(segtree.query(..2), 12);
        assert_eq!(segtree.query(3..5), 0);

        assert_eq!(segtree.query(0..1), 23);
        assert_eq!(segtree.query(0..=0), 23);
        assert_eq!(segtree.query(0..=1), 12);
        assert_eq!(segtree.query(0..0), i32::MAX);
        assert_eq!(segtree.query(1..1), i32::MAX);
        assert_eq!(segtree.query(7..7), i32::MAX);
        assert_eq!(segtree.query(7..8), 8);
    }

    #[test]
    fn non_commutative_query_test() {
        let concat = query::from_fn(String::new(), |a: &String, b: &String| format!("{a}{b}"));
        let segtree = SegTree::from_iter_query(concat, "abcdefg".chars().map(String::from));
        assert_eq!(segtree.query(..), "abcdefg");
        assert_eq!(segtree.query(1..6), "bcdef");
        assert_eq!(segtree.query(3..4), "d");
        assert_eq!(segtree.query(5..5), "");
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_test1() {
        let segtree = [1, 2, 3, 4, 5, 6, 7]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();
        segtree.query(0..9);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_test2() {
        let segtree = [1, 2, 3, 4, 5, 6, 7]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();
        segtree.query(9..);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_test3() {
        let segtree = [1, 2, 3, 4, 5, 6, 7]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();
        segtree.query(0..=8);
    }

    #[test]
    #[should_panic(expected = "slice index starts at 5 but ends at 4")]
    #[allow(clippy::reversed_empty_ranges)]
    fn out_of_bounds_test4() {
        let segtree = [1, 2, 3, 4, 5, 6, 7]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();
        segtree.query(5..4);
    }

    #[test]
    fn try_query_test() {
        let segtree = [1, 2, 3, 4, 5, 6, 7]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();
        assert_eq!(segtree.try_query(1..3), Ok(5));
        assert_eq!(
            segtree.try_query(0..9),
            Err(RangeError::EndOutOfRange { end: 9, len: 8 })
        );
        assert_eq!(
            segtree.try_query(..=usize::MAX),
            Err(RangeError::EndOverflow)
        );
        assert_eq!(
            segtree.try_min_left(3, 2, |_| true),
            Err(RangeError::StartAfterEnd { start: 3, end: 2 })
        );
    }

    #[test]
    fn update_test() {
        let mut segtree = [-4, 6, -3, 2, 1, 1, 7]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();

        assert_eq!(segtree.query(..), 10);
        assert_eq!(segtree.query(3..), 11);
        assert_eq!(segtree.query(3..6), 4);
        assert_eq!(segtree.query(..3), -1);

        segtree.update(2, 3);
        assert_eq!(segtree.query(..), 16);
        assert_eq!(segtree.query(3..), 11);
        assert_eq!(segtree.query(3..6), 4);
        assert_eq!(segtree.query(..3), 5);
        assert_eq!(*segtree.get(2), 3);
    }

    #[test]
    fn rejected_update_test() {
        let mut segtree = [1, 2, 3].into_iter().collect::<SegTree<SumQuery, _>>();
        assert_eq!(
            segtree.try_update(4, 100),
            Err(RangeError::IndexOutOfRange { index: 4, len: 4 })
        );
        assert_eq!(segtree.query(..), 6);
    }

    #[test]
    fn point_operator_test() {
        let mut segtree = SegTree::from_iter_operator(SumQuery, AddAssign, [1i64, 2, 3, 4]);
        segtree.update(1, 10);
        segtree.update(1, 10);
        assert_eq!(segtree.query(..), 30);
        assert_eq!(segtree.query(1..2), 22);

        let chmin = point::from_fn(|x: &i64, y: i64| *x.min(&y));
        let mut segtree = SegTree::from_iter_operator(MaxQuery, chmin, [5i64, 8, 3, 9]);
        segtree.update(3, 4);
        segtree.update(1, 10);
        assert_eq!(segtree.query(..), 8);
        assert_eq!(segtree.query(2..), 4);
    }

    #[test]
    fn set_leaf_build_test() {
        let mut segtree = SegTree::with_len(SumQuery, 5);
        assert_eq!(segtree.len(), 8);
        for (i, v) in [3u64, 1, 4, 1, 5].into_iter().enumerate() {
            segtree.set_leaf(i, v);
        }
        segtree.build();
        assert_eq!(segtree.query_all(), 14);
        assert_eq!(segtree.query(1..4), 6);
        assert_eq!(segtree.levels().map(<[_]>::len).collect::<Vec<_>>(), [1, 2, 4, 8]);
        assert_eq!(segtree.levels().next(), Some(&[14u64][..]));
    }

    #[test]
    fn max_query_test() {
        let mut segtree = [23i32, 12, -3, 0, 3, -2, 7, 8]
            .into_iter()
            .collect::<SegTree<MaxQuery, _>>();

        assert_eq!(segtree.query(..), 23);
        assert_eq!(segtree.query(1..), 12);
        assert_eq!(segtree.query(2..), 8);
        assert_eq!(segtree.query(1..6), 12);
        assert_eq!(segtree.query(2..6), 3);
        assert_eq!(segtree.query(2..=6), 7);

        segtree.update(2, 5);
        assert_eq!(segtree.query(..), 23);
        assert_eq!(segtree.query(2..), 8);
        assert_eq!(segtree.query(2..6), 5);
        assert_eq!(segtree.query(2..=6), 7);

        segtree.update(0, 10);
        assert_eq!(segtree.partition_point(0, |v| *v < 12), 1);
        assert_eq!(segtree.partition_point(0, |v| *v < 13), 8);
        assert_eq!(segtree.partition_point(1, |v| *v < 12), 1);
        assert_eq!(segtree.partition_point(2, |v| *v < 12), 8);
        assert_eq!(segtree.partition_point(2, |v| *v < 7), 6);
    }

    #[test]
    fn partition_point_test() {
        let segtree = [3u32, 5, 2, 1, 9, 11, 15, 3]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();

        assert_eq!(segtree.partition_point(0, |v| *v <= 20), 5);
        assert_eq!(segtree.partition_point(1, |v| *v <= 20), 5);
        assert_eq!(segtree.partition_point(4, |v| *v <= 25), 6);
        assert_eq!(segtree.partition_point(3, |v| *v <= 100), 8);
        assert_eq!(segtree.partition_point(8, |v| *v <= 20), 8);

        assert_eq!(segtree.rpartition_point(8, |v| *v <= 20), 6);
        assert_eq!(segtree.rpartition_point(5, |v| *v <= 20), 0);
        assert_eq!(segtree.rpartition_point(7, |v| *v <= 20), 6);
        assert_eq!(segtree.rpartition_point(0, |v| *v <= 20), 0);
    }

    #[test]
    #[should_panic]
    fn partition_point_panic() {
        let segtree = [3u32, 5, 2, 1, 9, 11, 15, 3]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();
        segtree.partition_point(9, |v| *v <= 20);
    }

    #[test]
    fn min_left_max_right_test() {
        let segtree = [3u32, 5, 2, 1, 9, 11, 15, 3]
            .into_iter()
            .collect::<SegTree<SumQuery, _>>();

        // 3 + 5 + 2 = 10
        assert_eq!(segtree.min_left(0, 8, |v| *v >= 10), 3);
        assert_eq!(segtree.min_left(0, 8, |v| *v >= 11), 4);
        assert_eq!(segtree.min_left(0, 8, |v| *v >= 0), 0);
        assert_eq!(segtree.min_left(0, 8, |v| *v >= 1000), 8);
        assert_eq!(segtree.min_left(0, 3, |v| *v >= 11), 3);
        assert_eq!(segtree.min_left(4, 6, |v| *v >= 9), 5);

        // 15 + 3 = 18
        assert_eq!(segtree.max_right(0, 8, |v| *v >= 18), 6);
        assert_eq!(segtree.max_right(0, 8, |v| *v >= 19), 5);
        assert_eq!(segtree.max_right(0, 8, |v| *v >= 0), 8);
        assert_eq!(segtree.max_right(0, 8, |v| *v >= 1000), 0);
        assert_eq!(segtree.max_right(6, 8, |v| *v >= 19), 6);
        assert_eq!(segtree.max_right(2, 5, |v| *v >= 10), 3);
        assert_eq!(segtree.max_right(3, 3, |v| *v >= 1), 3);
    }

    #[test]
    fn random_test() {
        let mut rng = StdRng::seed_from_u64(3940);
        for n in [1usize, 2, 5, 16, 100] {
            let mut data = (0..n)
                .map(|_| rng.gen_range(0..1000u64))
                .collect::<Vec<_>>();
            let mut segtree = SegTree::new(SumQuery, &data);
            assert_eq!(segtree.query_all(), data.iter().sum::<u64>());
            for _ in 0..300 {
                if rng.gen_bool(0.3) {
                    let i = rng.gen_range(0..n);
                    let v = rng.gen_range(0..1000u64);
                    data[i] = v;
                    segtree.update(i, v);
                }
                let l = rng.gen_range(0..=n);
                let r = rng.gen_range(l..=n);
                assert_eq!(segtree.query(l..r), data[l..r].iter().sum::<u64>());

                let k = rng.gen_range(0..3000u64);
                let expected = (l..=r)
                    .find(|&j| data[l..j].iter().sum::<u64>() >= k)
                    .unwrap_or(r);
                assert_eq!(segtree.min_left(l, r, |v| *v >= k), expected);
                let expected = (l..=r)
                    .rev()
                    .find(|&j| data[j..r].iter().sum::<u64>() >= k)
                    .unwrap_or(l);
                assert_eq!(segtree.max_right(l, r, |v| *v >= k), expected);
            }
        }
    }
}
