use std::{fmt::Debug, iter, marker::PhantomData, ops::{Add, RangeBounds}};

use log::{debug, trace};

use crate::{
    check_bound, check_index, error, get_lr,
    query::{ident::Times, MaxQuery, MinQuery, Query, SumQuery},
    tree_levels, unwrap_range, SegTree,
};

/// ノードが受け持つ論理的な区間`left..left + len`。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    left: usize,
    len: usize,
}

fn node_spans(half_len: usize) -> Box<[Span]> {
    let mut spans = vec![Span { left: 0, len: 0 }; half_len * 2];
    for (j, span) in spans.iter_mut().skip(half_len).enumerate() {
        *span = Span { left: j, len: 1 };
    }
    for i in (1..half_len).rev() {
        spans[i] = Span {
            left: spans[i * 2].left,
            len: spans[i * 2].len * 2,
        };
    }
    spans.into_boxed_slice()
}

/// 区間作用・区間取得の遅延セグメント木。
///
/// `lazy[i]`が`Some(f)`のとき、`f`はノード`i`とその子孫全てにまだ作用していない。
/// ノードを読み書きする前には必ず根の側から`eval`を呼んで`f`を解消する。
#[derive(Clone, Debug)]
pub struct LazySegTree<Q, O, T, U> {
    operator: O,
    lazy: Box<[Option<U>]>,
    spans: Box<[Span]>,
    base: SegTree<Q, T>,
}

impl<T, U, Q, O> LazySegTree<Q, O, T, U>
where
    Q: Query<T>,
    O: LeftOperator<Q, T, U>,
    U: Clone,
{
    pub fn from_iter_query_operator<I>(query: Q, operator: O, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_base(SegTree::from_iter_query(query, iter), operator)
    }

    /// 全要素が単位元の、長さ`len`の遅延セグメント木を作る。
    pub fn with_len(query: Q, operator: O, len: usize) -> Self {
        Self::from_base(SegTree::with_len(query, len), operator)
    }

    fn from_base(base: SegTree<Q, T>, operator: O) -> Self {
        let n = base.len();
        let lazy = iter::repeat_with(|| None).take(2 * n).collect();
        debug!("lazy segment tree allocated with {n} leaves");
        Self {
            operator,
            lazy,
            spans: node_spans(n),
            base,
        }
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    fn log(&self) -> usize {
        self.len().trailing_zeros() as usize
    }

    /// ノード`i`に溜まった作用を`i`自身に適用し、子に遅延させる。
    ///
    /// `i`の祖先に未解消の作用が残っていてはならない。
    fn eval(&mut self, i: usize) {
        let Some(f) = self.lazy[i].take() else {
            return;
        };
        let Span { left, len } = self.spans[i];
        self.base.tree[i] = self.operator.apply(&self.base.tree[i], &f, len, left);
        if i < self.len() {
            for child in [i * 2, i * 2 + 1] {
                let composed = match self.lazy[child].take() {
                    Some(g) => self.operator.apply_to_operator(&g, &f),
                    None => f.clone(),
                };
                self.lazy[child] = Some(composed);
            }
        }
    }

    /// 子を解消してからノード`i`を組み立て直す。
    fn recombine(&mut self, i: usize) {
        self.eval(i * 2);
        self.eval(i * 2 + 1);
        self.base.tree[i] = self
            .base
            .query
            .query(&self.base.tree[i * 2], &self.base.tree[i * 2 + 1]);
    }

    /// 葉`l`, `r`(`l < r`)を境界とする区間の、完全には覆われない祖先を根の側から解消する。
    fn eval_boundary(&mut self, l: usize, r: usize) {
        for i in (1..=self.log()).rev() {
            if (l >> i) << i != l {
                self.eval(l >> i);
            }
            if (r >> i) << i != r {
                self.eval((r - 1) >> i);
            }
        }
    }

    fn recombine_boundary(&mut self, l: usize, r: usize) {
        for i in 1..=self.log() {
            if (l >> i) << i != l {
                self.recombine(l >> i);
            }
            if (r >> i) << i != r {
                self.recombine((r - 1) >> i);
            }
        }
    }

    /// 葉`leaf`の真の祖先を全て根の側から解消する。
    fn eval_path(&mut self, leaf: usize) {
        for i in (1..=self.log()).rev() {
            self.eval(leaf >> i);
        }
    }

    /// 全ての作用を葉まで押し込む。O(n)
    fn eval_all(&mut self) {
        for i in 1..self.lazy.len() {
            self.eval(i);
        }
    }

    fn push_operator(&mut self, i: usize, value: &U) {
        let composed = match self.lazy[i].take() {
            Some(g) => self.operator.apply_to_operator(&g, value),
            None => value.clone(),
        };
        self.lazy[i] = Some(composed);
        self.eval(i);
    }

    /// 指定区間の全要素に`value`をO(log(n))で作用させる。
    ///
    /// # Panics
    /// 区間が`0..self.len()`に収まらない場合。
    pub fn update(&mut self, range: impl RangeBounds<usize>, value: U) {
        unwrap_range(self.try_update(range, value))
    }

    pub fn try_update(&mut self, range: impl RangeBounds<usize>, value: U) -> error::Result<()> {
        let (l, r) = get_lr(self.len(), range)?;
        if l == r {
            return Ok(());
        }
        trace!("range update on {l}..{r}");
        let l = l + self.len();
        let r = r + self.len();
        self.eval_boundary(l, r);
        {
            let mut l = l;
            let mut r = r;
            while l < r {
                if l & 1 == 1 {
                    self.push_operator(l, &value);
                    l += 1;
                }
                if r & 1 == 1 {
                    r -= 1;
                    self.push_operator(r, &value);
                }
                l >>= 1;
                r >>= 1;
            }
        }
        self.recombine_boundary(l, r);
        Ok(())
    }

    /// 指定区間のクエリをO(log(n))で求める。
    ///
    /// 途中のノードの作用を解消するため`&mut self`を取る。
    pub fn query(&mut self, range: impl RangeBounds<usize>) -> T {
        unwrap_range(self.try_query(range))
    }

    pub fn try_query(&mut self, range: impl RangeBounds<usize>) -> error::Result<T> {
        let (l, r) = get_lr(self.len(), range)?;
        if l == r {
            return Ok(self.base.query.ident());
        }
        let mut l = l + self.len();
        let mut r = r + self.len();
        self.eval_boundary(l, r);
        let mut l_query = self.base.query.ident();
        let mut r_query = self.base.query.ident();
        while l < r {
            if l & 1 == 1 {
                self.eval(l);
                l_query = self.base.query.query(&l_query, &self.base.tree[l]);
                l += 1;
            }
            if r & 1 == 1 {
                r -= 1;
                self.eval(r);
                r_query = self.base.query.query(&self.base.tree[r], &r_query);
            }
            l >>= 1;
            r >>= 1;
        }
        Ok(self.base.query.query(&l_query, &r_query))
    }

    /// 全区間のクエリをO(1)で返す。
    pub fn query_all(&mut self) -> T
    where
        T: Clone,
    {
        if self.is_empty() {
            return self.base.query.ident();
        }
        self.eval(1);
        self.base.tree[1].clone()
    }

    /// `i`番目の要素をO(log(n))で返す。
    pub fn get(&mut self, i: usize) -> &T {
        let leaf = unwrap_range(check_index(self.len(), i)) + self.len();
        self.eval_path(leaf);
        self.eval(leaf);
        &self.base.tree[leaf]
    }

    /// `i`番目の要素をO(log(n))で`val`に置き換える。
    pub fn set(&mut self, i: usize, val: T) {
        let leaf = unwrap_range(check_index(self.len(), i)) + self.len();
        self.eval_path(leaf);
        self.lazy[leaf] = None;
        self.base.tree[leaf] = val;
        for i in 1..=self.log() {
            self.recombine(leaf >> i);
        }
    }

    /// 葉に直接値を書き込む。祖先は更新しないので、クエリの前に[`LazySegTree::build`]を呼ぶこと。
    pub fn set_leaf(&mut self, i: usize, val: T) {
        let leaf = unwrap_range(check_index(self.len(), i)) + self.len();
        self.eval_path(leaf);
        self.lazy[leaf] = None;
        self.base.tree[leaf] = val;
    }

    /// 未解消の作用を全て葉まで押し込んでから、内部ノードを組み立て直す。O(n)
    pub fn build(&mut self) {
        self.eval_all();
        self.base.build();
    }

    /// 全ての作用を適用した後の要素列を返す。余った葉も含む。
    pub fn into_vec(mut self) -> Vec<T> {
        self.eval_all();
        let half_len = self.len();
        let mut tree = self.base.tree.into_vec();
        tree.split_off(half_len)
    }

    /// `pred(self.query(l..j))`が`true`となる最大の`j`をO(log(n))で求める。
    ///
    /// `pred`は単位元に対して`true`を返し、`j`を大きくしていくとある所から`false`になり続けるものとする。
    pub fn partition_point<F>(&mut self, l: usize, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let l = unwrap_range(check_bound(self.len(), l));
        self.partition_point_unchecked(l, &mut pred)
    }

    fn partition_point_unchecked<F>(&mut self, l: usize, pred: &mut F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        if l == self.len() {
            return l;
        }
        let mut l = l + self.len();
        self.eval_path(l);
        let mut l_query = self.base.query.ident();
        loop {
            while l & 1 == 0 {
                l >>= 1;
            }
            self.eval(l);
            let next_query = self.base.query.query(&l_query, &self.base.tree[l]);
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
            self.eval(l);
            self.eval(l + 1);
            let next_query = self.base.query.query(&l_query, &self.base.tree[l]);
            if pred(&next_query) {
                l_query = next_query;
                l += 1;
            }
        }
        l - self.len()
    }

    /// `pred(self.query(j..r))`が`true`となる最小の`j`をO(log(n))で求める。
    pub fn rpartition_point<F>(&mut self, r: usize, mut pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let r = unwrap_range(check_bound(self.len(), r));
        self.rpartition_point_unchecked(r, &mut pred)
    }

    fn rpartition_point_unchecked<F>(&mut self, r: usize, pred: &mut F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        if r == 0 {
            return 0;
        }
        let mut r = r + self.len();
        self.eval_path(r - 1);
        let mut r_query = self.base.query.ident();
        loop {
            r -= 1;
            while r > 1 && r & 1 == 1 {
                r >>= 1;
            }
            self.eval(r);
            let next_query = self.base.query.query(&self.base.tree[r], &r_query);
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
            self.eval(r - 1);
            self.eval(r);
            let next_query = self.base.query.query(&self.base.tree[r], &r_query);
            if pred(&next_query) {
                r_query = next_query;
                r -= 1;
            }
        }
        r + 1 - self.len()
    }

    /// `pred(self.query(l..k))`が`true`となる`l..=r`の範囲で最小の`k`を返す。
    /// そのような`k`が無ければ`r`を返す。
    pub fn min_left<F>(&mut self, l: usize, r: usize, pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        unwrap_range(self.try_min_left(l, r, pred))
    }

    pub fn try_min_left<F>(&mut self, l: usize, r: usize, mut pred: F) -> error::Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let (l, r) = get_lr(self.len(), l..r)?;
        if pred(&self.base.query.ident()) {
            return Ok(l);
        }
        let j = self
            .partition_point_unchecked(l, &mut |x: &T| !pred(x))
            .min(r);
        Ok(if j == r { r } else { j + 1 })
    }

    /// `pred(self.query(k..r))`が`true`となる`l..=r`の範囲で最大の`k`を返す。
    /// そのような`k`が無ければ`l`を返す。
    pub fn max_right<F>(&mut self, l: usize, r: usize, pred: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        unwrap_range(self.try_max_right(l, r, pred))
    }

    pub fn try_max_right<F>(&mut self, l: usize, r: usize, mut pred: F) -> error::Result<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let (l, r) = get_lr(self.len(), l..r)?;
        if pred(&self.base.query.ident()) {
            return Ok(r);
        }
        let j = self
            .rpartition_point_unchecked(r, &mut |x: &T| !pred(x))
            .max(l);
        Ok(if j == l { l } else { j - 1 })
    }

    /// 木を根から順に段ごとのスライスとして返す。
    ///
    /// 各ノードの値は自身に溜まった作用を含まない。
    pub fn levels(&self) -> impl Iterator<Item = (&[T], &[Option<U>])> + '_ {
        tree_levels(&self.base.tree).zip(tree_levels(&self.lazy))
    }

    /// 木の中身と未解消の作用を段ごとに`debug`レベルでログに出す。
    pub fn log_levels(&self)
    where
        T: Debug,
        U: Debug,
    {
        for (depth, (values, lazy)) in self.levels().enumerate() {
            debug!("depth {depth}: {values:?} pending {lazy:?}");
        }
    }
}

impl<T, U, Q, O> FromIterator<T> for LazySegTree<Q, O, T, U>
where
    Q: Query<T> + Default,
    O: LeftOperator<Q, T, U> + Default,
    U: Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_query_operator(Q::default(), O::default(), iter)
    }
}

/// 区間の全要素に作用させる操作。
pub trait LeftOperator<Q, T, U>
where
    Q: Query<T>,
{
    /// `x`に`y`を作用させた結果を返す。`x`は区間`left..left + len`の要素をクエリでまとめた値である。
    ///
    /// # Note
    /// `x`はある`x_1, x_2, ..., x_n`について、`query(x_1, query(x_2, ..., query(x_{n-1}, x_n)))`の結果であり、
    /// この関数は`query(apply(x_1, y), query(apply(x_2, y), ..., query(apply(x_{n-1}, y), apply(x_n, y))))`を返すべきであることに注意する。
    fn apply(&self, x: &T, y: &U, len: usize, left: usize) -> T;

    /// `x`の後に`y`を作用させるのと同じ作用を返す。
    fn apply_to_operator(&self, x: &U, y: &U) -> U;
}

/// 区間の全要素を置き換える。
#[derive(Clone, Copy, Debug, Default)]
pub struct Update;

impl<T> LeftOperator<MinQuery, T, T> for Update
where
    MinQuery: Query<T>,
    T: Clone,
{
    fn apply(&self, _: &T, y: &T, _: usize, _: usize) -> T {
        y.clone()
    }

    fn apply_to_operator(&self, _: &T, y: &T) -> T {
        y.clone()
    }
}

impl<T> LeftOperator<MaxQuery, T, T> for Update
where
    MaxQuery: Query<T>,
    T: Clone,
{
    fn apply(&self, _: &T, y: &T, _: usize, _: usize) -> T {
        y.clone()
    }

    fn apply_to_operator(&self, _: &T, y: &T) -> T {
        y.clone()
    }
}

impl<T> LeftOperator<SumQuery, T, T> for Update
where
    SumQuery: Query<T>,
    T: Clone + Times<Output = T>,
{
    fn apply(&self, _: &T, y: &T, len: usize, _: usize) -> T {
        y.times(len)
    }

    fn apply_to_operator(&self, _: &T, y: &T) -> T {
        y.clone()
    }
}

/// 区間の全要素に加算する。
#[derive(Clone, Copy, Debug, Default)]
pub struct AddOperator;

impl<T, U> LeftOperator<SumQuery, T, U> for AddOperator
where
    SumQuery: Query<T>,
    T: Clone + Add<<U as Times>::Output, Output = T>,
    U: Clone + Times + Add<U, Output = U>,
{
    fn apply(&self, x: &T, y: &U, len: usize, _: usize) -> T {
        x.clone() + y.times(len)
    }

    fn apply_to_operator(&self, x: &U, y: &U) -> U {
        x.clone() + y.clone()
    }
}

/// クロージャによる区間作用。[`from_fn`]で作る。
pub struct FnOperator<A, C, U> {
    apply: A,
    composite: C,
    _marker: PhantomData<fn(U) -> U>,
}

impl<A: Clone, C: Clone, U> Clone for FnOperator<A, C, U> {
    fn clone(&self) -> Self {
        Self {
            apply: self.apply.clone(),
            composite: self.composite.clone(),
            _marker: PhantomData,
        }
    }
}

impl<A, C, U> Debug for FnOperator<A, C, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOperator").finish_non_exhaustive()
    }
}

/// `apply(x, y, len, left)`で区間への作用、`composite(x, y)`で作用の合成(`x`の後に`y`)を与える。
///
/// ```
/// use lazy_segtree::{lazy, query::SumQuery, LazySegTree};
///
/// // 区間`l..r`の各`i`に`y * i`を加える
/// let op = lazy::from_fn(
///     |x: &u64, y: &u64, len: usize, left: usize| {
///         let (len, left) = (len as u64, left as u64);
///         x + y * (left * len + len * (len - 1) / 2)
///     },
///     |x: &u64, y: &u64| x + y,
/// );
/// let mut segtree = LazySegTree::from_iter_query_operator(SumQuery, op, [0u64; 8]);
/// segtree.update(2..5, 1);
/// assert_eq!(segtree.query(..), 2 + 3 + 4);
/// assert_eq!(segtree.query(3..4), 3);
/// ```
pub fn from_fn<T, U, A, C>(apply: A, composite: C) -> FnOperator<A, C, U>
where
    A: Fn(&T, &U, usize, usize) -> T,
    C: Fn(&U, &U) -> U,
{
    FnOperator {
        apply,
        composite,
        _marker: PhantomData,
    }
}

impl<Q, T, U, A, C> LeftOperator<Q, T, U> for FnOperator<A, C, U>
where
    Q: Query<T>,
    A: Fn(&T, &U, usize, usize) -> T,
    C: Fn(&U, &U) -> U,
{
    fn apply(&self, x: &T, y: &U, len: usize, left: usize) -> T {
        (self.apply)(x, y, len, left)
    }

    fn apply_to_operator(&self, x: &U, y: &U) -> U {
        (self.composite)(x, y)
    }
}
