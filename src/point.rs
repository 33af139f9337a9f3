use std::{marker::PhantomData, ops::Add};

/// 一点更新で葉に作用させる操作。
pub trait PointOperator<T> {
    type Payload;
    /// 葉の値`x`に`payload`を作用させた値を返す。
    fn apply(&self, x: &T, payload: Self::Payload) -> T;
}

/// 葉の値を`payload`で置き換える。
#[derive(Clone, Copy, Debug, Default)]
pub struct Assign;

impl<T> PointOperator<T> for Assign {
    type Payload = T;
    fn apply(&self, _: &T, payload: T) -> T {
        payload
    }
}

/// 葉の値に`payload`を加える。
#[derive(Clone, Copy, Debug, Default)]
pub struct AddAssign;

impl<T: Add<Output = T> + Clone> PointOperator<T> for AddAssign {
    type Payload = T;
    fn apply(&self, x: &T, payload: T) -> T {
        x.clone() + payload
    }
}

/// クロージャによる一点更新。[`from_fn`]で作る。
pub struct FnPoint<F, U> {
    f: F,
    _marker: PhantomData<fn(U)>,
}

impl<F: Clone, U> Clone for FnPoint<F, U> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}

impl<F, U> std::fmt::Debug for FnPoint<F, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPoint").finish_non_exhaustive()
    }
}

pub fn from_fn<T, U, F>(f: F) -> FnPoint<F, U>
where
    F: Fn(&T, U) -> T,
{
    FnPoint {
        f,
        _marker: PhantomData,
    }
}

impl<T, U, F> PointOperator<T> for FnPoint<F, U>
where
    F: Fn(&T, U) -> T,
{
    type Payload = U;
    fn apply(&self, x: &T, payload: U) -> T {
        (self.f)(x, payload)
    }
}
