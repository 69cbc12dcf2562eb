mod iter;
mod node;
mod permutation;
mod runs;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::error::{Error, Result};
use crate::util::Element;
pub use iter::Iter;
use node::{Link, Node, Tag};
use permutation::Direction;

/// 暗黙キーのTreap (Cartesian tree) で表された整数列
///
/// 区間和・区間加算・区間代入・区間反転・区間のnext/prev permutationができる.
/// 区間は`l..=r`のように`RangeBounds<usize>`で指定し, 空の区間は受け付けない.
pub struct CartesianTree<T: Element = i64>(Link<T>, Xoshiro256StarStar);

impl<T: Element> CartesianTree<T> {
    /// 空の列を作る
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// 優先度の乱数のシードを指定して空の列を作る
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(None, Xoshiro256StarStar::seed_from_u64(seed))
    }

    /// 配列から列を構築する
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn from_vec(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }

    /// 列の長さを返す
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn len(&self) -> usize {
        node::size(&self.0)
    }

    /// 列が空かどうか判定する
    ///
    /// # Time complexity
    ///
    /// - *O*(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// 指定した場所に値を挿入する
    ///
    /// # Errors
    ///
    /// - `index > self.len()`のとき`Error::IndexOutOfRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let item = Box::new(Node::new(value, self.1.next_u64()));
        let (left, right) = node::split(self.0.take(), index);
        self.0 = node::merge(node::merge(left, Some(item)), right);
        Ok(())
    }

    /// 指定した場所の値を削除し, その値を返す
    ///
    /// # Errors
    ///
    /// - `index >= self.len()`のとき`Error::IndexOutOfRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let (left, rest) = node::split(self.0.take(), index);
        let (item, right) = node::split(rest, 1);
        let Some(item) = item else {
            unreachable!();
        };
        self.0 = node::merge(left, right);
        Ok(item.value)
    }

    /// 指定した場所の値を返す. 範囲外なら`None`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        iter::get(&self.0, index)
    }

    /// 区間を半開区間`start..end`に直す. 空の区間はエラーにする
    fn bounds(&self, range: impl std::ops::RangeBounds<usize>) -> Result<(usize, usize)> {
        use std::ops::Bound::*;
        let len = self.len();
        let start = match range.start_bound() {
            Included(&start) => start,
            Excluded(&start) => start.saturating_add(1),
            Unbounded => 0,
        };
        let end = match range.end_bound() {
            Included(&end) => end.saturating_add(1),
            Excluded(&end) => end,
            Unbounded => len,
        };
        if end > len {
            return Err(Error::IndexOutOfRange {
                index: end - 1,
                len,
            });
        }
        if start >= len {
            return Err(Error::IndexOutOfRange { index: start, len });
        }
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok((start, end))
    }

    /// 区間を切り出して`f`を適用し, 元に戻す
    fn on_range<R>(
        &mut self,
        range: impl std::ops::RangeBounds<usize>,
        f: impl FnOnce(Box<Node<T>>) -> (Box<Node<T>>, R),
    ) -> Result<R> {
        let (start, end) = self.bounds(range)?;
        log::trace!("range operation on {start}..{end} of {}", self.len());
        let (left, rest) = node::split(self.0.take(), start);
        let (mid, right) = node::split(rest, end - start);
        let Some(mid) = mid else {
            unreachable!();
        };
        let (mid, ret) = f(mid);
        self.0 = node::merge(node::merge(left, Some(mid)), right);
        Ok(ret)
    }

    /// 区間の総和を求める
    ///
    /// # Errors
    ///
    /// - 区間が`0..self.len()`に含まれないとき`Error::IndexOutOfRange`
    /// - 区間が空のとき`Error::InvalidRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn sum(&mut self, range: impl std::ops::RangeBounds<usize>) -> Result<T> {
        self.on_range(range, |mid| {
            let sum = mid.sum;
            (mid, sum)
        })
    }

    /// 区間の全要素に`delta`を足す
    ///
    /// # Errors
    ///
    /// - 区間が`0..self.len()`に含まれないとき`Error::IndexOutOfRange`
    /// - 区間が空のとき`Error::InvalidRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn add(&mut self, range: impl std::ops::RangeBounds<usize>, delta: T) -> Result<()> {
        self.on_range(range, |mut mid| {
            mid.apply(Tag::Add(delta));
            (mid, ())
        })
    }

    /// 区間の全要素を`value`にする
    ///
    /// # Errors
    ///
    /// - 区間が`0..self.len()`に含まれないとき`Error::IndexOutOfRange`
    /// - 区間が空のとき`Error::InvalidRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn assign(&mut self, range: impl std::ops::RangeBounds<usize>, value: T) -> Result<()> {
        self.on_range(range, |mut mid| {
            mid.apply(Tag::Assign(value));
            (mid, ())
        })
    }

    /// 区間を前後反転する
    ///
    /// # Errors
    ///
    /// - 区間が`0..self.len()`に含まれないとき`Error::IndexOutOfRange`
    /// - 区間が空のとき`Error::InvalidRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn reverse(&mut self, range: impl std::ops::RangeBounds<usize>) -> Result<()> {
        self.on_range(range, |mut mid| {
            mid.apply_reverse();
            (mid, ())
        })
    }

    /// 区間を辞書順で次の順列にする
    ///
    /// 区間が広義単調減少であった場合は昇順に並べ替える.
    ///
    /// # Errors
    ///
    /// - 区間が`0..self.len()`に含まれないとき`Error::IndexOutOfRange`
    /// - 区間が空のとき`Error::InvalidRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn next_permutation(&mut self, range: impl std::ops::RangeBounds<usize>) -> Result<()> {
        self.on_range(range, |mid| (permutation::step(mid, Direction::Next), ()))
    }

    /// 区間を辞書順で前の順列にする
    ///
    /// 区間が広義単調増加であった場合は降順に並べ替える.
    ///
    /// # Errors
    ///
    /// - 区間が`0..self.len()`に含まれないとき`Error::IndexOutOfRange`
    /// - 区間が空のとき`Error::InvalidRange`
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    pub fn prev_permutation(&mut self, range: impl std::ops::RangeBounds<usize>) -> Result<()> {
        self.on_range(range, |mid| (permutation::step(mid, Direction::Prev), ()))
    }

    /// 列を前から順に返すイテレータ
    ///
    /// 木は変更しないので何度でも作り直せる.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.0)
    }

    /// 1つの列を指定した場所で2つの列に分ける
    ///
    /// `index`が列の長さを超える場合は列の長さとみなす.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn split(self, index: usize) -> (Self, Self) {
        let Self(root, mut rng) = self;
        let (l, r) = node::split(root, index);
        let right_rng = Xoshiro256StarStar::seed_from_u64(rng.next_u64());
        (Self(l, rng), Self(r, right_rng))
    }

    /// 2つの列をこの順に繋げる
    ///
    /// # Time complexity
    ///
    /// - *O*(log *n*)
    #[must_use]
    pub fn merge(self, rhs: Self) -> Self {
        Self(node::merge(self.0, rhs.0), self.1)
    }
}

impl<T: Element> Default for CartesianTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Clone for CartesianTree<T> {
    fn clone(&self) -> Self {
        let mut rng = self.1.clone();
        rng.jump();
        Self(self.0.clone(), rng)
    }
}

impl<T: Element> FromIterator<T> for CartesianTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Element> Extend<T> for CartesianTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let tail = node::build(iter, &mut self.1);
        log::debug!("bulk-built {} elements", node::size(&tail));
        self.0 = node::merge(self.0.take(), tail);
    }
}

impl<'a, T: Element> IntoIterator for &'a CartesianTree<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Element> std::fmt::Debug for CartesianTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
impl CartesianTree<i64> {
    fn check(&self) -> Vec<i64> {
        let seq = node::check(&self.0);
        assert_eq!(self.iter().collect::<Vec<_>>(), seq);
        seq
    }
}
