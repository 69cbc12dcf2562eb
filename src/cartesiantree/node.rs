use rand::RngCore;

use super::runs::Runs;
use crate::util::Element;

/// 部分木全体に一様にかかる遅延作用
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tag<T> {
    /// 全要素に加算する
    Add(T),
    /// 全要素をこの値にする
    Assign(T),
}

impl<T: Element> Tag<T> {
    pub fn apply(self, value: T) -> T {
        match self {
            Tag::Add(delta) => value + delta,
            Tag::Assign(value) => value,
        }
    }

    /// `inner`を作用させた後に`self`を作用させるのと同じ作用を返す
    ///
    /// 代入の後の加算は代入する値に足し込む.
    pub fn after(self, inner: Option<Self>) -> Self {
        match (inner, self) {
            (_, Tag::Assign(value)) => Tag::Assign(value),
            (None, Tag::Add(delta)) => Tag::Add(delta),
            (Some(Tag::Add(d1)), Tag::Add(d2)) => Tag::Add(d1 + d2),
            (Some(Tag::Assign(value)), Tag::Add(delta)) => Tag::Assign(value + delta),
        }
    }
}

pub type Link<T> = Option<Box<Node<T>>>;

/// Treapの頂点
///
/// `value`から`runs`までは, この頂点自身にかかった作用をすべて反映した値を持つ.
/// `tag`と`rev`は子にまだ伝搬していない作用を表す.
/// `rev`が立っている間は`left`と`right`が入れ替わる前の状態である.
#[derive(Clone)]
pub struct Node<T> {
    pub priority: u64,
    pub value: T,
    pub size: usize,
    pub sum: T,
    /// 部分木の列の左端の値
    pub first: T,
    /// 部分木の列の右端の値
    pub last: T,
    pub runs: Runs,
    pub tag: Option<Tag<T>>,
    pub rev: bool,
    pub left: Link<T>,
    pub right: Link<T>,
}

pub fn size<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

impl<T: Element> Node<T> {
    pub fn new(value: T, priority: u64) -> Self {
        Self {
            priority,
            value,
            size: 1,
            sum: value,
            first: value,
            last: value,
            runs: Runs::uniform(1),
            tag: None,
            rev: false,
            left: None,
            right: None,
        }
    }

    /// 部分木全体に作用を適用する
    pub fn apply(&mut self, tag: Tag<T>) {
        match tag {
            Tag::Add(delta) => {
                self.value += delta;
                self.sum += delta.times(self.size);
                self.first += delta;
                self.last += delta;
            }
            Tag::Assign(value) => {
                self.value = value;
                self.sum = value.times(self.size);
                self.first = value;
                self.last = value;
                self.runs = Runs::uniform(self.size);
            }
        }
        self.tag = Some(tag.after(self.tag));
    }

    /// 部分木の列を前後反転する
    pub fn apply_reverse(&mut self) {
        self.rev ^= true;
        std::mem::swap(&mut self.first, &mut self.last);
        self.runs.reverse();
    }

    /// 遅延している作用を子に伝搬する
    ///
    /// 代入・加算を先に配ってから左右を入れ替える.
    pub fn push(&mut self) {
        if let Some(tag) = self.tag.take() {
            for child in [&mut self.left, &mut self.right].into_iter().flatten() {
                child.apply(tag);
            }
        }
        if std::mem::take(&mut self.rev) {
            std::mem::swap(&mut self.left, &mut self.right);
            for child in [&mut self.left, &mut self.right].into_iter().flatten() {
                child.apply_reverse();
            }
        }
    }

    /// 子の情報から部分木の情報を計算し直す
    ///
    /// 作用を伝搬し終えた頂点に対してのみ呼ぶ.
    pub fn update(&mut self) {
        let left = self.left.as_deref();
        let right = self.right.as_deref();
        self.size = 1 + left.map_or(0, |n| n.size) + right.map_or(0, |n| n.size);
        self.sum = left.map_or(T::zero(), |n| n.sum)
            + self.value
            + right.map_or(T::zero(), |n| n.sum);
        self.first = left.map_or(self.value, |n| n.first);
        self.last = right.map_or(self.value, |n| n.last);
        self.runs = Runs::concat(
            left.map(|n| (&n.runs, n.size, n.last)),
            self.value,
            right.map(|n| (&n.runs, n.size, n.first)),
        );
    }
}

/// 先頭`index`個とそれ以外に分ける
///
/// `index`が列の長さより大きい場合は列全体を左側とする.
pub fn split<T: Element>(link: Link<T>, index: usize) -> (Link<T>, Link<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    node.push();
    let left_size = size(&node.left);
    if index <= left_size {
        let (l, r) = split(node.left.take(), index);
        node.left = r;
        node.update();
        (l, Some(node))
    } else {
        let (l, r) = split(node.right.take(), index - left_size - 1);
        node.right = l;
        node.update();
        (Some(node), r)
    }
}

/// 2つの列をこの順に繋げる
pub fn merge<T: Element>(left: Link<T>, right: Link<T>) -> Link<T> {
    match (left, right) {
        (None, v) | (v, None) => v,
        (Some(mut l), Some(mut r)) => {
            if l.priority >= r.priority {
                l.push();
                l.right = merge(l.right.take(), Some(r));
                l.update();
                Some(l)
            } else {
                r.push();
                r.left = merge(Some(l), r.left.take());
                r.update();
                Some(r)
            }
        }
    }
}

/// 列の先頭から`pred`を満たす要素がいくつ続くか求める
///
/// `pred`を満たす要素が先頭にまとまっていることを仮定し, 木を1回だけ降りる.
pub fn partition_point<T: Element>(
    link: &mut Link<T>,
    mut pred: impl FnMut(T) -> bool,
) -> usize {
    let mut count = 0;
    let mut node = link.as_deref_mut();
    while let Some(n) = node {
        n.push();
        if pred(n.value) {
            count += size(&n.left) + 1;
            node = n.right.as_deref_mut();
        } else {
            node = n.left.as_deref_mut();
        }
    }
    count
}

/// 列からTreapを*O*(*n*)で構築する
///
/// 右端の頂点の列 (right spine) をスタックで持ち, 新しい頂点をそこに差し込んでいく.
pub fn build<T: Element>(
    values: impl IntoIterator<Item = T>,
    rng: &mut impl RngCore,
) -> Link<T> {
    let mut spine: Vec<Box<Node<T>>> = vec![];
    for value in values {
        let mut node = Box::new(Node::new(value, rng.next_u64()));
        let mut last = None;
        while spine.last().is_some_and(|top| top.priority < node.priority) {
            let Some(mut top) = spine.pop() else {
                unreachable!();
            };
            top.right = last;
            top.update();
            last = Some(top);
        }
        node.left = last;
        spine.push(node);
    }
    let mut root = None;
    while let Some(mut top) = spine.pop() {
        top.right = root;
        top.update();
        root = Some(top);
    }
    root
}

#[cfg(test)]
pub fn height<T>(link: &Link<T>) -> usize {
    link.as_ref()
        .map_or(0, |node| 1 + height(&node.left).max(height(&node.right)))
}

/// 全頂点の情報が正しいか確かめ, 部分木の列を返す
#[cfg(test)]
pub fn check(link: &Link<i64>) -> Vec<i64> {
    let Some(node) = link else {
        return vec![];
    };
    for child in [&node.left, &node.right].into_iter().flatten() {
        assert!(child.priority <= node.priority);
    }
    let mut left = check(&node.left);
    let mut right = check(&node.right);
    if let Some(tag) = node.tag {
        for v in left.iter_mut().chain(right.iter_mut()) {
            *v = tag.apply(*v);
        }
    }
    if node.rev {
        std::mem::swap(&mut left, &mut right);
        left.reverse();
        right.reverse();
    }
    let seq = [left, vec![node.value], right].concat();
    assert_eq!(node.size, seq.len());
    assert_eq!(node.sum, seq.iter().sum::<i64>());
    assert_eq!(node.first, seq[0]);
    assert_eq!(node.last, seq[seq.len() - 1]);
    assert_eq!(node.runs, super::runs::naive(&seq), "{seq:?}");
    seq
}
