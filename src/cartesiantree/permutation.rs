use super::node::{merge, partition_point, split, Node};
use super::runs::Order;
use crate::util::Element;

/// 順列を進める向き
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    /// 辞書順で次の順列
    Next,
    /// 辞書順で前の順列
    Prev,
}

impl Direction {
    /// これ以上進めない末尾の並び方
    fn tail_order(self) -> Order {
        match self {
            Direction::Next => Order::NonIncreasing,
            Direction::Prev => Order::NonDecreasing,
        }
    }
}

/// 列全体を辞書順で次 (または前) の順列にする
///
/// 既に最後 (最初) の順列であった場合は最初 (最後) の順列に戻る.
///
/// # Time complexity
///
/// - *O*(log *n*)
pub fn step<T: Element>(mut tree: Box<Node<T>>, direction: Direction) -> Box<Node<T>> {
    let order = direction.tail_order();
    let len = tree.size;
    let tail_len = tree.runs.suffix(order);
    if tail_len == len {
        log::trace!("{direction:?} permutation wraps around ({len} elements)");
        tree.apply_reverse();
        return tree;
    }

    // [prefix] [pivot] [tail] に分ける. tailは`order`の向きに並んでいる
    let (head, mut tail) = split(Some(tree), len - tail_len);
    let (prefix, pivot) = split(head, len - tail_len - 1);
    let Some(mut pivot) = pivot else {
        unreachable!();
    };

    // tailのうちpivotを越える要素は先頭に集まっているので, その最後の要素と交換する
    let count = partition_point(&mut tail, |v| !order.holds(pivot.value, v));
    log::trace!(
        "{direction:?} permutation: pivot at {}, swapped with tail position {}",
        len - tail_len - 1,
        count - 1
    );
    let (before, rest) = split(tail, count - 1);
    let (target, after) = split(rest, 1);
    let Some(mut target) = target else {
        unreachable!();
    };
    std::mem::swap(&mut pivot.value, &mut target.value);
    pivot.update();
    target.update();

    let mut tail = merge(merge(before, Some(target)), after);
    if let Some(tail) = tail.as_mut() {
        tail.apply_reverse();
    }
    let Some(tree) = merge(merge(prefix, Some(pivot)), tail) else {
        unreachable!();
    };
    tree
}
