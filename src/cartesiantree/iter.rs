use super::node::{size, Link, Node, Tag};
use crate::util::Element;

/// 木を変更せずに降りるときの状態
///
/// `outer`は祖先に溜まっている作用を合成したもの, `flip`はこの頂点の子が入れ替わって見えるか.
struct Frame<'a, T> {
    node: &'a Node<T>,
    outer: Option<Tag<T>>,
    flip: bool,
}

impl<'a, T: Element> Frame<'a, T> {
    fn new(node: &'a Node<T>, outer: Option<Tag<T>>, parity: bool) -> Self {
        Self {
            node,
            outer,
            flip: parity ^ node.rev,
        }
    }

    fn value(&self) -> T {
        self.outer
            .map_or(self.node.value, |tag| tag.apply(self.node.value))
    }

    /// 子に対する`outer`
    fn inherited(&self) -> Option<Tag<T>> {
        match self.outer {
            Some(tag) => Some(tag.after(self.node.tag)),
            None => self.node.tag,
        }
    }

    /// 列の順序で(前側の子, 後側の子)
    fn children(&self) -> (&'a Link<T>, &'a Link<T>) {
        if self.flip {
            (&self.node.right, &self.node.left)
        } else {
            (&self.node.left, &self.node.right)
        }
    }
}

/// `index`番目の要素の値を, 木を変更せずに求める
pub fn get<T: Element>(link: &Link<T>, mut index: usize) -> Option<T> {
    let mut frame = Frame::new(link.as_deref()?, None, false);
    loop {
        let (front, back) = frame.children();
        let front_size = size(front);
        let next = match index.cmp(&front_size) {
            std::cmp::Ordering::Less => front,
            std::cmp::Ordering::Equal => return Some(frame.value()),
            std::cmp::Ordering::Greater => {
                index -= front_size + 1;
                back
            }
        };
        frame = Frame::new(next.as_deref()?, frame.inherited(), frame.flip);
    }
}

/// CartesianTreeの要素を前から順に返すイテレータ
pub struct Iter<'a, T> {
    stack: Vec<Frame<'a, T>>,
    len: usize,
}

impl<'a, T: Element> Iter<'a, T> {
    pub(super) fn new(root: &'a Link<T>) -> Self {
        let mut iter = Self {
            stack: vec![],
            len: size(root),
        };
        iter.descend(root, None, false);
        iter
    }

    fn descend(&mut self, mut link: &'a Link<T>, mut outer: Option<Tag<T>>, mut parity: bool) {
        while let Some(node) = link.as_deref() {
            let frame = Frame::new(node, outer, parity);
            link = frame.children().0;
            outer = frame.inherited();
            parity = frame.flip;
            self.stack.push(frame);
        }
    }
}

impl<T: Element> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let frame = self.stack.pop()?;
        self.len -= 1;
        self.descend(frame.children().1, frame.inherited(), frame.flip);
        Some(frame.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T: Element> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T: Element> std::iter::FusedIterator for Iter<'_, T> {}
