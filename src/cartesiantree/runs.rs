/// 単調列の向き
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Order {
    /// 広義単調増加
    NonDecreasing,
    /// 広義単調減少
    NonIncreasing,
}

impl Order {
    /// `a`, `b`の順に並べたときにこの向きの単調列になっているか判定する
    pub fn holds<T: Ord>(self, a: T, b: T) -> bool {
        match self {
            Order::NonDecreasing => a <= b,
            Order::NonIncreasing => a >= b,
        }
    }
}

/// 部分木の列の両端から伸びる最長の単調列の長さ
///
/// `prefix`は左端から右向きに, `suffix`は右端までの区間として数える.
/// どちらも`[広義単調増加, 広義単調減少]`の順に持つ.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Runs {
    prefix: [usize; 2],
    suffix: [usize; 2],
}

fn slot(order: Order) -> usize {
    match order {
        Order::NonDecreasing => 0,
        Order::NonIncreasing => 1,
    }
}

impl Runs {
    /// 全体が1つの単調列 (すべて同じ値) である長さ`len`の列
    pub fn uniform(len: usize) -> Self {
        Self {
            prefix: [len; 2],
            suffix: [len; 2],
        }
    }

    pub fn suffix(&self, order: Order) -> usize {
        self.suffix[slot(order)]
    }

    /// 列を前後反転したときの値にする
    ///
    /// 反転後の広義単調増加のprefixは反転前の広義単調減少のsuffixになる.
    pub fn reverse(&mut self) {
        let Self { prefix, suffix } = *self;
        self.prefix = [suffix[1], suffix[0]];
        self.suffix = [prefix[1], prefix[0]];
    }

    /// 列`left`, 値`mid`, 列`right`をこの順に繋げた列のRunsを求める
    ///
    /// `left`, `right`には(Runs, 長さ, 端の値)を与える. 空の場合は`None`.
    /// 端の値は`left`なら右端, `right`なら左端.
    pub fn concat<T: Ord + Copy>(
        left: Option<(&Runs, usize, T)>,
        mid: T,
        right: Option<(&Runs, usize, T)>,
    ) -> Self {
        let mut runs = Self::uniform(1);
        for order in [Order::NonDecreasing, Order::NonIncreasing] {
            let i = slot(order);
            runs.prefix[i] = match left {
                Some((l, len, last)) if l.prefix[i] < len || !order.holds(last, mid) => {
                    l.prefix[i]
                }
                _ => {
                    let mut run = left.map_or(0, |(_, len, _)| len) + 1;
                    if let Some((r, _, first)) = right {
                        if order.holds(mid, first) {
                            run += r.prefix[i];
                        }
                    }
                    run
                }
            };
            runs.suffix[i] = match right {
                Some((r, len, first)) if r.suffix[i] < len || !order.holds(mid, first) => {
                    r.suffix[i]
                }
                _ => {
                    let mut run = right.map_or(0, |(_, len, _)| len) + 1;
                    if let Some((l, _, last)) = left {
                        if order.holds(last, mid) {
                            run += l.suffix[i];
                        }
                    }
                    run
                }
            };
        }
        runs
    }
}

/// 愚直に計算したRuns
#[cfg(test)]
pub(crate) fn naive(seq: &[i64]) -> Runs {
    fn count<'a>(order: Order, pairs: impl Iterator<Item = (&'a i64, &'a i64)>) -> usize {
        1 + pairs.take_while(|&(&a, &b)| order.holds(a, b)).count()
    }
    let mut runs = Runs::uniform(0);
    if seq.is_empty() {
        return runs;
    }
    for order in [Order::NonDecreasing, Order::NonIncreasing] {
        runs.prefix[slot(order)] = count(order, seq.iter().zip(&seq[1..]));
        runs.suffix[slot(order)] = count(
            order,
            seq[..seq.len() - 1].iter().rev().zip(seq[1..].iter().rev()),
        );
    }
    runs
}
