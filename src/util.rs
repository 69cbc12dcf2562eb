/// 「0」に相当する値が存在することを表すトレイト
pub trait HasZero {
    /// 0の値を返す
    fn zero() -> Self;
}

/// CartesianTreeに載せられる整数型を表すトレイト
pub trait Element:
    Copy + Ord + std::fmt::Debug + std::ops::Add<Output = Self> + std::ops::AddAssign + HasZero
{
    /// `self`を`len`個足し合わせた値を返す
    ///
    /// `len`を要素の型に変換せず, `len`の2進表記に沿って倍々に足し合わせる.
    /// 途中の値の絶対値は結果の絶対値を超えない.
    ///
    /// # Time complexity
    ///
    /// - *O*(log *len*)
    fn times(self, mut len: usize) -> Self {
        let mut acc = Self::zero();
        let mut base = self;
        while len > 0 {
            if len & 1 == 1 {
                acc += base;
            }
            len >>= 1;
            if len > 0 {
                base = base + base;
            }
        }
        acc
    }
}

/// 整数型にHasZero, Elementを実装するマクロ
macro_rules! impl_element {
    ($($t: ty),*) => {$(
        impl HasZero for $t {
            fn zero() -> $t { 0 }
        }
        impl Element for $t {}
    )*};
}

impl_element! { u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize }
