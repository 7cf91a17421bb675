use crate::err::SeqErr;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// 整数类型
pub type Integer = i64;

/// 浮点数类型
pub type Float = f64;

/// 可参与`sum`、`average`、`summary_statistics`等数值聚合的元素类型。
pub trait Number: Copy + PartialOrd + Add<Output = Self> + Sum<Self> {
    /// 加法单位元，空序列求和的结果。
    fn zero() -> Self {
        std::iter::empty::<Self>().sum()
    }

    /// 转为浮点数，用于求平均值。
    fn as_float(self) -> Float;

    /// 求和，超出类型范围时返回`None`。
    fn try_add(self, rhs: Self) -> Option<Self>;
}

macro_rules! impl_number {
    (int: $($ty:ty),*; float: $($float:ty),*) => {
        $(
            impl Number for $ty {
                #[inline]
                fn as_float(self) -> Float {
                    self as Float
                }

                #[inline]
                fn try_add(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_add(self, rhs)
                }
            }
        )*
        $(
            impl Number for $float {
                #[inline]
                fn as_float(self) -> Float {
                    self as Float
                }

                #[inline]
                fn try_add(self, rhs: Self) -> Option<Self> {
                    Some(self + rhs)
                }
            }
        )*
    };
}

impl_number!(int: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize; float: f32, f64);

/// 整数或浮点数。
///
/// 从文本解析时优先解析为整数，失败后再尝试浮点数，非有限浮点数（`NaN`、`inf`）视为无效。
/// 整数与浮点数之间按数值比较，浮点数借助[`OrderedFloat`]获得全序。
#[derive(Debug, Clone, Copy)]
pub enum Num {
    Integer(Integer),
    Float(Float),
}

impl Num {
    pub fn is_integer(&self) -> bool {
        matches!(self, Num::Integer(_))
    }
}

impl From<Integer> for Num {
    fn from(value: Integer) -> Self {
        Num::Integer(value)
    }
}

impl From<Float> for Num {
    fn from(value: Float) -> Self {
        Num::Float(value)
    }
}

impl FromStr for Num {
    type Err = SeqErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(integer) = s.parse::<Integer>() {
            return Ok(Num::Integer(integer));
        }
        match s.parse::<Float>() {
            Ok(float) if float.is_finite() => Ok(Num::Float(float)),
            _ => Err(SeqErr::invalid("parse", format!("`{s}` is not a finite number"))),
        }
    }
}

impl Display for Num {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Num::Integer(integer) => write!(f, "{integer}"),
            // 小数部分为0时按整数显示
            Num::Float(float) if float.fract() == 0.0 && float.abs() < 1e15 => write!(f, "{}", *float as Integer),
            Num::Float(float) => write!(f, "{float}"),
        }
    }
}

impl Ord for Num {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Num::Integer(l), Num::Integer(r)) => l.cmp(r),
            (Num::Float(l), Num::Float(r)) => OrderedFloat(*l).cmp(&OrderedFloat(*r)),
            (Num::Integer(l), Num::Float(r)) => cmp_integer_float(*l, *r),
            (Num::Float(l), Num::Integer(r)) => cmp_integer_float(*r, *l).reverse(),
        }
    }
}

/// 精确比较整数和浮点数，不经过浮点数转换，`NaN`与[`OrderedFloat`]一致视为最大。
fn cmp_integer_float(integer: Integer, float: Float) -> Ordering {
    // Integer::MIN 可以精确表示为浮点数，其相反数为 2^63
    let lower = Integer::MIN as Float;
    if float.is_nan() || float >= -lower {
        return Ordering::Less;
    }
    if float < lower {
        return Ordering::Greater;
    }
    let trunc = float.trunc();
    integer.cmp(&(trunc as Integer)).then_with(|| {
        if float > trunc {
            Ordering::Less
        } else if float < trunc {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Num {}

impl Add for Num {
    type Output = Num;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Num::Integer(l), Num::Integer(r)) => match l.checked_add(r) {
                Some(sum) => Num::Integer(sum),
                None => Num::Float(l as Float + r as Float), // 溢出后退化为浮点数
            },
            (l, r) => Num::Float(l.as_float() + r.as_float()),
        }
    }
}

impl Sum for Num {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Num::Integer(0), Add::add)
    }
}

impl Number for Num {
    fn as_float(self) -> Float {
        match self {
            Num::Integer(integer) => integer as Float,
            Num::Float(float) => float,
        }
    }

    /// 整数溢出时退化为浮点数，不会失败。
    fn try_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<Num>().unwrap(), Num::Integer(12));
        assert_eq!("-3".parse::<Num>().unwrap(), Num::Integer(-3));
        assert_eq!("2.5".parse::<Num>().unwrap(), Num::Float(2.5));
        assert!("abc".parse::<Num>().is_err());
        assert!("NaN".parse::<Num>().is_err());
        assert!("inf".parse::<Num>().is_err());
    }

    #[test]
    fn test_cmp_mixed() {
        assert!(Num::Integer(2) < Num::Float(2.5));
        assert!(Num::Float(-0.5) < Num::Integer(0));
        assert_eq!(Num::Integer(3), Num::Float(3.0));
    }

    #[test]
    fn test_cmp_mixed_exact() {
        let big = 1 << 53;
        assert_eq!(Num::Integer(big), Num::Float(big as Float));
        assert_ne!(Num::Integer(big + 1), Num::Float(big as Float));
        assert!(Num::Integer(big + 1) > Num::Float(big as Float));
        assert!(Num::Float(big as Float) < Num::Integer(big + 1));
        assert!(Num::Integer(Integer::MAX) < Num::Float(9.3e18));
        assert_eq!(Num::Integer(Integer::MIN), Num::Float(Integer::MIN as Float));
        assert!(Num::Integer(Integer::MIN) > Num::Float(-1e19));
        assert!(Num::Integer(3) > Num::Float(2.5));
        assert!(Num::Integer(-3) < Num::Float(-2.5));
        assert!(Num::Integer(-2) > Num::Float(-2.5));
        assert_eq!(Num::Integer(0), Num::Float(-0.0));
        assert!(Num::Integer(Integer::MAX) < Num::Float(Float::NAN));
    }

    #[test]
    fn test_try_add() {
        assert_eq!(i32::MAX.try_add(1), None);
        assert_eq!(1i32.try_add(2), Some(3));
        assert_eq!(u8::MAX.try_add(0), Some(u8::MAX));
        assert_eq!(1.5f64.try_add(1.0), Some(2.5));
        assert!(Num::Integer(Integer::MAX).try_add(Num::Integer(1)).is_some());
    }

    #[test]
    fn test_sum() {
        let nums = vec![Num::Integer(1), Num::Float(2.5), Num::Integer(3)];
        assert_eq!(nums.into_iter().sum::<Num>(), Num::Float(6.5));
        assert_eq!(std::iter::empty::<Num>().sum::<Num>(), Num::Integer(0));
        assert_eq!(Num::Integer(Integer::MAX) + Num::Integer(1), Num::Float(Integer::MAX as Float + 1.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Num::Integer(7).to_string(), "7");
        assert_eq!(Num::Float(7.0).to_string(), "7");
        assert_eq!(Num::Float(6.5).to_string(), "6.5");
    }

    #[test]
    fn test_number_zero() {
        assert_eq!(<i32 as Number>::zero(), 0);
        assert_eq!(<f64 as Number>::zero(), 0.0);
        assert_eq!(<Num as Number>::zero(), Num::Integer(0));
        assert_eq!(7u8.as_float(), 7.0);
    }
}
