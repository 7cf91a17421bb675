use crate::num::{Float, Number};
use std::fmt::{Display, Formatter};

/// 数值汇总统计：数量、总和、最小值、最大值，平均值由数量和浮点数累加值计算得到。
///
/// 最小值和最大值在出现相同极值时保留最先出现的元素。
/// 总和超出元素类型范围后不再可用，平均值仍然正确。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics<T> {
    count: usize,
    sum: Option<T>,
    total: Float,
    min: Option<T>,
    max: Option<T>,
}

impl<T: Number> Default for SummaryStatistics<T> {
    fn default() -> Self {
        SummaryStatistics { count: 0, sum: Some(T::zero()), total: 0.0, min: None, max: None }
    }
}

impl<T: Number> SummaryStatistics<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个值。
    pub fn accept(&mut self, value: T) {
        self.count += 1;
        self.sum = self.sum.and_then(|sum| sum.try_add(value));
        self.total += value.as_float();
        if self.min.is_none_or(|min| value < min) {
            self.min = Some(value);
        }
        if self.max.is_none_or(|max| value > max) {
            self.max = Some(value);
        }
    }

    /// 合并另一份统计，`other`视为在当前统计之后出现。
    pub fn combine(&mut self, other: &SummaryStatistics<T>) {
        self.count += other.count;
        self.sum = self.sum.zip(other.sum).and_then(|(l, r)| l.try_add(r));
        self.total += other.total;
        if let Some(value) = other.min
            && self.min.is_none_or(|min| value < min)
        {
            self.min = Some(value);
        }
        if let Some(value) = other.max
            && self.max.is_none_or(|max| value > max)
        {
            self.max = Some(value);
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// 总和，超出元素类型范围时返回`None`。
    pub fn sum(&self) -> Option<T> {
        self.sum
    }

    pub fn min(&self) -> Option<T> {
        self.min
    }

    pub fn max(&self) -> Option<T> {
        self.max
    }

    /// 平均值，没有任何值时返回`None`。
    pub fn average(&self) -> Option<Float> {
        if self.count == 0 { None } else { Some(self.total / self.count as Float) }
    }
}

impl<T: Number> FromIterator<T> for SummaryStatistics<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stats = SummaryStatistics::new();
        iter.into_iter().for_each(|value| stats.accept(value));
        stats
    }
}

impl<T: Number + Display> Display for SummaryStatistics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        fn or_dash<V: Display>(value: Option<V>) -> String {
            value.map_or_else(|| "-".to_owned(), |v| v.to_string())
        }
        write!(
            f,
            "{{count={}, sum={}, min={}, average={}, max={}}}",
            self.count,
            or_dash(self.sum),
            or_dash(self.min),
            or_dash(self.average()),
            or_dash(self.max)
        )
    }
}
