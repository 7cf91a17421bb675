use crate::num::Integer;

/// 整数区间迭代器，`inclusive`为真时包含`end`，步长为正时正序生成，为负时逆序生成，步长不能为0。
///
/// 溢出整数范围时结束，不会回绕。
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct RangeIter {
    next: Option<Integer>,
    end: Integer,
    step: Integer,
    inclusive: bool,
}

impl RangeIter {
    pub(crate) fn new(start: Integer, end: Integer, step: Integer, inclusive: bool) -> RangeIter {
        RangeIter { next: Some(start), end, step, inclusive }
    }
}

impl Iterator for RangeIter {
    type Item = Integer;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let passed = match (self.step > 0, self.inclusive) {
            (true, true) => current > self.end,
            (true, false) => current >= self.end,
            (false, true) => current < self.end,
            (false, false) => current <= self.end,
        };
        if passed {
            self.next = None;
            return None;
        }
        self.next = current.checked_add(self.step);
        Some(current)
    }
}
