use crate::Result;
use crate::err::SeqErr;
use std::cmp::Ordering;
use std::mem;

/// 延迟排序迭代器。
///
/// 构造时不拉取上游数据，首次调用`next`时才耗尽上游并排序，之后按排序结果逐个产出。
/// 上游产出的首个错误会直接返回，排序不再进行。
pub(crate) struct SortedIter<I, T, S> {
    state: SortState<I, T, S>,
}

enum SortState<I, T, S> {
    Pending { source: I, sort: S },
    Sorted(std::vec::IntoIter<T>),
    Done,
}

impl<I, T, S> SortedIter<I, T, S>
where
    I: Iterator<Item = Result<T>>,
    S: FnOnce(&mut Vec<T>) -> Result<()>,
{
    pub(crate) fn new(source: I, sort: S) -> Self {
        SortedIter { state: SortState::Pending { source, sort } }
    }
}

impl<I, T, S> Iterator for SortedIter<I, T, S>
where
    I: Iterator<Item = Result<T>>,
    S: FnOnce(&mut Vec<T>) -> Result<()>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                SortState::Sorted(iter) => return iter.next().map(Ok),
                SortState::Done => return None,
                SortState::Pending { .. } => {
                    let SortState::Pending { source, sort } = mem::replace(&mut self.state, SortState::Done) else {
                        return None;
                    };
                    let mut items = match source.collect::<Result<Vec<_>>>() {
                        Ok(items) => items,
                        Err(err) => return Some(Err(err)),
                    };
                    if let Err(err) = sort(&mut items) {
                        return Some(Err(err));
                    }
                    self.state = SortState::Sorted(items.into_iter());
                }
            }
        }
    }
}

/// 按照偏序排序，遇到无法比较的两个元素（例如`NaN`）时返回错误。
pub(crate) fn sort_partial<T: PartialOrd>(items: &mut Vec<T>) -> Result<()> {
    let mut incomparable = false;
    items.sort_by(|l, r| {
        l.partial_cmp(r).unwrap_or_else(|| {
            incomparable = true;
            Ordering::Equal
        })
    });
    if incomparable {
        Err(SeqErr::invalid("sorted_partial", "elements have no natural total order, supply a comparator"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_sorted_is_deferred() {
        let pulled = Cell::new(0);
        let source = vec![3, 1, 2].into_iter().inspect(|_| pulled.set(pulled.get() + 1)).map(Ok);
        let mut iter = SortedIter::new(source, |items: &mut Vec<i32>| {
            items.sort();
            Ok(())
        });
        assert_eq!(pulled.get(), 0);
        assert_eq!(iter.next().unwrap().unwrap(), 1);
        assert_eq!(pulled.get(), 3);
        assert_eq!(iter.map(|r| r.unwrap()).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_sorted_stable() {
        let source = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')].into_iter().map(Ok);
        let iter = SortedIter::new(source, |items: &mut Vec<(i32, char)>| {
            items.sort_by_key(|(k, _)| *k);
            Ok(())
        });
        assert_eq!(iter.map(|r| r.unwrap()).collect::<Vec<_>>(), vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn test_sorted_upstream_err() {
        let source = vec![Ok(1), Err(SeqErr::user_fn("map", "boom")), Ok(0)].into_iter();
        let mut iter = SortedIter::new(source, |items: &mut Vec<i32>| {
            items.sort();
            Ok(())
        });
        assert!(iter.next().unwrap().unwrap_err().is_user_fn());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_sort_partial() {
        let mut floats = vec![2.5, -1.0, 0.0];
        assert!(sort_partial(&mut floats).is_ok());
        assert_eq!(floats, vec![-1.0, 0.0, 2.5]);

        let mut with_nan = vec![2.5, f64::NAN, 0.0];
        assert!(sort_partial(&mut with_nan).unwrap_err().is_invalid_argument());
    }
}
