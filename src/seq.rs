use crate::Result;
use crate::err::{BoxedErr, SeqErr};
use crate::num::{Float, Integer, Number};
use crate::range::RangeIter;
use crate::sink::SinkWriter;
use crate::sorted::{SortedIter, sort_partial};
use crate::stats::SummaryStatistics;
use itertools::{Either, Itertools, process_results};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use std::io::Write;
use std::iter;

type Stages<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// 惰性、一次性的序列流水线。
///
/// 中间操作消耗当前实例并返回追加了一个阶段的新实例，声明阶段本身不会拉取任何元素；
/// 终止操作驱动遍历并消耗流水线，对同一实例再次执行终止操作会返回[`SeqErr::AlreadyConsumed`]。
///
/// 遍历期间阶段函数返回的错误会立即中止遍历并从终止操作返回，不会产生部分结果。
pub struct LazySeq<'a, T> {
    iter: Option<Stages<'a, T>>,
}

impl<T> Debug for LazySeq<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazySeq").field("consumed", &self.is_consumed()).finish()
    }
}

impl<'a, T> LazySeq<'a, T> {
    pub fn is_consumed(&self) -> bool {
        self.iter.is_none()
    }

    fn stage<U>(self, wrap: impl FnOnce(Stages<'a, T>) -> Stages<'a, U>) -> LazySeq<'a, U> {
        LazySeq { iter: self.iter.map(wrap) }
    }

    fn consume(&mut self, op: &'static str) -> Result<Stages<'a, T>> {
        self.iter.take().ok_or(SeqErr::AlreadyConsumed { op })
    }
}

impl<'a, T> LazySeq<'a, &'a T> {
    /// 以切片为数据源构造序列，不复制元素。
    pub fn view(items: &'a [T]) -> Self {
        LazySeq::new(items)
    }
}

impl<'a> LazySeq<'a, Integer> {
    /// 生成`[start, end)`半开区间内的整数，步长为负时逆序生成。
    pub fn range(start: Integer, end: Integer, step: Integer) -> Result<Self> {
        if step == 0 {
            return Err(SeqErr::invalid("range", "step must not be zero"));
        }
        Ok(LazySeq::new(RangeIter::new(start, end, step, false)))
    }

    /// 生成`[start, end]`闭区间内的整数，步长为负时逆序生成。
    pub fn range_closed(start: Integer, end: Integer, step: Integer) -> Result<Self> {
        if step == 0 {
            return Err(SeqErr::invalid("range_closed", "step must not be zero"));
        }
        Ok(LazySeq::new(RangeIter::new(start, end, step, true)))
    }
}

/* **************************************** 构造 **************************************** */
impl<'a, T: 'a> LazySeq<'a, T> {
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        LazySeq { iter: Some(Box::new(source.into_iter().map(Ok))) }
    }

    /// 以可能失败的数据源构造序列，数据源产出的错误在遍历到时作为[`SeqErr::Source`]返回。
    pub fn try_new<I, E>(source: I) -> Self
    where
        I: IntoIterator<Item = std::result::Result<T, E>>,
        I::IntoIter: 'a,
        E: Into<BoxedErr>,
    {
        LazySeq { iter: Some(Box::new(source.into_iter().map(|res| res.map_err(|err| SeqErr::Source(err.into()))))) }
    }

    pub fn of(items: Vec<T>) -> Self {
        LazySeq::new(items)
    }

    pub fn empty() -> Self {
        LazySeq::new(iter::empty())
    }
}

/* **************************************** 中间操作 **************************************** */
impl<'a, T: 'a> LazySeq<'a, T> {
    /// 保留满足条件的元素。
    pub fn filter(self, mut predicate: impl FnMut(&T) -> bool + 'a) -> Self {
        self.stage(|iter| {
            Box::new(iter.filter(move |res| match res {
                Ok(item) => predicate(item),
                Err(_) => true,
            }))
        })
    }

    /// 保留满足条件的元素，条件本身可能失败。
    pub fn try_filter<E>(self, mut predicate: impl FnMut(&T) -> std::result::Result<bool, E> + 'a) -> Self
    where
        E: Into<BoxedErr>,
    {
        self.stage(|iter| {
            Box::new(iter.filter_map(move |res| match res {
                Ok(item) => match predicate(&item) {
                    Ok(true) => Some(Ok(item)),
                    Ok(false) => None,
                    Err(err) => Some(Err(SeqErr::user_fn("try_filter", err))),
                },
                Err(err) => Some(Err(err)),
            }))
        })
    }

    pub fn map<U: 'a>(self, mut f: impl FnMut(T) -> U + 'a) -> LazySeq<'a, U> {
        self.stage(|iter| Box::new(iter.map(move |res| res.map(&mut f))))
    }

    pub fn try_map<U: 'a, E>(self, mut f: impl FnMut(T) -> std::result::Result<U, E> + 'a) -> LazySeq<'a, U>
    where
        E: Into<BoxedErr>,
    {
        self.stage(|iter| {
            Box::new(iter.map(move |res| res.and_then(|item| f(item).map_err(|err| SeqErr::user_fn("try_map", err)))))
        })
    }

    /// 将每个元素展开为多个元素。
    pub fn flat_map<U: 'a, I>(self, mut f: impl FnMut(T) -> I + 'a) -> LazySeq<'a, U>
    where
        I: IntoIterator<Item = U>,
        I::IntoIter: 'a,
    {
        self.stage(|iter| {
            Box::new(iter.flat_map(move |res| match res {
                Ok(item) => Either::Left(f(item).into_iter().map(Ok)),
                Err(err) => Either::Right(iter::once(Err(err))),
            }))
        })
    }

    /// 按自然顺序稳定排序。
    pub fn sorted(self) -> Self
    where
        T: Ord,
    {
        self.stage(|iter| {
            Box::new(SortedIter::new(iter, |items: &mut Vec<T>| {
                items.sort();
                Ok(())
            }))
        })
    }

    pub fn sorted_by(self, cmp: impl FnMut(&T, &T) -> Ordering + 'a) -> Self {
        self.stage(|iter| {
            Box::new(SortedIter::new(iter, move |items: &mut Vec<T>| {
                items.sort_by(cmp);
                Ok(())
            }))
        })
    }

    pub fn sorted_by_key<K: Ord>(self, key: impl FnMut(&T) -> K + 'a) -> Self {
        self.stage(|iter| {
            Box::new(SortedIter::new(iter, move |items: &mut Vec<T>| {
                items.sort_by_key(key);
                Ok(())
            }))
        })
    }

    /// 按偏序排序，存在无法比较的元素（例如浮点数`NaN`）时遍历失败并返回[`SeqErr::InvalidArgument`]。
    pub fn sorted_partial(self) -> Self
    where
        T: PartialOrd,
    {
        self.stage(|iter| Box::new(SortedIter::new(iter, sort_partial)))
    }

    /// 去重，保留首次出现的元素。
    pub fn distinct(self) -> Self
    where
        T: Eq + Hash + Clone,
    {
        let mut seen = FxHashSet::default();
        self.filter(move |item| seen.insert(item.clone()))
    }

    pub fn distinct_by_key<K: Eq + Hash + 'a>(self, mut key: impl FnMut(&T) -> K + 'a) -> Self {
        let mut seen = FxHashSet::default();
        self.filter(move |item| seen.insert(key(item)))
    }

    /// 观察流经的元素，不修改元素。仅在终止操作遍历期间按阶段顺序对每个元素执行一次。
    pub fn peek(self, mut f: impl FnMut(&T) + 'a) -> Self {
        self.stage(|iter| {
            Box::new(iter.inspect(move |res| {
                if let Ok(item) = res {
                    f(item)
                }
            }))
        })
    }

    /// 将流经的元素逐行写入输出器，写入或刷新失败时中止遍历。
    ///
    /// 每个元素写入后立即刷新，下游提前结束遍历时也不会丢失已写入的内容或错误。
    pub fn peek_to<W: Write + 'a>(self, mut writer: SinkWriter<W>) -> Self
    where
        T: Display,
    {
        self.stage(|iter| {
            Box::new(iter.map(move |res: Result<T>| -> Result<T> {
                let item = res?;
                writer.write_item(&item)?;
                writer.flush()?;
                Ok(item)
            }))
        })
    }

    /// 保留前`n`个元素，之后不再拉取上游。
    pub fn limit(self, n: usize) -> Self {
        self.stage(|iter| Box::new(iter.take(n)))
    }

    /// 丢弃前`n`个元素。
    pub fn skip(self, n: usize) -> Self {
        self.stage(|iter| {
            let mut remaining = n;
            Box::new(iter.filter(move |res| {
                if res.is_ok() && remaining > 0 {
                    remaining -= 1;
                    false
                } else {
                    true
                }
            }))
        })
    }

    pub fn take_while(self, mut predicate: impl FnMut(&T) -> bool + 'a) -> Self {
        self.stage(|iter| {
            Box::new(iter.take_while(move |res| match res {
                Ok(item) => predicate(item),
                Err(_) => true,
            }))
        })
    }

    pub fn drop_while(self, mut predicate: impl FnMut(&T) -> bool + 'a) -> Self {
        self.stage(|iter| {
            Box::new(iter.skip_while(move |res| match res {
                Ok(item) => predicate(item),
                Err(_) => false,
            }))
        })
    }
}

/* **************************************** 终止操作 **************************************** */
impl<'a, T: 'a> LazySeq<'a, T> {
    pub fn for_each(&mut self, mut action: impl FnMut(T)) -> Result<()> {
        self.consume("for_each")?.try_for_each(|res| res.map(&mut action))
    }

    pub fn try_for_each<E>(&mut self, mut action: impl FnMut(T) -> std::result::Result<(), E>) -> Result<()>
    where
        E: Into<BoxedErr>,
    {
        self.consume("try_for_each")?
            .try_for_each(|res| res.and_then(|item| action(item).map_err(|err| SeqErr::user_fn("try_for_each", err))))
    }

    /// 将每个元素逐行写入输出器，返回写入的元素数量。
    pub fn write_to<W: Write>(&mut self, writer: &mut SinkWriter<W>) -> Result<usize>
    where
        T: Display,
    {
        let mut written = 0;
        for res in self.consume("write_to")? {
            writer.write_item(&res?)?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }

    pub fn to_list(&mut self) -> Result<Vec<T>> {
        self.consume("to_list")?.collect()
    }

    /// 收集为集合，重复元素保留哪一个不做保证。
    pub fn to_set(&mut self) -> Result<FxHashSet<T>>
    where
        T: Eq + Hash,
    {
        self.consume("to_set")?.collect()
    }

    pub fn collect<C: FromIterator<T>>(&mut self) -> Result<C> {
        self.consume("collect")?.collect()
    }

    /// 以`delimiter`连接各元素的字符串表示，并添加前缀和后缀。
    pub fn join_to_string(&mut self, delimiter: &str, prefix: &str, suffix: &str) -> Result<String>
    where
        T: Display,
    {
        let joined = process_results(self.consume("join_to_string")?, |mut items| items.join(delimiter))?;
        Ok(format!("{prefix}{joined}{suffix}"))
    }

    pub fn join(&mut self, delimiter: &str) -> Result<String>
    where
        T: Display,
    {
        self.join_to_string(delimiter, "", "")
    }

    pub fn count(&mut self) -> Result<usize> {
        process_results(self.consume("count")?, |items| items.count())
    }

    /// 求和，空序列返回加法单位元，超出元素类型范围时返回[`SeqErr::InvalidArgument`]。
    pub fn sum(&mut self) -> Result<T>
    where
        T: Number,
    {
        process_results(self.consume("sum")?, |mut items| items.try_fold(T::zero(), T::try_add))?
            .ok_or_else(|| SeqErr::invalid("sum", "sum overflows the element type"))
    }

    /// 求平均值，空序列返回`None`。
    pub fn average(&mut self) -> Result<Option<Float>>
    where
        T: Number,
    {
        // 以浮点数累加，整数元素不会溢出
        let (count, sum) = process_results(self.consume("average")?, |items| {
            items.fold((0usize, 0.0), |(count, sum), x| (count + 1, sum + x.as_float()))
        })?;
        Ok(if count == 0 { None } else { Some(sum / count as Float) })
    }

    /// 最小值，空序列返回`None`。存在多个最小值时返回遍历中最先出现的那个。
    pub fn min(&mut self) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.min_by(Ord::cmp)
    }

    /// 最大值，空序列返回`None`。存在多个最大值时返回遍历中最先出现的那个。
    pub fn max(&mut self) -> Result<Option<T>>
    where
        T: Ord,
    {
        self.max_by(Ord::cmp)
    }

    pub fn min_by(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) -> Result<Option<T>> {
        process_results(self.consume("min")?, |items| first_extremum(items, |item, best| cmp(item, best).is_lt()))
    }

    pub fn max_by(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) -> Result<Option<T>> {
        process_results(self.consume("max")?, |items| first_extremum(items, |item, best| cmp(item, best).is_gt()))
    }

    pub fn min_by_key<K: Ord>(&mut self, mut key: impl FnMut(&T) -> K) -> Result<Option<T>> {
        self.min_by(|l, r| key(l).cmp(&key(r)))
    }

    pub fn max_by_key<K: Ord>(&mut self, mut key: impl FnMut(&T) -> K) -> Result<Option<T>> {
        self.max_by(|l, r| key(l).cmp(&key(r)))
    }

    /// 按键分组，每组内保持遍历顺序。
    pub fn group_by<K: Eq + Hash>(&mut self, mut key: impl FnMut(&T) -> K) -> Result<FxHashMap<K, Vec<T>>> {
        let mut groups = FxHashMap::<K, Vec<T>>::default();
        for res in self.consume("group_by")? {
            let item = res?;
            groups.entry(key(&item)).or_default().push(item);
        }
        Ok(groups)
    }

    /// 按条件拆分为两组：`(满足条件的元素, 不满足条件的元素)`。
    pub fn partition_by(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<(Vec<T>, Vec<T>)> {
        process_results(self.consume("partition_by")?, |items| items.partition(|item| predicate(item)))
    }

    /// 任一元素满足条件即返回`true`，空序列返回`false`。
    pub fn any_match(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool> {
        process_results(self.consume("any_match")?, |mut items| items.any(|item| predicate(&item)))
    }

    /// 全部元素满足条件时返回`true`，空序列返回`true`。
    pub fn all_match(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool> {
        process_results(self.consume("all_match")?, |mut items| items.all(|item| predicate(&item)))
    }

    /// 没有元素满足条件时返回`true`，空序列返回`true`。
    pub fn none_match(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Result<bool> {
        process_results(self.consume("none_match")?, |mut items| !items.any(|item| predicate(&item)))
    }

    /// 一次遍历计算数量、总和、最小值、最大值和平均值。
    pub fn summary_statistics(&mut self) -> Result<SummaryStatistics<T>>
    where
        T: Number,
    {
        process_results(self.consume("summary_statistics")?, |items| items.collect())
    }

    pub fn reduce(&mut self, f: impl FnMut(T, T) -> T) -> Result<Option<T>> {
        process_results(self.consume("reduce")?, |items| items.reduce(f))
    }

    pub fn fold<A>(&mut self, init: A, f: impl FnMut(A, T) -> A) -> Result<A> {
        process_results(self.consume("fold")?, |items| items.fold(init, f))
    }

    pub fn find_first(&mut self) -> Result<Option<T>> {
        self.consume("find_first")?.next().transpose()
    }
}

/// 返回第一个不被后续元素取代的极值，`better(item, best)`为真时`item`取代当前极值。
fn first_extremum<T>(items: impl Iterator<Item = T>, mut better: impl FnMut(&T, &T) -> bool) -> Option<T> {
    items.fold(None, |best, item| match best {
        Some(best) if !better(&item, &best) => Some(best),
        _ => Some(item),
    })
}
