//! 惰性、一次性的序列流水线。
//!
//! [`LazySeq`]包装一个数据源和按声明顺序组合的中间阶段（过滤、映射、排序、去重、观察等），
//! 只有终止操作才会驱动遍历，且每个序列实例只能执行一次终止操作。
//!
//! ```
//! use lseq::seq;
//!
//! let mut names = seq!["potatoes", "orange", "lemon"];
//! assert_eq!(names.join_to_string(", ", "<", ">").unwrap(), "<potatoes, orange, lemon>");
//! assert!(names.count().unwrap_err().is_already_consumed());
//! ```

pub mod err;
pub mod num;
mod range;
pub mod seq;
pub mod sink;
mod sorted;
pub mod stats;

pub use err::SeqErr;
pub use num::{Float, Integer, Num, Number};
pub use seq::LazySeq;
pub use sink::{Sink, SinkWriter};
pub use stats::SummaryStatistics;

pub type Result<T> = std::result::Result<T, SeqErr>;

/// 以字面值构造序列。
///
/// ```
/// let mut seq = lseq::seq![1, 3, 5, 7, 9];
/// assert_eq!(seq.sum().unwrap(), 25);
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::LazySeq::empty()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::LazySeq::of(vec![$($item),+])
    };
}
