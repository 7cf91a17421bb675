use crate::Seq;
use crate::condition::Condition;
use crate::config::{Config, is_nocase};
use crate::err::LqErr;
use cmd_help::CmdHelp;
use lseq::{Num, Sink};
use std::cmp::Ordering;
use unicase::UniCase;

#[derive(Debug, PartialEq, CmdHelp)]
pub(crate) enum Op {
    /* **************************************** 访问 **************************************** */
    /// peek        打印每个值到标准输出或文件。
    ///             peek[ file <file>[ append][ lf|crlf]]
    ///                 <file>  文件路径，可选，未指定时输出到标准输出。
    ///                 append  追加输出而不是覆盖，可选。
    ///                 lf|crlf 指定换行符为'LF'或'CRLF'，可选，未指定时使用'LF'。
    ///             例如：
    ///                 peek
    ///                 peek file out.txt append crlf
    Peek(Sink),
    /* **************************************** 转换 **************************************** */
    /// upper       转为ASCII大写。
    /// lower       转为ASCII小写。
    /// case        切换ASCII大小写。
    Case(CaseArg),
    /* **************************************** 减少 **************************************** */
    /// limit       保留前N个数据，丢弃后续的其他数据。
    ///             limit <count>
    ///                 <count> 需要保留的数量，必须为非负整数，必选。
    Limit { count: usize },
    /// skip        丢弃前N个数据，保留后续的其他数据。
    ///             skip <count>
    ///                 <count> 需要丢弃的数量，必须为非负整数，必选。
    Skip { count: usize },
    /// distinct    去重，保留首次出现的数据。
    ///             distinct[ nocase]
    ///                 nocase  去重时忽略大小写，可选。
    Distinct { nocase: bool },
    /// take        根据指定条件选择数据保留，其他数据丢弃。
    ///             take <condition>
    /// drop        根据指定条件选择数据丢弃，其他数据保留。
    ///             drop <condition>
    /// take while  根据指定条件选择数据持续保留，直到条件首次不满足。
    ///             take while <condition>
    /// drop while  根据指定条件选择数据持续丢弃，直到条件首次不满足。
    ///             drop while <condition>
    ///                 <condition> 条件表达式，参考`-h`中的条件部分。
    TakeDrop { mode: TakeDropMode, cond: Condition },
    /* **************************************** 调整位置 **************************************** */
    /// sort        稳定排序。
    ///             sort[ num][ nocase][ desc]
    ///                 num     按照数值排序，无法解析为数值的数据排在最后，可选，未指定时按照字典序排序。
    ///                 nocase  忽略大小写，仅按字典序排序时生效，可选。
    ///                 desc    逆序排序，可选。
    ///             例如：
    ///                 sort
    ///                 sort nocase desc
    ///                 sort num desc
    Sort { sort_by: SortBy, desc: bool },
}

#[derive(Debug, PartialEq)]
pub(crate) enum CaseArg {
    Upper,
    Lower,
    Switch,
}

#[derive(Debug, PartialEq)]
pub(crate) enum SortBy {
    Num,
    Text(bool /*nocase*/),
}

#[derive(Debug, PartialEq)]
pub(crate) enum TakeDropMode {
    Take,
    Drop,
    TakeWhile,
    DropWhile,
}

impl Op {
    pub(crate) fn new_take_drop(mode: TakeDropMode, cond: Condition) -> Op {
        Op::TakeDrop { mode, cond }
    }
    pub(crate) fn new_sort(sort_by: SortBy, desc: bool) -> Op {
        Op::Sort { sort_by, desc }
    }

    pub(crate) fn wrap(self, seq: Seq, configs: &'static [Config]) -> Result<Seq, LqErr> {
        match self {
            Op::Peek(sink) => Ok(seq.peek_to(sink.open()?)),
            Op::Case(case_arg) => match case_arg {
                CaseArg::Upper => Ok(seq.map(|mut item| {
                    item.make_ascii_uppercase();
                    item
                })),
                CaseArg::Lower => Ok(seq.map(|mut item| {
                    item.make_ascii_lowercase();
                    item
                })),
                CaseArg::Switch => Ok(seq.map(|item| {
                    item.chars()
                        .map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() })
                        .collect()
                })),
            },
            Op::Limit { count } => Ok(seq.limit(count)),
            Op::Skip { count } => Ok(seq.skip(count)),
            Op::Distinct { nocase } => {
                if is_nocase(nocase, configs) {
                    Ok(seq.distinct_by_key(|item| item.to_ascii_uppercase()))
                } else {
                    Ok(seq.distinct())
                }
            }
            Op::TakeDrop { mode, cond } => match mode {
                TakeDropMode::Take => Ok(seq.filter(move |s| cond.test(s))),
                TakeDropMode::Drop => Ok(seq.filter(move |s| !cond.test(s))),
                TakeDropMode::TakeWhile => Ok(seq.take_while(move |s| cond.test(s))),
                TakeDropMode::DropWhile => Ok(seq.drop_while(move |s| cond.test(s))),
            },
            Op::Sort { sort_by, desc } => match sort_by {
                SortBy::Num => Ok(seq.sorted_by(move |l, r| {
                    // 无法解析的始终排在最后
                    match (l.parse::<Num>(), r.parse::<Num>()) {
                        (Ok(l), Ok(r)) => {
                            if desc {
                                r.cmp(&l)
                            } else {
                                l.cmp(&r)
                            }
                        }
                        (Ok(_), Err(_)) => Ordering::Less,
                        (Err(_), Ok(_)) => Ordering::Greater,
                        (Err(_), Err(_)) => Ordering::Equal,
                    }
                })),
                SortBy::Text(nocase) => {
                    if is_nocase(nocase, configs) {
                        if desc {
                            Ok(seq.sorted_by(|l, r| UniCase::new(r).cmp(&UniCase::new(l))))
                        } else {
                            Ok(seq.sorted_by(|l, r| UniCase::new(l).cmp(&UniCase::new(r))))
                        }
                    } else if desc {
                        Ok(seq.sorted_by(|l, r| r.cmp(l)))
                    } else {
                        Ok(seq.sorted())
                    }
                }
            },
        }
    }
}
