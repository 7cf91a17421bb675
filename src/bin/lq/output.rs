use crate::Seq;
use crate::condition::Condition;
use crate::err::LqErr;
use cmd_help::CmdHelp;
use itertools::Itertools;
use lseq::{Num, Sink, SinkWriter};
use std::fmt::Display;
use std::hash::Hash;
use std::io::Write;

#[derive(Debug, PartialEq, CmdHelp)]
pub(crate) enum Output {
    /// to out      逐行输出到标准输出，未指定终止操作时的默认输出。
    /// to file     逐行输出到文件。
    ///             to file <file>[ append][ lf|crlf]
    ///                 <file>  文件路径，必选。
    ///                 append  追加输出而不是覆盖，可选。
    ///                 lf|crlf 指定换行符为'LF'或'CRLF'，可选，未指定时使用'LF'。
    To(Sink),
    /// count       输出数据数量。
    Count,
    /// sum         累加可以解析为数值的数据，无法解析的数据被忽略。
    Sum,
    /// avg         求可以解析为数值的数据的平均值，没有数值时不输出。
    Avg,
    /// min         输出最小值，存在多个最小值时输出最先出现的，没有数据时不输出。
    ///             min[ num]
    ///                 num     按照数值比较，忽略无法解析的数据，可选，未指定时按照字典序比较。
    /// max         输出最大值，存在多个最大值时输出最先出现的，没有数据时不输出。
    ///             max[ num]
    ///                 num     按照数值比较，忽略无法解析的数据，可选，未指定时按照字典序比较。
    Extremum { max: bool, num: bool },
    /// join        合并数据。
    ///             join[ <delimiter>[ <prefix>[ <suffix>]]]
    ///                 <delimiter> 分隔字符串，可选，未指定时直接拼接。
    ///                 <prefix>    前缀字符串，可选。
    ///                 <suffix>    后缀字符串，可选。
    ///             例如：
    ///                 join ,
    ///                 join ", " < >
    Join { delimiter: String, prefix: String, suffix: String },
    /// group       分组输出，每组一行：`<key>: <item>, <item>...`，按键排序。
    ///             group len|first
    ///                 len     按照字符数分组。
    ///                 first   按照首字符分组。
    Group(GroupBy),
    /// partition   按照条件拆分为两组，依次输出`true: ...`和`false: ...`。
    ///             partition <condition>
    Partition { cond: Condition },
    /// any         任一数据满足条件时输出true，否则输出false。
    ///             any <condition>
    /// all         全部数据满足条件时输出true，否则输出false，没有数据时输出true。
    ///             all <condition>
    /// none        没有数据满足条件时输出true，否则输出false，没有数据时输出true。
    ///             none <condition>
    Match { mode: MatchMode, cond: Condition },
    /// stats       输出可以解析为数值的数据的汇总统计：数量、总和、最小值、平均值、最大值。
    Stats,
}

#[derive(Debug, PartialEq)]
pub(crate) enum GroupBy {
    Len,
    First,
}

#[derive(Debug, PartialEq)]
pub(crate) enum MatchMode {
    Any,
    All,
    None,
}

impl Output {
    pub(crate) fn new_std_out() -> Output {
        Output::To(Sink::new_std_out())
    }
    pub(crate) fn new_file(file: String, append: bool, crlf: Option<bool>) -> Output {
        Output::To(Sink::new_file(file, append, crlf))
    }
    pub(crate) fn new_join(delimiter: String, prefix: String, suffix: String) -> Output {
        Output::Join { delimiter, prefix, suffix }
    }

    /// 执行终止操作，`To`以外的结果写入`out`。
    pub(crate) fn handle<W: Write>(self, mut seq: Seq, out: &mut SinkWriter<W>) -> Result<(), LqErr> {
        match self {
            Output::To(sink) => {
                seq.write_to(&mut sink.open()?)?;
            }
            Output::Count => out.write_item(&seq.count()?)?,
            Output::Sum => out.write_item(&numbers(seq).sum()?)?,
            Output::Avg => {
                if let Some(avg) = numbers(seq).average()? {
                    out.write_item(&Num::Float(avg))?
                }
            }
            Output::Extremum { max, num } => {
                let found = match (max, num) {
                    (false, false) => seq.min()?,
                    (true, false) => seq.max()?,
                    (false, true) => numbers(seq).min()?.map(|n| n.to_string()),
                    (true, true) => numbers(seq).max()?.map(|n| n.to_string()),
                };
                if let Some(found) = found {
                    out.write_item(&found)?
                }
            }
            Output::Join { delimiter, prefix, suffix } => {
                out.write_item(&seq.join_to_string(&delimiter, &prefix, &suffix)?)?
            }
            Output::Group(GroupBy::Len) => write_groups(seq.group_by(|item| item.chars().count())?, out)?,
            Output::Group(GroupBy::First) => {
                write_groups(seq.group_by(|item| item.chars().next().map(String::from).unwrap_or_default())?, out)?
            }
            Output::Partition { cond } => {
                let (yes, no) = seq.partition_by(|item| cond.test(item))?;
                out.write_item(&format!("true: {}", yes.join(", ")))?;
                out.write_item(&format!("false: {}", no.join(", ")))?;
            }
            Output::Match { mode, cond } => {
                let matched = match mode {
                    MatchMode::Any => seq.any_match(|item| cond.test(item))?,
                    MatchMode::All => seq.all_match(|item| cond.test(item))?,
                    MatchMode::None => seq.none_match(|item| cond.test(item))?,
                };
                out.write_item(&matched)?
            }
            Output::Stats => out.write_item(&numbers(seq).summary_statistics()?)?,
        }
        Ok(out.flush()?)
    }
}

/// 解析为数值，无法解析的数据被忽略。
fn numbers(seq: Seq) -> lseq::LazySeq<'static, Num> {
    seq.flat_map(|item| item.parse::<Num>().ok())
}

fn write_groups<K, W>(groups: rustc_hash::FxHashMap<K, Vec<String>>, out: &mut SinkWriter<W>) -> Result<(), LqErr>
where
    K: Ord + Hash + Display,
    W: Write,
{
    for (key, items) in groups.into_iter().sorted_by(|(l, _), (r, _)| l.cmp(r)) {
        out.write_item(&format!("{key}: {}", items.join(", ")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Select;
    use lseq::LazySeq;

    fn run(output: Output, items: &[&str]) -> String {
        let seq = LazySeq::of(items.iter().map(|s| s.to_string()).collect());
        let mut out = SinkWriter::new("test", Vec::new());
        output.handle(seq, &mut out).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_count_sum_avg() {
        assert_eq!(run(Output::Count, &["a", "b", "c"]), "3\n");
        assert_eq!(run(Output::Count, &[]), "0\n");
        assert_eq!(run(Output::Sum, &["1", "2.5", "abc", "3"]), "6.5\n");
        assert_eq!(run(Output::Sum, &[]), "0\n");
        assert_eq!(run(Output::Avg, &["1", "3", "5", "7", "9"]), "5\n");
        assert_eq!(run(Output::Avg, &["x"]), "");
    }

    #[test]
    fn test_extremum() {
        let items = ["10", "9", "abc", "10.0"];
        assert_eq!(run(Output::Extremum { max: false, num: false }, &items), "10\n");
        assert_eq!(run(Output::Extremum { max: true, num: false }, &items), "abc\n");
        assert_eq!(run(Output::Extremum { max: false, num: true }, &items), "9\n");
        assert_eq!(run(Output::Extremum { max: true, num: true }, &items), "10\n");
        assert_eq!(run(Output::Extremum { max: true, num: true }, &[]), "");
    }

    #[test]
    fn test_join() {
        let items = ["potatoes", "orange", "lemon"];
        assert_eq!(
            run(Output::new_join(", ".to_owned(), "<".to_owned(), ">".to_owned()), &items),
            "<potatoes, orange, lemon>\n"
        );
        assert_eq!(run(Output::new_join(String::new(), String::new(), String::new()), &items), "potatoesorangelemon\n");
    }

    #[test]
    fn test_group() {
        let items = ["23", "14", "13", "23", "13", "7"];
        assert_eq!(run(Output::Group(GroupBy::Len), &items), "1: 7\n2: 23, 14, 13, 23, 13\n");
        assert_eq!(run(Output::Group(GroupBy::First), &items), "1: 14, 13, 13\n2: 23, 23\n7: 7\n");
    }

    #[test]
    fn test_partition() {
        let cond = Select::NumRange { min: Some(Num::from(16)), max: None }.yes();
        assert_eq!(
            run(Output::Partition { cond }, &["23", "14", "13", "23", "13"]),
            "true: 23, 23\nfalse: 14, 13, 13\n"
        );
    }

    #[test]
    fn test_match() {
        let names = ["Eric", "Elena", "Java"];
        let contains_a = Select::Contains { text: "a".to_owned() }.yes();
        assert_eq!(run(Output::Match { mode: MatchMode::Any, cond: contains_a }, &names), "true\n");
        let long = Select::TextLenRange { min: Some(4), max: None }.yes();
        assert_eq!(run(Output::Match { mode: MatchMode::All, cond: long }, &names), "true\n");
        let ends_s = Select::Suffix { text: "s".to_owned() }.yes();
        assert_eq!(run(Output::Match { mode: MatchMode::None, cond: ends_s.clone() }, &names), "true\n");
        assert_eq!(run(Output::Match { mode: MatchMode::Any, cond: ends_s }, &[]), "false\n");
    }

    #[test]
    fn test_stats() {
        assert_eq!(
            run(Output::Stats, &["23", "14", "13", "23", "13"]),
            "{count=5, sum=86, min=13, average=17.2, max=23}\n"
        );
    }
}
