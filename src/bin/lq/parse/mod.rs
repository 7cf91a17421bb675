use crate::err::LqErr;
use crate::input::Input;
use crate::op::Op;
use crate::output::Output;
use crate::parse::input::parse_input;
use crate::parse::op::parse_ops;
use crate::parse::output::parse_output;
use std::iter::Peekable;
use std::str::FromStr;

mod condition;
mod config;
mod input;
mod op;
mod output;

pub(crate) use config::parse_configs;

pub(crate) fn parse(mut args: Peekable<impl Iterator<Item = String>>) -> Result<(Input, Vec<Op>, Output), LqErr> {
    let input = parse_input(&mut args)?;
    let ops = parse_ops(&mut args)?;
    let output = parse_output(&mut args)?;
    let remaining = args.collect::<Vec<_>>();
    if !remaining.is_empty() { Err(LqErr::UnknownArgs { args: remaining }) } else { Ok((input, ops, output)) }
}

fn parse_arg_or_arg1(
    args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str, arg: &'static str,
) -> Result<Vec<String>, LqErr> {
    match args.next() {
        // 至少有一个值，直接消耗
        Some(value) => {
            if value == "[" {
                // 多值开始
                let mut values = Vec::new();
                for value in args.by_ref() {
                    if value == "]" {
                        // 多值结束
                        return if values.is_empty() { Err(LqErr::ArgNotEnough { cmd, arg }) } else { Ok(values) };
                    } else {
                        values.push(escaped(value))
                    }
                }
                Err(LqErr::UnclosingMultiArg { cmd, arg })
            } else if value == "]" {
                // 未开启的多值结束
                Err(LqErr::UnexpectedClosingBracket { cmd, arg })
            } else {
                Ok(vec![escaped(value)])
            }
        }
        None => Err(LqErr::MissingArg { cmd, arg }),
    }
}

fn escaped(arg: String) -> String {
    if arg == "\\[" || arg == "\\]" { arg[1..].to_string() } else { arg }
}

/// 消耗下一个必选参数。
fn next_arg(args: &mut impl Iterator<Item = String>, cmd: &'static str, arg: &'static str) -> Result<String, LqErr> {
    args.next().ok_or(LqErr::MissingArg { cmd, arg })
}

/// 消耗并解析下一个必选参数。
fn next_parsed<T>(args: &mut impl Iterator<Item = String>, cmd: &'static str, arg: &'static str) -> Result<T, LqErr>
where
    T: FromStr,
    T::Err: ToString,
{
    let value = next_arg(args, cmd, arg)?;
    value.parse().map_err(|err: T::Err| LqErr::ArgParseErr { cmd, arg, arg_value: value.clone(), error: err.to_string() })
}

fn consume_keyword(args: &mut Peekable<impl Iterator<Item = String>>, keyword: &str) -> bool {
    consume_if(args, |s| s.eq_ignore_ascii_case(keyword)).is_some()
}

fn consume_if<F>(args: &mut Peekable<impl Iterator<Item = String>>, f: F) -> Option<String>
where
    F: FnOnce(&String) -> bool,
{
    args.next_if(|value| f(value))
}

fn consume_if_some<M, U>(args: &mut Peekable<impl Iterator<Item = String>>, m: M) -> Option<U>
where
    M: FnOnce(&String) -> Option<U>,
{
    let option = args.peek().and_then(m);
    if option.is_some() {
        args.next();
    }
    option
}

/// 解析`<file>[ append][ lf|crlf]`。
fn parse_general_file_info(
    args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str,
) -> Result<(String, bool, Option<bool>), LqErr> {
    let file = next_arg(args, cmd, "file")?;
    let append = consume_keyword(args, "append");
    let crlf = if consume_keyword(args, "crlf") {
        Some(true)
    } else if consume_keyword(args, "lf") {
        Some(false)
    } else {
        None
    };
    Ok((file, append, crlf))
}

/// 解析`<min>,<max>`形式的范围，最小值和最大值至少指定其一。
fn parse_range<T: FromStr>(value: &str) -> Option<(Option<T>, Option<T>)> {
    let (min, max) = value.split_once(',')?;
    let min = if min.is_empty() { None } else { Some(min.parse().ok()?) };
    let max = if max.is_empty() { None } else { Some(max.parse().ok()?) };
    if min.is_none() && max.is_none() { None } else { Some((min, max)) }
}

#[cfg(test)]
fn build_args(args_line: &'static str) -> Peekable<impl Iterator<Item = String>> {
    args_line.split(' ').filter(|s| !s.is_empty()).map(String::from).peekable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Select;
    use crate::op::{CaseArg, TakeDropMode};
    use crate::output::MatchMode;

    #[test]
    fn test_parse_arg_or_arg1() {
        assert_eq!(parse_arg_or_arg1(&mut build_args("a b"), "of", "text").unwrap(), vec!["a"]);
        assert_eq!(parse_arg_or_arg1(&mut build_args("[ a \\] b ]"), "of", "text").unwrap(), vec!["a", "]", "b"]);
        assert!(matches!(parse_arg_or_arg1(&mut build_args("[ ]"), "of", "text"), Err(LqErr::ArgNotEnough { .. })));
        assert!(matches!(parse_arg_or_arg1(&mut build_args("[ a"), "of", "text"), Err(LqErr::UnclosingMultiArg { .. })));
        assert!(matches!(
            parse_arg_or_arg1(&mut build_args("] a"), "of", "text"),
            Err(LqErr::UnexpectedClosingBracket { .. })
        ));
        assert!(matches!(parse_arg_or_arg1(&mut build_args(""), "of", "text"), Err(LqErr::MissingArg { .. })));
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range::<usize>("2,5"), Some((Some(2), Some(5))));
        assert_eq!(parse_range::<usize>("2,"), Some((Some(2), None)));
        assert_eq!(parse_range::<usize>(",5"), Some((None, Some(5))));
        assert_eq!(parse_range::<usize>(","), None);
        assert_eq!(parse_range::<usize>("5"), None);
        assert_eq!(parse_range::<usize>("a,5"), None);
    }

    #[test]
    fn test_parse_general_file_info() {
        assert_eq!(parse_general_file_info(&mut build_args("f.txt"), "peek").unwrap(), ("f.txt".to_owned(), false, None));
        assert_eq!(
            parse_general_file_info(&mut build_args("f.txt append crlf"), "peek").unwrap(),
            ("f.txt".to_owned(), true, Some(true))
        );
        assert_eq!(
            parse_general_file_info(&mut build_args("f.txt lf"), "peek").unwrap(),
            ("f.txt".to_owned(), false, Some(false))
        );
    }

    #[test]
    fn test_parse_full() {
        let (input, ops, output) =
            parse(build_args("of [ Eric Elena Java ] take contains a upper sort desc any len 4,")).unwrap();
        assert_eq!(input, Input::new_of(vec!["Eric".to_owned(), "Elena".to_owned(), "Java".to_owned()]));
        assert_eq!(ops, vec![
            Op::new_take_drop(TakeDropMode::Take, Select::Contains { text: "a".to_owned() }.yes()),
            Op::Case(CaseArg::Upper),
            Op::new_sort(crate::op::SortBy::Text(false), true),
        ]);
        assert_eq!(output, Output::Match {
            mode: MatchMode::Any,
            cond: Select::TextLenRange { min: Some(4), max: None }.yes()
        });
    }

    #[test]
    fn test_parse_defaults() {
        let (input, ops, output) = parse(build_args("")).unwrap();
        assert_eq!(input, Input::new_std_in());
        assert!(ops.is_empty());
        assert_eq!(output, Output::new_std_out());
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            parse(build_args("of a count extra")),
            Err(LqErr::UnknownArgs { args }) if args == vec!["extra".to_owned()]
        ));
    }
}
