use crate::condition::{Condition, Select};
use crate::err::LqErr;
use crate::parse::{consume_if_some, next_arg, parse_range};
use lseq::Num;
use std::iter::Peekable;

/// 解析条件，未识别时返回`None`且不消耗参数。
pub(in crate::parse) fn parse_cond(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Option<Condition>, LqErr> {
    let Some((not, name)) = args.peek().and_then(|arg| cond_name(arg)) else {
        return Ok(None);
    };
    args.next();
    let select = match name {
        "len" => parse_len(args)?,
        "num" => parse_num(args),
        "contains" => Select::Contains { text: next_arg(args, "contains", "text")? },
        "prefix" => Select::Prefix { text: next_arg(args, "prefix", "text")? },
        "suffix" => Select::Suffix { text: next_arg(args, "suffix", "text")? },
        "reg" => Select::new_reg_match(&next_arg(args, "reg", "exp")?)?,
        "empty" => Select::TextEmptyOrBlank { empty: true },
        _ => Select::TextEmptyOrBlank { empty: false },
    };
    Ok(Some(Condition::new(select, not)))
}

/// 解析必选的条件。
pub(in crate::parse) fn parse_required_cond(
    args: &mut Peekable<impl Iterator<Item = String>>, cmd: &'static str,
) -> Result<Condition, LqErr> {
    parse_cond(args)?.ok_or(LqErr::MissingArg { cmd, arg: "condition" })
}

fn cond_name(arg: &str) -> Option<(bool, &'static str)> {
    let (not, name) = match arg.strip_prefix('!') {
        Some(name) => (true, name),
        None => (false, arg),
    };
    ["len", "num", "contains", "prefix", "suffix", "reg", "empty", "blank"]
        .into_iter()
        .find(|known| known.eq_ignore_ascii_case(name))
        .map(|known| (not, known))
}

fn parse_len(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Select, LqErr> {
    let value = next_arg(args, "len", "<len>|<min>,<max>")?;
    if let Some((min, max)) = parse_range::<usize>(&value) {
        Ok(Select::TextLenRange { min, max })
    } else if let Ok(spec) = value.parse::<usize>() {
        Ok(Select::TextLenSpec { spec })
    } else {
        Err(LqErr::ArgParseErr {
            cmd: "len",
            arg: "<len>|<min>,<max>",
            arg_value: value,
            error: "invalid length or length range".to_owned(),
        })
    }
}

fn parse_num(args: &mut Peekable<impl Iterator<Item = String>>) -> Select {
    if let Some((min, max)) = consume_if_some(args, |s| parse_range::<Num>(s)) {
        Select::NumRange { min, max }
    } else if let Some(spec) = consume_if_some(args, |s| s.parse::<Num>().ok()) {
        Select::NumSpec { spec }
    } else {
        Select::Num
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::build_args;

    fn cond(args_line: &'static str) -> Option<Condition> {
        parse_cond(&mut build_args(args_line)).unwrap()
    }

    #[test]
    fn test_parse_len() {
        assert_eq!(cond("len 3"), Some(Select::TextLenSpec { spec: 3 }.yes()));
        assert_eq!(cond("len 2,5"), Some(Select::TextLenRange { min: Some(2), max: Some(5) }.yes()));
        assert_eq!(cond("!len ,5"), Some(Select::TextLenRange { min: None, max: Some(5) }.no()));
        assert!(matches!(parse_cond(&mut build_args("len x")), Err(LqErr::ArgParseErr { cmd: "len", .. })));
        assert!(matches!(parse_cond(&mut build_args("len")), Err(LqErr::MissingArg { cmd: "len", .. })));
    }

    #[test]
    fn test_parse_num() {
        assert_eq!(cond("num"), Some(Select::Num.yes()));
        assert_eq!(cond("!num"), Some(Select::Num.no()));
        assert_eq!(cond("num 3.5"), Some(Select::NumSpec { spec: Num::from(3.5) }.yes()));
        assert_eq!(cond("num -2,"), Some(Select::NumRange { min: Some(Num::from(-2)), max: None }.yes()));
        let mut args = build_args("num count");
        assert_eq!(parse_cond(&mut args).unwrap(), Some(Select::Num.yes()));
        assert_eq!(args.next(), Some("count".to_owned()));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(cond("contains a"), Some(Select::Contains { text: "a".to_owned() }.yes()));
        assert_eq!(cond("!prefix E"), Some(Select::Prefix { text: "E".to_owned() }.no()));
        assert_eq!(cond("suffix s"), Some(Select::Suffix { text: "s".to_owned() }.yes()));
        assert_eq!(cond("empty"), Some(Select::TextEmptyOrBlank { empty: true }.yes()));
        assert_eq!(cond("!blank"), Some(Select::TextEmptyOrBlank { empty: false }.no()));
        assert_eq!(cond("reg \\d+"), Some(Select::new_reg_match("\\d+").unwrap().yes()));
        assert!(matches!(parse_cond(&mut build_args("reg (")), Err(LqErr::ParseRegexErr { .. })));
    }

    #[test]
    fn test_parse_unknown() {
        let mut args = build_args("count");
        assert_eq!(parse_cond(&mut args).unwrap(), None);
        assert_eq!(args.next(), Some("count".to_owned()));
        assert!(matches!(parse_required_cond(&mut build_args(""), "any"), Err(LqErr::MissingArg { cmd: "any", .. })));
    }
}
