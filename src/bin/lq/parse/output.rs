use crate::err::LqErr;
use crate::output::{GroupBy, MatchMode, Output};
use crate::parse::condition::parse_required_cond;
use crate::parse::{consume_keyword, next_arg, parse_general_file_info};
use std::iter::Peekable;

pub(in crate::parse) fn parse_output(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Output, LqErr> {
    match args.peek() {
        Some(cmd) => {
            if cmd.eq_ignore_ascii_case("to") {
                parse_to(args)
            } else if cmd.eq_ignore_ascii_case("count") {
                args.next();
                Ok(Output::Count)
            } else if cmd.eq_ignore_ascii_case("sum") {
                args.next();
                Ok(Output::Sum)
            } else if cmd.eq_ignore_ascii_case("avg") {
                args.next();
                Ok(Output::Avg)
            } else if cmd.eq_ignore_ascii_case("min") {
                args.next();
                Ok(Output::Extremum { max: false, num: consume_keyword(args, "num") })
            } else if cmd.eq_ignore_ascii_case("max") {
                args.next();
                Ok(Output::Extremum { max: true, num: consume_keyword(args, "num") })
            } else if cmd.eq_ignore_ascii_case("join") {
                parse_join(args)
            } else if cmd.eq_ignore_ascii_case("group") {
                parse_group(args)
            } else if cmd.eq_ignore_ascii_case("partition") {
                args.next();
                Ok(Output::Partition { cond: parse_required_cond(args, "partition")? })
            } else if cmd.eq_ignore_ascii_case("any") {
                args.next();
                Ok(Output::Match { mode: MatchMode::Any, cond: parse_required_cond(args, "any")? })
            } else if cmd.eq_ignore_ascii_case("all") {
                args.next();
                Ok(Output::Match { mode: MatchMode::All, cond: parse_required_cond(args, "all")? })
            } else if cmd.eq_ignore_ascii_case("none") {
                args.next();
                Ok(Output::Match { mode: MatchMode::None, cond: parse_required_cond(args, "none")? })
            } else if cmd.eq_ignore_ascii_case("stats") {
                args.next();
                Ok(Output::Stats)
            } else {
                Ok(Output::new_std_out())
            }
        }
        None => Ok(Output::new_std_out()),
    }
}

fn parse_to(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Output, LqErr> {
    args.next();
    match args.next() {
        Some(target) if target.eq_ignore_ascii_case("out") => Ok(Output::new_std_out()),
        Some(target) if target.eq_ignore_ascii_case("file") => {
            let (file, append, crlf) = parse_general_file_info(args, "to file")?;
            Ok(Output::new_file(file, append, crlf))
        }
        Some(target) => Err(LqErr::ArgParseErr {
            cmd: "to",
            arg: "out|file",
            arg_value: target,
            error: "unknown output target".to_owned(),
        }),
        None => Err(LqErr::MissingArg { cmd: "to", arg: "out|file" }),
    }
}

fn parse_join(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Output, LqErr> {
    args.next();
    let mut parts = [String::new(), String::new(), String::new()];
    for part in parts.iter_mut() {
        match args.next() {
            Some(arg) => *part = arg,
            None => break,
        }
    }
    let [delimiter, prefix, suffix] = parts;
    Ok(Output::new_join(delimiter, prefix, suffix))
}

fn parse_group(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Output, LqErr> {
    args.next();
    if consume_keyword(args, "len") {
        Ok(Output::Group(GroupBy::Len))
    } else if consume_keyword(args, "first") {
        Ok(Output::Group(GroupBy::First))
    } else {
        let arg_value = next_arg(args, "group", "len|first")?;
        Err(LqErr::ArgParseErr { cmd: "group", arg: "len|first", arg_value, error: "unknown group key".to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Select;
    use crate::parse::build_args;

    fn output(args_line: &'static str) -> Output {
        parse_output(&mut build_args(args_line)).unwrap()
    }

    #[test]
    fn test_parse_to() {
        assert_eq!(output(""), Output::new_std_out());
        assert_eq!(output("to out"), Output::new_std_out());
        assert_eq!(output("to file out.txt append lf"), Output::new_file("out.txt".to_owned(), true, Some(false)));
        assert!(matches!(parse_output(&mut build_args("to")), Err(LqErr::MissingArg { cmd: "to", .. })));
        assert!(matches!(parse_output(&mut build_args("to x")), Err(LqErr::ArgParseErr { cmd: "to", .. })));
    }

    #[test]
    fn test_parse_aggregate() {
        assert_eq!(output("count"), Output::Count);
        assert_eq!(output("SUM"), Output::Sum);
        assert_eq!(output("avg"), Output::Avg);
        assert_eq!(output("min"), Output::Extremum { max: false, num: false });
        assert_eq!(output("max num"), Output::Extremum { max: true, num: true });
        assert_eq!(output("stats"), Output::Stats);
    }

    #[test]
    fn test_parse_join() {
        let join = |d: &str, p: &str, s: &str| Output::new_join(d.to_owned(), p.to_owned(), s.to_owned());
        assert_eq!(output("join"), join("", "", ""));
        assert_eq!(output("join ,"), join(",", "", ""));
        assert_eq!(output("join , < >"), join(",", "<", ">"));
    }

    #[test]
    fn test_parse_group_partition_match() {
        assert_eq!(output("group len"), Output::Group(GroupBy::Len));
        assert_eq!(output("group first"), Output::Group(GroupBy::First));
        assert!(matches!(parse_output(&mut build_args("group x")), Err(LqErr::ArgParseErr { cmd: "group", .. })));
        assert_eq!(output("partition num 16,"), Output::Partition {
            cond: Select::NumRange { min: Some(lseq::Num::from(16)), max: None }.yes()
        });
        assert_eq!(output("none suffix s"), Output::Match {
            mode: MatchMode::None,
            cond: Select::Suffix { text: "s".to_owned() }.yes()
        });
        assert!(matches!(parse_output(&mut build_args("all")), Err(LqErr::MissingArg { cmd: "all", .. })));
    }
}
