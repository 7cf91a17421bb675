use crate::err::LqErr;
use crate::input::Input;
use crate::parse::{next_arg, parse_arg_or_arg1};
use lseq::Integer;
use std::iter::Peekable;

pub(in crate::parse) fn parse_input(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Input, LqErr> {
    match args.peek() {
        Some(cmd) => {
            if cmd.eq_ignore_ascii_case("in") {
                args.next();
                Ok(Input::new_std_in())
            } else if cmd.eq_ignore_ascii_case("file") {
                args.next();
                Ok(Input::new_file(parse_arg_or_arg1(args, "file", "file")?))
            } else if cmd.eq_ignore_ascii_case("of") {
                args.next();
                Ok(Input::new_of(parse_arg_or_arg1(args, "of", "text")?))
            } else if cmd.eq_ignore_ascii_case("range") {
                args.next();
                parse_range_input(args)
            } else {
                Ok(Input::new_std_in())
            }
        }
        None => Ok(Input::new_std_in()),
    }
}

fn parse_range_input(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Input, LqErr> {
    let range = next_arg(args, "range", "<start>,<end>[,<step>]")?;
    let parse_err = |error: &str| LqErr::ArgParseErr {
        cmd: "range",
        arg: "<start>,<end>[,<step>]",
        arg_value: range.clone(),
        error: error.to_owned(),
    };
    let parts = range
        .split(',')
        .map(|part| part.trim().parse::<Integer>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| parse_err(&err.to_string()))?;
    match parts[..] {
        [start, end] => Ok(Input::new_range(start, end, 1)),
        [start, end, step] => Ok(Input::new_range(start, end, step)),
        _ => Err(parse_err("expect 2 or 3 integers")),
    }
}
