use crate::err::LqErr;
use crate::op::{CaseArg, Op, SortBy, TakeDropMode};
use crate::parse::condition::parse_required_cond;
use crate::parse::{consume_keyword, next_parsed, parse_general_file_info};
use lseq::Sink;
use std::iter::Peekable;

pub(in crate::parse) fn parse_ops(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Vec<Op>, LqErr> {
    let mut ops = vec![];
    while let Some(op) = parse_op(args)? {
        ops.push(op);
    }
    Ok(ops)
}

fn parse_op(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Option<Op>, LqErr> {
    match args.peek() {
        Some(cmd) => {
            if cmd.eq_ignore_ascii_case("upper") {
                args.next();
                Ok(Some(Op::Case(CaseArg::Upper)))
            } else if cmd.eq_ignore_ascii_case("lower") {
                args.next();
                Ok(Some(Op::Case(CaseArg::Lower)))
            } else if cmd.eq_ignore_ascii_case("case") {
                args.next();
                Ok(Some(Op::Case(CaseArg::Switch)))
            } else if cmd.eq_ignore_ascii_case("take") {
                parse_take_drop(args, true)
            } else if cmd.eq_ignore_ascii_case("drop") {
                parse_take_drop(args, false)
            } else if cmd.eq_ignore_ascii_case("sort") {
                parse_sort(args)
            } else if cmd.eq_ignore_ascii_case("distinct") {
                args.next();
                Ok(Some(Op::Distinct { nocase: consume_keyword(args, "nocase") }))
            } else if cmd.eq_ignore_ascii_case("peek") {
                parse_peek(args)
            } else if cmd.eq_ignore_ascii_case("limit") {
                args.next();
                Ok(Some(Op::Limit { count: next_parsed(args, "limit", "count")? }))
            } else if cmd.eq_ignore_ascii_case("skip") {
                args.next();
                Ok(Some(Op::Skip { count: next_parsed(args, "skip", "count")? }))
            } else {
                Ok(None)
            }
        }
        None => Ok(None),
    }
}

fn parse_take_drop(args: &mut Peekable<impl Iterator<Item = String>>, take: bool) -> Result<Option<Op>, LqErr> {
    args.next();
    let while_mode = consume_keyword(args, "while");
    let (mode, cmd) = match (take, while_mode) {
        (true, false) => (TakeDropMode::Take, "take"),
        (false, false) => (TakeDropMode::Drop, "drop"),
        (true, true) => (TakeDropMode::TakeWhile, "take while"),
        (false, true) => (TakeDropMode::DropWhile, "drop while"),
    };
    Ok(Some(Op::new_take_drop(mode, parse_required_cond(args, cmd)?)))
}

fn parse_sort(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Option<Op>, LqErr> {
    args.next();
    let num = consume_keyword(args, "num");
    let nocase = consume_keyword(args, "nocase");
    let desc = consume_keyword(args, "desc");
    let sort_by = if num { SortBy::Num } else { SortBy::Text(nocase) };
    Ok(Some(Op::new_sort(sort_by, desc)))
}

fn parse_peek(args: &mut Peekable<impl Iterator<Item = String>>) -> Result<Option<Op>, LqErr> {
    args.next();
    if consume_keyword(args, "file") {
        let (file, append, crlf) = parse_general_file_info(args, "peek")?;
        Ok(Some(Op::Peek(Sink::new_file(file, append, crlf))))
    } else {
        Ok(Some(Op::Peek(Sink::new_std_out())))
    }
}
