use crate::condition::Select;
use crate::config::Config;
use crate::err::LqErr;
use crate::input::Input;
use crate::op::Op;
use crate::output::Output;
use itertools::Itertools;
use lseq::{LazySeq, Sink};

mod condition;
mod config;
mod err;
mod input;
mod op;
mod output;
mod parse;
mod print;

/// 命令行中流转的文本序列。
pub(crate) type Seq = LazySeq<'static, String>;

fn main() {
    if let Err(e) = run() {
        e.termination();
    }
}

fn run() -> Result<(), LqErr> {
    let mut args = std::env::args().skip(1).peekable();
    let configs = parse::parse_configs(&mut args);
    if configs.contains(&Config::Help) {
        print_help();
        return Ok(());
    }
    if configs.contains(&Config::Version) {
        println_info!("lq {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let (input, ops, output) = parse::parse(args)?;
    if configs.contains(&Config::Verbose) {
        println_info!("Input:");
        println!("    {:?}", input);
        println_info!("Op:");
        println!("{}", ops.iter().map(|op| format!("    {:?}", op)).join("\n"));
        println_info!("Output:");
        println!("    {:?}", output);
    }
    let configs: &'static mut [Config] = configs.leak();
    let mut seq = input.into_seq()?;
    for op in ops {
        seq = op.wrap(seq, configs)?;
    }
    if !configs.contains(&Config::DryRun) { output.handle(seq, &mut Sink::new_std_out().open()?) } else { Ok(()) }
}

fn print_help() {
    println_info!("lq {}：惰性文本序列处理工具", env!("CARGO_PKG_VERSION"));
    println!("用法：lq [-h|-V|-v|-d|--nocase] [<input>] [<op>...] [<output>]");
    println!("    -h          打印帮助信息。");
    println!("    -V          打印版本信息。");
    println!("    -v          执行前打印解析后的流水线。");
    println!("    -d          仅解析，不执行。");
    println!("    --nocase    全局忽略大小写。");
    println_notice!("输入：");
    println!("{}", Input::help_text());
    println_notice!("操作：");
    println!("{}", Op::help_text());
    println_notice!("条件：");
    println!("{}", Select::help_text());
    println_notice!("输出：");
    println!("{}", Output::help_text());
}
