use crate::config::Config;
use std::iter::Peekable;

pub(crate) fn parse_configs(args: &mut Peekable<impl Iterator<Item = String>>) -> Vec<Config> {
    let mut configs = Vec::new();
    while let Some(config) = args.peek().and_then(|arg| parse_config(arg)) {
        args.next();
        configs.push(config);
    }
    configs
}

fn parse_config(arg: &str) -> Option<Config> {
    match arg {
        "-h" => Some(Config::Help),
        "-V" => Some(Config::Version),
        "-v" => Some(Config::Verbose),
        "-d" => Some(Config::DryRun),
        "--nocase" => Some(Config::Nocase),
        _ => None, // 遇到非选项参数，停止解析
    }
}
