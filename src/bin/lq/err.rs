use crate::println_err;
use lseq::SeqErr;
use std::process::{ExitCode, Termination};
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum LqErr {
    #[error("[Arg Parse Err] Unable to parse `{arg_value}` in argument `{arg}` of cmd `{cmd}`, error: {error}")]
    ArgParseErr { cmd: &'static str, arg: &'static str, arg_value: String, error: String },

    #[error("[Missing Arg] Missing argument `{arg}` of cmd `{cmd}`")]
    MissingArg { cmd: &'static str, arg: &'static str },

    #[error("[Missing Arg] At least one value for argument `{arg}` is required for cmd `{cmd}`")]
    ArgNotEnough { cmd: &'static str, arg: &'static str },

    #[error("[Bad Arg] Closing bracket (`]`) for argument `{arg}` is required for cmd `{cmd}`")]
    UnclosingMultiArg { cmd: &'static str, arg: &'static str },

    #[error("[Bad Arg] Unexpected closing bracket of argument `{arg}` for cmd `{cmd}`")]
    UnexpectedClosingBracket { cmd: &'static str, arg: &'static str },

    #[error("[Bad Arg] Unknown arguments: {args:?}")]
    UnknownArgs { args: Vec<String> },

    #[error("[Regex] Invalid regex `{reg}`: {err}")]
    ParseRegexErr { reg: String, err: String },

    #[error("[Input] Open input file `{file}` error: {err}")]
    OpenInputFileErr { file: String, err: String },

    #[error("[Input] Read line `{line_no}` of input file `{file}` error: {err}")]
    ReadFromInputFileErr { file: String, line_no: usize, err: String },

    #[error(transparent)]
    Seq(SeqErr),
}

impl From<SeqErr> for LqErr {
    /// 数据源产出的命令行错误（例如读取输入文件失败）还原为原始错误。
    fn from(err: SeqErr) -> Self {
        match err {
            SeqErr::Source(source) => match source.downcast::<LqErr>() {
                Ok(err) => *err,
                Err(source) => LqErr::Seq(SeqErr::Source(source)),
            },
            err => LqErr::Seq(err),
        }
    }
}

impl Termination for LqErr {
    fn report(self) -> ExitCode {
        println_err!("{}", self);
        ExitCode::from(self.exit_code())
    }
}

impl LqErr {
    pub(crate) fn termination(self) -> ! {
        let exit_code = self.exit_code();
        self.report();
        std::process::exit(exit_code as i32);
    }

    fn exit_code(&self) -> u8 {
        match self {
            LqErr::ArgParseErr { .. } => 1,
            LqErr::MissingArg { .. } => 2,
            LqErr::ArgNotEnough { .. } => 3,
            LqErr::UnclosingMultiArg { .. } => 4,
            LqErr::UnexpectedClosingBracket { .. } => 5,
            LqErr::UnknownArgs { .. } => 6,
            LqErr::ParseRegexErr { .. } => 7,
            LqErr::OpenInputFileErr { .. } => 8,
            LqErr::ReadFromInputFileErr { .. } => 9,
            LqErr::Seq(SeqErr::InvalidArgument { .. }) => 10,
            LqErr::Seq(SeqErr::AlreadyConsumed { .. }) => 11,
            LqErr::Seq(SeqErr::UserFn { .. }) => 12,
            LqErr::Seq(SeqErr::Source(_)) => 13,
            LqErr::Seq(SeqErr::OpenSink { .. }) => 14,
            LqErr::Seq(SeqErr::Write { .. }) => 15,
        }
    }
}
