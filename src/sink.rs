use crate::Result;
use crate::err::SeqErr;
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io;
use std::io::{BufWriter, Write};

/// 输出目标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// 标准输出
    StdOut,
    /// 文件，`append`为否时覆盖原文件，`crlf`未指定时使用`LF`
    File { file: String, append: bool, crlf: Option<bool> },
}

impl Sink {
    pub fn new_std_out() -> Sink {
        Sink::StdOut
    }

    pub fn new_file(file: String, append: bool, crlf: Option<bool>) -> Sink {
        Sink::File { file, append, crlf }
    }

    /// 打开输出目标，文件不存在时创建。
    pub fn open(&self) -> Result<SinkWriter<Box<dyn Write>>> {
        match self {
            Sink::StdOut => Ok(SinkWriter::new("stdout", Box::new(io::stdout().lock()) as Box<dyn Write>)),
            Sink::File { file, append, crlf } => {
                match OpenOptions::new().write(true).truncate(!append).append(*append).create(true).open(file) {
                    Ok(fout) => {
                        let writer: Box<dyn Write> = Box::new(BufWriter::new(fout));
                        Ok(SinkWriter::new(file.clone(), writer).with_crlf(crlf.unwrap_or(false)))
                    }
                    Err(err) => Err(SeqErr::OpenSink { sink: file.clone(), err: err.to_string() }),
                }
            }
        }
    }
}

/// 逐行写出元素的输出器，每个元素写为一行。
#[derive(Debug)]
pub struct SinkWriter<W> {
    name: String,
    writer: W,
    ending: &'static str,
}

impl<W: Write> SinkWriter<W> {
    pub fn new(name: impl Into<String>, writer: W) -> Self {
        SinkWriter { name: name.into(), writer, ending: "\n" }
    }

    pub fn with_crlf(mut self, crlf: bool) -> Self {
        self.ending = if crlf { "\r\n" } else { "\n" };
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn write_item(&mut self, item: &impl Display) -> Result<()> {
        write!(self.writer, "{item}{}", self.ending).map_err(|err| SeqErr::Write {
            sink: self.name.clone(),
            item: item.to_string(),
            err: err.to_string(),
        })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|err| SeqErr::Write { sink: self.name.clone(), item: String::new(), err: err.to_string() })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
