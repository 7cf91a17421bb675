use crate::Seq;
use crate::err::LqErr;
use cmd_help::CmdHelp;
use lseq::{Integer, LazySeq};
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};

#[derive(Debug, Eq, PartialEq, CmdHelp)]
pub(crate) enum Input {
    /// in          从标准输入按行读取输入。
    ///             未指定输入时的默认输入。
    StdIn,
    /// file        从文件按行读取输入。
    ///             file <file>|[ <file>[...] ]
    ///                 <file>  文件路径，至少指定一个，多个文件需使用`[`和`]`包围。
    ///             例如：
    ///                 file input.txt
    ///                 file [ input1.txt input2.txt ]
    File { files: Vec<String> },
    /// of          使用直接字面值作为输入。
    ///             of <text>|[ <text>[...] ]
    ///                 <text>  字面值，至少指定一个，字面值`[`和`]`需要使用`\[`和`\]`转义。
    ///             例如：
    ///                 of line
    ///                 of [ Java Scala Groovy ]
    Of { values: Vec<String> },
    /// range       生成闭区间内的整数作为输入。
    ///             range <start>,<end>[,<step>]
    ///                 <start> 起始值，包含，必选。
    ///                 <end>   结束值，包含，必选。
    ///                 <step>  步长，不能为0，可选，未指定时取1，为负值时逆序生成。
    ///             例如：
    ///                 range 1,5       生成：1 2 3 4 5
    ///                 range 0,10,3    生成：0 3 6 9
    ///                 range 10,0,-5   生成：10 5 0
    Range { start: Integer, end: Integer, step: Integer },
}

impl Input {
    pub(crate) fn new_std_in() -> Input {
        Input::StdIn
    }
    pub(crate) fn new_file(files: Vec<String>) -> Input {
        Input::File { files }
    }
    pub(crate) fn new_of(values: Vec<String>) -> Input {
        Input::Of { values }
    }
    pub(crate) fn new_range(start: Integer, end: Integer, step: Integer) -> Input {
        Input::Range { start, end, step }
    }

    /// 构造序列，文件在此时全部打开，内容在遍历时才逐行读取。
    pub(crate) fn into_seq(self) -> Result<Seq, LqErr> {
        match self {
            Input::StdIn => Ok(LazySeq::try_new(io::stdin().lines())),
            Input::File { files } => {
                let mut readers = Vec::with_capacity(files.len());
                for file in files {
                    match File::open(&file) {
                        Ok(fin) => readers.push((BufReader::new(fin), file)),
                        Err(err) => return Err(LqErr::OpenInputFileErr { file, err: err.to_string() }),
                    }
                }
                Ok(LazySeq::try_new(readers.into_iter().flat_map(|(reader, file)| {
                    reader.lines().enumerate().map(move |(line_no, res)| {
                        res.map_err(|err| LqErr::ReadFromInputFileErr {
                            file: file.clone(),
                            line_no: line_no + 1,
                            err: err.to_string(),
                        })
                    })
                })))
            }
            Input::Of { values } => Ok(LazySeq::of(values)),
            Input::Range { start, end, step } => Ok(LazySeq::range_closed(start, end, step)?.map(|x| x.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_of() {
        let values = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(Input::new_of(values.clone()).into_seq().unwrap().to_list().unwrap(), values);
    }

    #[test]
    fn test_range() {
        assert_eq!(Input::new_range(1, 5, 2).into_seq().unwrap().join(" ").unwrap(), "1 3 5");
        assert!(matches!(
            Input::new_range(1, 5, 0).into_seq().unwrap_err(),
            LqErr::Seq(lseq::SeqErr::InvalidArgument { op: "range_closed", .. })
        ));
    }

    #[test]
    fn test_file() {
        let path = std::env::temp_dir().join(format!("lq_input_{}.txt", std::process::id()));
        {
            let mut fout = File::create(&path).unwrap();
            write!(fout, "line1\nline2\n").unwrap();
        }
        let file = path.to_string_lossy().to_string();
        let lines = Input::new_file(vec![file.clone(), file.clone()]).into_seq().unwrap().to_list().unwrap();
        assert_eq!(lines, vec!["line1", "line2", "line1", "line2"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_read_err() {
        let path = std::env::temp_dir().join(format!("lq_input_bad_{}.txt", std::process::id()));
        std::fs::write(&path, b"ok\n\xff\xfe\n").unwrap();
        let file = path.to_string_lossy().to_string();
        let err = Input::new_file(vec![file]).into_seq().unwrap().to_list().map_err(LqErr::from).unwrap_err();
        assert!(matches!(err, LqErr::ReadFromInputFileErr { line_no: 2, .. }));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_not_found() {
        let res = Input::new_file(vec!["/no/such/dir/lq_missing.txt".to_owned()]).into_seq();
        assert!(matches!(res.unwrap_err(), LqErr::OpenInputFileErr { .. }));
    }
}
