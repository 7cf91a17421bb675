/// 仅当输出流为终端时添加ANSI颜色。
pub(crate) fn paint(text: &str, code: &str, terminal: bool) -> String {
    if terminal { format!("\x1b[{code}m{text}\x1b[0m") } else { text.to_owned() }
}

#[macro_export]
macro_rules! println_err {
    ($($arg:tt)*) => {
        eprintln!(
            "{}",
            $crate::print::paint(&format!($($arg)*), "1;31", std::io::IsTerminal::is_terminal(&std::io::stderr()))
        )
    };
}

#[macro_export]
macro_rules! println_info {
    ($($arg:tt)*) => {
        println!(
            "{}",
            $crate::print::paint(&format!($($arg)*), "1;34", std::io::IsTerminal::is_terminal(&std::io::stdout()))
        )
    };
}

#[macro_export]
macro_rules! println_notice {
    ($($arg:tt)*) => {
        println!(
            "{}",
            $crate::print::paint(&format!($($arg)*), "35", std::io::IsTerminal::is_terminal(&std::io::stdout()))
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint() {
        assert_eq!(paint("oops", "1;31", true), "\x1b[1;31moops\x1b[0m");
        assert_eq!(paint("oops", "1;31", false), "oops");
    }
}
