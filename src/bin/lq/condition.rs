use crate::err::LqErr;
use cmd_help::CmdHelp;
use lseq::Num;
use regex::Regex;

/// 条件
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Condition {
    Yes(Select),
    No(Select),
}

impl Condition {
    pub(crate) fn new(select: Select, not: bool) -> Condition {
        if not { Condition::No(select) } else { Condition::Yes(select) }
    }

    pub(crate) fn test(&self, input: &str) -> bool {
        match self {
            Condition::Yes(select) => select.select(input),
            Condition::No(select) => !select.select(input),
        }
    }
}

/// 选择
#[derive(Debug, Clone, CmdHelp)]
pub(crate) enum Select {
    /// [!]len <min>,<max>
    ///     按照字符串长度范围选择，最小值和最大值至少指定其一，均包含。
    ///     例如：len 2,  len 2,5  len ,5  !len 2,5
    TextLenRange { min: Option<usize>, max: Option<usize> },
    /// [!]len <len>
    ///     按照字符串特定长度选择。
    ///     例如：len 3  !len 3
    TextLenSpec { spec: usize },
    /// [!]num <min>,<max>
    ///     按照数值范围选择，最小值和最大值至少指定其一，均包含，无法解析为数值的不选择。
    ///     例如：num 2,5  num -2.1,5  num ,5.3
    NumRange { min: Option<Num>, max: Option<Num> },
    /// [!]num <spec>
    ///     按照数值特定值选择，无法解析为数值的不选择。
    ///     例如：num 3  num 3.3
    NumSpec { spec: Num },
    /// [!]num
    ///     选择可以解析为有限数值的数据。
    Num,
    /// [!]contains <text>
    ///     选择包含指定子串的数据。
    Contains { text: String },
    /// [!]prefix <text>
    ///     选择以指定子串开头的数据。
    Prefix { text: String },
    /// [!]suffix <text>
    ///     选择以指定子串结尾的数据。
    Suffix { text: String },
    /// [!]empty
    ///     选择空字符串数据。
    /// [!]blank
    ///     选择全部为空白字符的数据，包括空字符串。
    TextEmptyOrBlank { empty: bool },
    /// [!]reg <exp>
    ///     选择完整匹配给定正则表达式的数据。
    ///     例如：reg '\d{1,3}(\.\d{1,3}){3}'
    RegMatch { regex: Regex },
}

impl PartialEq for Select {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Select::TextLenRange { min: l_min, max: l_max }, Select::TextLenRange { min: r_min, max: r_max }) => {
                l_min == r_min && l_max == r_max
            }
            (Select::TextLenSpec { spec: l }, Select::TextLenSpec { spec: r }) => l == r,
            (Select::NumRange { min: l_min, max: l_max }, Select::NumRange { min: r_min, max: r_max }) => {
                l_min == r_min && l_max == r_max
            }
            (Select::NumSpec { spec: l }, Select::NumSpec { spec: r }) => l == r,
            (Select::Num, Select::Num) => true,
            (Select::Contains { text: l }, Select::Contains { text: r }) => l == r,
            (Select::Prefix { text: l }, Select::Prefix { text: r }) => l == r,
            (Select::Suffix { text: l }, Select::Suffix { text: r }) => l == r,
            (Select::TextEmptyOrBlank { empty: l }, Select::TextEmptyOrBlank { empty: r }) => l == r,
            // Regex 比较模式字符串
            (Select::RegMatch { regex: l }, Select::RegMatch { regex: r }) => l.as_str() == r.as_str(),
            _ => false,
        }
    }
}

impl Select {
    pub(crate) fn new_reg_match(regex: &str) -> Result<Select, LqErr> {
        let reg = format!(r"\A(?:{})\z", regex);
        Regex::new(&reg)
            .map(|regex| Select::RegMatch { regex })
            .map_err(|err| LqErr::ParseRegexErr { reg: regex.to_owned(), err: err.to_string() })
    }

    pub(crate) fn yes(self) -> Condition {
        Condition::Yes(self)
    }

    pub(crate) fn no(self) -> Condition {
        Condition::No(self)
    }

    fn select(&self, input: &str) -> bool {
        match self {
            Select::TextLenRange { min, max } => {
                let len = input.chars().count();
                min.is_none_or(|min_len| len >= min_len) && max.is_none_or(|max_len| len <= max_len)
            }
            Select::TextLenSpec { spec } => input.chars().count() == *spec,
            Select::NumRange { min, max } => input
                .parse::<Num>()
                .map(|num| min.is_none_or(|min| num >= min) && max.is_none_or(|max| num <= max))
                .unwrap_or(false),
            Select::NumSpec { spec } => input.parse::<Num>().is_ok_and(|num| &num == spec),
            Select::Num => input.parse::<Num>().is_ok(),
            Select::Contains { text } => input.contains(text.as_str()),
            Select::Prefix { text } => input.starts_with(text.as_str()),
            Select::Suffix { text } => input.ends_with(text.as_str()),
            Select::TextEmptyOrBlank { empty } => {
                if *empty {
                    input.is_empty()
                } else {
                    input.chars().all(|c| c.is_whitespace())
                }
            }
            Select::RegMatch { regex } => regex.is_match(input),
        }
    }
}
