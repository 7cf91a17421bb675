use std::error::Error;
use thiserror::Error;

/// 用户函数返回的错误，统一装箱后向外传播。
pub type BoxedErr = Box<dyn Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum SeqErr {
    #[error("[Invalid Arg] Invalid argument for `{op}`: {reason}")]
    InvalidArgument { op: &'static str, reason: String },

    #[error("[Consumed] Sequence already consumed, unable to run terminal `{op}`")]
    AlreadyConsumed { op: &'static str },

    #[error("[User Fn] Function passed to `{op}` failed: {source}")]
    UserFn {
        op: &'static str,
        #[source]
        source: BoxedErr,
    },

    #[error("[Source] Read element error: {0}")]
    Source(#[source] BoxedErr),

    #[error("[Sink] Open sink `{sink}` error: {err}")]
    OpenSink { sink: String, err: String },

    #[error("[Sink] Write item `{item}` to `{sink}` error: {err}")]
    Write { sink: String, item: String, err: String },
}

impl SeqErr {
    pub(crate) fn invalid(op: &'static str, reason: impl Into<String>) -> SeqErr {
        SeqErr::InvalidArgument { op, reason: reason.into() }
    }

    pub(crate) fn user_fn(op: &'static str, source: impl Into<BoxedErr>) -> SeqErr {
        SeqErr::UserFn { op, source: source.into() }
    }

    pub fn is_already_consumed(&self) -> bool {
        matches!(self, SeqErr::AlreadyConsumed { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, SeqErr::InvalidArgument { .. })
    }

    pub fn is_user_fn(&self) -> bool {
        matches!(self, SeqErr::UserFn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            SeqErr::AlreadyConsumed { op: "count" }.to_string(),
            "[Consumed] Sequence already consumed, unable to run terminal `count`"
        );
        assert_eq!(
            SeqErr::invalid("range", "step must not be zero").to_string(),
            "[Invalid Arg] Invalid argument for `range`: step must not be zero"
        );
        let err = SeqErr::user_fn("map", "boom");
        assert_eq!(err.to_string(), "[User Fn] Function passed to `map` failed: boom");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_kind() {
        assert!(SeqErr::AlreadyConsumed { op: "count" }.is_already_consumed());
        assert!(SeqErr::invalid("sorted_partial", "NaN").is_invalid_argument());
        assert!(SeqErr::user_fn("filter", "bad").is_user_fn());
        assert!(!SeqErr::user_fn("filter", "bad").is_already_consumed());
    }
}
