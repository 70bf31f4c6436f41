use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// 错误分类
///
/// 决定错误在 HTTP 层的呈现方式：`Validation` 是客户端错误，
/// 其余都是服务端错误。`Upstream` 在预测路径上会被降级为 neutral，不会到达调用方。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 输入不合法（空文本、未知语言、日期格式错误）
    Validation,
    /// 翻译服务或分类模型失败
    Upstream,
    /// 日志读取或解析失败，趋势无法计算
    Aggregation,
    /// 文件读写失败
    Io,
    /// 配置文件错误
    Config,
    /// 外部检测进程无法启动或停止
    Process,
}

#[derive(Debug, Clone)]
pub struct EngineError {
    kind: ErrorKind,
    message: Cow<'static, str>,
}

impl EngineError {
    pub fn new<T>(kind: ErrorKind, message: T) -> Self
    where
        T: Into<Cow<'static, str>>,
    {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn upstream<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }

    pub fn aggregation<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Self::new(ErrorKind::Aggregation, message)
    }

    pub fn io<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn config<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn process<T: Into<Cow<'static, str>>>(message: T) -> Self {
        Self::new(ErrorKind::Process, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_client_error(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for EngineError {}

pub type EngineResult<T> = Result<T, EngineError>;
