use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonsError {
    Validation(String),
    NullArgument(String),
    Overflow(String),
    FileOperation(String),
    Parse(String),
    Config(String),
    Logging(String),
    Panicked(String),
}

impl CommonsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CommonsError::Validation(_) => "C001",
            CommonsError::NullArgument(_) => "C002",
            CommonsError::Overflow(_) => "C003",
            CommonsError::FileOperation(_) => "C004",
            CommonsError::Parse(_) => "C005",
            CommonsError::Config(_) => "C006",
            CommonsError::Logging(_) => "C007",
            CommonsError::Panicked(_) => "C008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CommonsError::Validation(_) => "Validation Error",
            CommonsError::NullArgument(_) => "Null Argument",
            CommonsError::Overflow(_) => "Arithmetic Overflow",
            CommonsError::FileOperation(_) => "File Operation Error",
            CommonsError::Parse(_) => "Parse Error",
            CommonsError::Config(_) => "Configuration Error",
            CommonsError::Logging(_) => "Logging Error",
            CommonsError::Panicked(_) => "Panicked",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CommonsError::Validation(msg) => msg,
            CommonsError::NullArgument(msg) => msg,
            CommonsError::Overflow(msg) => msg,
            CommonsError::FileOperation(msg) => msg,
            CommonsError::Parse(msg) => msg,
            CommonsError::Config(msg) => msg,
            CommonsError::Logging(msg) => msg,
            CommonsError::Panicked(msg) => msg,
        }
    }

    /// 格式化为彩色输出（用于终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CommonsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CommonsError {}

// 便捷的构造函数
impl CommonsError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CommonsError::Validation(msg.into())
    }

    pub fn null_argument<T: Into<String>>(msg: T) -> Self {
        CommonsError::NullArgument(msg.into())
    }

    pub fn overflow<T: Into<String>>(msg: T) -> Self {
        CommonsError::Overflow(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CommonsError::FileOperation(msg.into())
    }

    pub fn parse<T: Into<String>>(msg: T) -> Self {
        CommonsError::Parse(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        CommonsError::Config(msg.into())
    }

    pub fn logging<T: Into<String>>(msg: T) -> Self {
        CommonsError::Logging(msg.into())
    }

    pub fn panicked<T: Into<String>>(msg: T) -> Self {
        CommonsError::Panicked(msg.into())
    }
}

impl From<std::io::Error> for CommonsError {
    fn from(err: std::io::Error) -> Self {
        CommonsError::FileOperation(err.to_string())
    }
}

impl From<config::ConfigError> for CommonsError {
    fn from(err: config::ConfigError) -> Self {
        CommonsError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CommonsError {
    fn from(err: serde_json::Error) -> Self {
        CommonsError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for CommonsError {
    fn from(err: toml::ser::Error) -> Self {
        CommonsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CommonsError>;

/// The innermost cause of a failure chain.
pub fn root_cause(failure: &anyhow::Error) -> &(dyn std::error::Error + 'static) {
    failure.root_cause()
}

/// Renders every cause of a failure, outermost first, separated by `: `.
pub fn failure_chain(failure: &anyhow::Error) -> String {
    failure
        .chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(": ")
}
