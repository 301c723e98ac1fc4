use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文档结构错误（整篇文档致命）
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 配置错误（派发前致命）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 存储错误（流水线结束后致命）
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 章节解析错误
///
/// 任意一章出错都会使整篇文档解析失败，不返回部分结果
#[derive(Debug, Error)]
pub enum ParseError {
    /// 章节编号无法解析为整数
    #[error("第 {offset} 字节处的章节编号 '{token}' 无法解析: {source}")]
    InvalidChapterNumber {
        token: String,
        offset: usize,
        #[source]
        source: std::num::ParseIntError,
    },
    /// 章节行数不足（至少需要编号、标题、简介三行）
    #[error("第 {offset} 字节处的章节 '{token}' 只有 {lines} 行，至少需要编号、标题和简介三行")]
    ChapterTooShort {
        token: String,
        offset: usize,
        lines: usize,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 并发数非法
    #[error("并发数必须在 1 到 {max} 之间，当前值: {value}")]
    InvalidConcurrencyLimit { value: usize, max: usize },
    /// 缺少摘要服务凭证
    #[error("未提供摘要服务的 API Key（--key / SECRET_KEY / OPENAI_API_KEY）")]
    MissingCredential,
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置文件读取失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("解析配置文件失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 单章摘要错误
///
/// 只影响对应章节，记录在 `SummaryResult::error` 中，不会中断整批任务
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummarizeError {
    /// 临时性错误（网络、限流、服务端异常）
    #[error("摘要服务暂时不可用: {0}")]
    Transient(String),
    /// 不可恢复错误（请求构造失败、返回内容为空）
    #[error("摘要服务调用失败: {0}")]
    Fatal(String),
    /// 执行单元异常退出
    #[error("摘要任务异常退出: {0}")]
    Aborted(String),
}

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    /// 存储目录不可用
    #[error("存储目录不可用 ({path}): {source}")]
    DirectoryUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入记录失败
    #[error("写入记录失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 记录不存在
    #[error("记录不存在: {id}")]
    NotFound { id: u64 },
    /// 记录序列化失败
    #[error("记录序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
    /// 读取记录失败
    #[error("读取记录失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否发生在派发之前（解析或配置阶段）
    pub fn is_pre_dispatch(&self) -> bool {
        matches!(self, AppError::Parse(_) | AppError::Config(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
