use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// Insights 服务 API 调用错误
    Api(ApiError),
    /// 用户输入错误
    Input(InputError),
    /// 文件操作错误
    File(FileError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::Input(e) => write!(f, "输入错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::Input(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// Insights 服务 API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 服务无法自动推断必需列，需要用户手动映射
    MappingRequired {
        columns: Vec<String>,
    },
    /// 服务返回错误响应
    RequestFailed {
        endpoint: String,
        message: String,
    },
    /// 传输层错误（连接失败、超时等）
    TransportFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 成功响应但响应体无法解码
    ParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MappingRequired { columns } => {
                write!(f, "需要手动映射列 (可选列: {})", columns.join(", "))
            }
            ApiError::RequestFailed { endpoint, message } => {
                write!(f, "API请求失败 ({}): {}", endpoint, message)
            }
            ApiError::TransportFailed { endpoint, source } => {
                write!(f, "网络请求失败 ({}): {}", endpoint, source)
            }
            ApiError::ParseFailed { source } => {
                write!(f, "响应解析失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::TransportFailed { source, .. } | ApiError::ParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 用户输入错误
#[derive(Debug)]
pub enum InputError {
    /// Google Sheet 链接为空
    EmptySheetUrl,
    /// Google Sheet 链接格式不正确
    InvalidSheetUrl {
        url: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptySheetUrl => {
                write!(f, "请粘贴 Google Sheet CSV 导出链接")
            }
            InputError::InvalidSheetUrl { url } => {
                write!(f, "链接格式不正确 (需要 http/https 链接): {}", url)
            }
        }
    }
}

impl std::error::Error for InputError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TomlParseFailed { path, source } => {
                write!(f, "配置文件解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::ParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建需要手动映射错误
    pub fn mapping_required(columns: Vec<String>) -> Self {
        AppError::Api(ApiError::MappingRequired { columns })
    }

    /// 创建API请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            message: message.into(),
        })
    }

    /// 创建传输层错误
    pub fn transport_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::TransportFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 如果是"需要手动映射"错误，返回可选列列表
    pub fn mapping_columns(&self) -> Option<&[String]> {
        match self {
            AppError::Api(ApiError::MappingRequired { columns }) => Some(columns),
            _ => None,
        }
    }

    /// 生成面向用户的错误文案
    ///
    /// 服务端返回的错误消息原样透出；ParseFailed 在展示上与普通请求失败同等对待
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(ApiError::RequestFailed { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
