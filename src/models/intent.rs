//! 上传意图模型
//!
//! 封装"这次上传的数据从哪里来"以及映射重试时需要重放的源数据

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 用户提交的列映射（自动推断失败时的手动指定）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date_column: Option<String>,
    pub revenue_column: Option<String>,
    pub category_column: Option<String>,
}

impl ColumnMapping {
    /// 是否指定了任何列
    pub fn is_empty(&self) -> bool {
        self.date_column.is_none()
            && self.revenue_column.is_none()
            && self.category_column.is_none()
    }
}

/// 上传数据源
///
/// 映射重试必须针对同一份源数据重放，因此文件字节在此保留
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// 本地文件（.csv / .xlsx / .xls）
    File { name: String, bytes: Vec<u8> },
    /// 已发布的 Google Sheet CSV 链接
    SheetUrl(String),
}

impl Display for UploadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadSource::File { name, bytes } => {
                write!(f, "[文件 {} ({} 字节)]", name, bytes.len())
            }
            UploadSource::SheetUrl(url) => write!(f, "[表格链接 {}]", url),
        }
    }
}

/// 触发一次上传的意图
#[derive(Debug, Clone)]
pub enum UploadIntent {
    /// 新选择的数据源
    Fresh(UploadSource),
    /// 映射重试：重放之前的数据源并附带手动映射
    Remap {
        source: UploadSource,
        mapping: ColumnMapping,
    },
}

impl UploadIntent {
    /// 意图对应的数据源
    pub fn source(&self) -> &UploadSource {
        match self {
            UploadIntent::Fresh(source) => source,
            UploadIntent::Remap { source, .. } => source,
        }
    }

    /// 意图携带的映射（仅 Remap 有）
    pub fn mapping(&self) -> Option<&ColumnMapping> {
        match self {
            UploadIntent::Fresh(_) => None,
            UploadIntent::Remap { mapping, .. } => Some(mapping),
        }
    }
}
