//! PDF 报告落盘服务 - 业务能力层
//!
//! 只负责"把导出的 PDF 字节写到本地"能力，不关心导出流程

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 报告保存时使用的固定文件名
pub const REPORT_FILE_NAME: &str = "datasage-summary.pdf";

/// PDF 报告写入服务
///
/// 职责：
/// - 把导出成功的 PDF 字节写入下载目录，文件名固定
/// - 失败时不留下半成品文件
pub struct ReportSaver {
    download_dir: PathBuf,
}

impl ReportSaver {
    /// 使用指定下载目录创建
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: dir.into(),
        }
    }

    /// 目标文件完整路径
    pub fn target_path(&self) -> PathBuf {
        self.download_dir.join(REPORT_FILE_NAME)
    }

    /// 写入 PDF 字节
    ///
    /// # 参数
    /// - `bytes`: PDF 内容
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub async fn save(&self, bytes: &[u8]) -> AppResult<PathBuf> {
        let path = self.target_path();
        debug!("写入 PDF 报告: {} ({} 字节)", path.display(), bytes.len());

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        Ok(path)
    }
}

impl Default for ReportSaver {
    fn default() -> Self {
        Self::with_dir(Path::new("."))
    }
}
