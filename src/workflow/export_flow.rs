//! 导出流程 - 流程层
//!
//! 管理 PDF 导出请求的生命周期：组装导出负载（指标、完整时间序列、
//! 类目、异常、当前展示的叙述），失败时只更新错误槽、不落盘任何半成品。
//! 不做重试，每次导出都是全新请求

use crate::error::AppResult;
use crate::models::{AnalysisResult, ExportPayload};
use crate::workflow::slot::{RequestId, RequestSlot};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// 导出流程
pub struct ExportFlow {
    downloading: bool,
    error: Option<String>,
    last_saved: Option<PathBuf>,
    slot: RequestSlot,
}

impl ExportFlow {
    pub fn new() -> Self {
        Self {
            downloading: false,
            error: None,
            last_saved: None,
            slot: RequestSlot::new(),
        }
    }

    /// 是否有导出请求在途
    pub fn downloading(&self) -> bool {
        self.downloading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 最近一次成功保存的报告路径
    pub fn last_saved(&self) -> Option<&PathBuf> {
        self.last_saved.as_ref()
    }

    /// 组装导出负载
    ///
    /// 时间序列取完整序列（过滤只影响屏幕视图）；
    /// 叙述优先取解读覆盖文本，否则取服务端默认叙述
    pub fn build_payload(
        result: &AnalysisResult,
        narrative_override: Option<&str>,
    ) -> ExportPayload {
        ExportPayload {
            metrics: result.metrics.clone(),
            timeseries: result.timeseries.clone(),
            categories: result.categories.clone(),
            anomalies: result.anomalies.clone(),
            narrative: narrative_override
                .unwrap_or(result.narrative.as_str())
                .to_string(),
        }
    }

    /// 发起一次导出
    pub fn begin(&mut self) -> RequestId {
        self.downloading = true;
        info!("📄 开始导出 PDF 报告...");
        self.slot.issue()
    }

    /// 应用一次导出完成（成功时携带落盘路径）
    pub fn complete(&mut self, id: RequestId, outcome: AppResult<PathBuf>) -> bool {
        if !self.slot.is_latest(id) {
            debug!("丢弃过期的导出完成: {:?}", id);
            return false;
        }
        self.downloading = false;

        match outcome {
            Ok(path) => {
                info!("✓ PDF 报告已保存: {}", path.display());
                self.last_saved = Some(path);
                self.error = None;
            }
            Err(err) => {
                warn!("⚠️ PDF 导出失败: {}", err);
                self.error = Some(err.user_message());
            }
        }
        true
    }
}

impl Default for ExportFlow {
    fn default() -> Self {
        Self::new()
    }
}
