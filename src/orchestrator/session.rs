//! 仪表盘会话 - 编排层
//!
//! 接收用户意图（选择文件 / 提交链接 / 提交映射 / 改过滤器 / 请求解读 /
//! 请求导出），驱动各流程走到下一个可展示状态。
//! 所有错误都在发起请求的流程边界被捕获并附着到该流程的错误槽，
//! 不允许任何错误逃逸到宿主运行时

use crate::clients::InsightsClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{
    AnalysisResult, CategoryBreakdown, CategoryFilter, ColumnMapping, DateRange, ExplainRequest,
    Filters, TimeSeriesPoint, UploadIntent, UploadSource,
};
use crate::services::{filter_categories, filter_timeseries, ReportSaver};
use crate::workflow::{ExportFlow, NarrativeFlow, UploadFlow, UploadPhase};
use std::path::PathBuf;
use tracing::{debug, warn};

/// 仪表盘会话
///
/// - 独占持有 InsightsClient 和三个流程（上传 / 解读 / 导出）
/// - 每个共享状态只由其所属流程写入，其余只读
/// - 过滤器是会话内瞬时状态，不持久化
pub struct DashboardSession {
    client: InsightsClient,
    upload: UploadFlow,
    narrative: NarrativeFlow,
    export: ExportFlow,
    filters: Filters,
    report_saver: ReportSaver,
    weekly_summary: Option<String>,
    weekly_placeholder: String,
}

impl DashboardSession {
    /// 创建新的仪表盘会话
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            client: InsightsClient::new(config)?,
            upload: UploadFlow::new(),
            narrative: NarrativeFlow::new(),
            export: ExportFlow::new(),
            filters: Filters::default(),
            report_saver: ReportSaver::with_dir(&config.download_dir),
            weekly_summary: None,
            weekly_placeholder: config.weekly_summary_placeholder.clone(),
        })
    }

    // ========== 用户意图 ==========

    /// 用户选择了本地文件（.csv / .xlsx / .xls）
    pub async fn submit_file(&mut self, file_name: &str, bytes: Vec<u8>) {
        self.dispatch(UploadIntent::Fresh(UploadSource::File {
            name: file_name.to_string(),
            bytes,
        }))
        .await;
    }

    /// 用户提交了 Google Sheet CSV 链接
    pub async fn submit_sheet_url(&mut self, url: &str) {
        self.dispatch(UploadIntent::Fresh(UploadSource::SheetUrl(url.to_string())))
            .await;
    }

    /// 用户在映射表单中提交了列映射
    ///
    /// 没有待重放数据源时本地拒绝（正常流程到不了这里），不发请求
    pub async fn submit_mapping(&mut self, mapping: ColumnMapping) {
        match self.upload.submit_mapping(mapping) {
            Some(intent) => self.dispatch(intent).await,
            None => warn!("没有待重放的数据源，忽略这次映射提交"),
        }
    }

    /// 统一的上传分发：签发请求身份 → 网络交换 → 应用完成
    ///
    /// 每次上传都清除解读覆盖文本（新数据回到服务端默认叙述）
    async fn dispatch(&mut self, intent: UploadIntent) {
        self.narrative.clear_override();
        let id = self.upload.begin(&intent);
        let outcome = self.client.upload(&intent).await;
        self.upload.complete(id, outcome);
    }

    /// 请求 AI 解读当前（过滤后）区间
    ///
    /// 没有分析结果时是无操作
    pub async fn explain_current_period(&mut self) {
        let request = match self.upload.result() {
            Some(result) => ExplainRequest {
                metrics: result.metrics.clone(),
                anomalies: result.anomalies.clone(),
                categories: result.categories.clone(),
                period: Some(NarrativeFlow::period_label(&self.filtered_series())),
            },
            None => {
                debug!("没有分析结果，忽略解读请求");
                return;
            }
        };

        let id = self.narrative.begin();
        let outcome = self.client.explain(&request).await;
        self.narrative.complete(id, outcome);
    }

    /// 导出 PDF 报告并落盘
    ///
    /// 没有分析结果时不发出任何请求（调用方可见的无操作）
    pub async fn export_pdf(&mut self) {
        let payload = match self.upload.result() {
            Some(result) => ExportFlow::build_payload(result, self.narrative.narrative_override()),
            None => {
                debug!("没有分析结果，忽略导出请求");
                return;
            }
        };

        let id = self.export.begin();
        let outcome = match self.client.export_pdf(&payload).await {
            Ok(bytes) => self.report_saver.save(&bytes).await,
            Err(err) => Err(err),
        };
        self.export.complete(id, outcome);
    }

    /// 刷新周报摘要（best-effort：失败时继续用占位文案，不上报错误）
    pub async fn refresh_weekly_summary(&mut self) {
        match self.client.weekly_summary().await {
            Ok(weekly) => self.weekly_summary = Some(weekly.summary),
            Err(err) => debug!("周报摘要获取失败，继续使用占位文案: {}", err),
        }
    }

    // ========== 过滤器 ==========

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filters.date_range = range;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filters.category = category;
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    // ========== 可展示状态 ==========

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.upload.result()
    }

    pub fn upload_phase(&self) -> UploadPhase {
        self.upload.phase()
    }

    pub fn upload_error(&self) -> Option<&str> {
        self.upload.error()
    }

    pub fn awaiting_mapping(&self) -> bool {
        self.upload.awaiting_mapping()
    }

    /// 映射表单可选列
    pub fn available_columns(&self) -> &[String] {
        self.upload.available_columns()
    }

    /// 进度指示：1 = 等待数据, 2 = 上传中, 3 = 已有结果
    pub fn progress_step(&self) -> u8 {
        self.upload.progress_step()
    }

    /// 过滤后的时间序列（结果或过滤器每次变化都重新计算）
    pub fn filtered_series(&self) -> Vec<TimeSeriesPoint> {
        match self.upload.result() {
            Some(result) => filter_timeseries(&result.timeseries, &self.filters.date_range),
            None => Vec::new(),
        }
    }

    /// 过滤后的类目汇总
    pub fn filtered_categories(&self) -> Vec<CategoryBreakdown> {
        match self.upload.result() {
            Some(result) => filter_categories(&result.categories, &self.filters.category),
            None => Vec::new(),
        }
    }

    /// 展示用叙述：解读覆盖文本优先于服务端默认叙述
    pub fn display_narrative(&self) -> &str {
        let fallback = self
            .upload
            .result()
            .map(|r| r.narrative.as_str())
            .unwrap_or("");
        self.narrative.display_narrative(fallback)
    }

    pub fn narrative_tags(&self) -> &[String] {
        self.narrative.tags()
    }

    pub fn narrative_error(&self) -> Option<&str> {
        self.narrative.error()
    }

    /// 是否有解读请求在途（界面用于加载指示）
    pub fn explaining(&self) -> bool {
        self.narrative.pending()
    }

    /// 是否有导出请求在途
    pub fn downloading(&self) -> bool {
        self.export.downloading()
    }

    pub fn export_error(&self) -> Option<&str> {
        self.export.error()
    }

    /// 最近一次导出的报告路径
    pub fn last_report(&self) -> Option<&PathBuf> {
        self.export.last_saved()
    }

    /// 周报摘要文案（未获取到时用占位文案）
    pub fn weekly_summary(&self) -> &str {
        self.weekly_summary
            .as_deref()
            .unwrap_or(&self.weekly_placeholder)
    }
}
