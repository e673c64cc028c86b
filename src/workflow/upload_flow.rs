//! 上传流程 - 流程层
//!
//! 核心职责：以显式状态机管理"上传 → 映射回退 → 出结果"的完整生命周期
//!
//! 状态：Idle → Uploading → Ready，Uploading 可分支到 AwaitingMapping，
//! 映射提交后回到 Uploading。Error 不是独立状态，而是附着在可见状态上的
//! 属性（上传失败后回到 Idle/Ready，同时携带可展示的错误消息）

use crate::error::AppResult;
use crate::models::{AnalysisResult, ColumnMapping, UploadIntent};
use crate::services::MappingResolver;
use crate::workflow::slot::{RequestId, RequestSlot};
use tracing::{debug, info, warn};

/// 上传状态机的阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// 尚无数据，也没有请求在途
    Idle,
    /// 有上传请求在途
    Uploading,
    /// 等待用户提交列映射
    AwaitingMapping,
    /// 已有分析结果
    Ready,
}

/// 上传流程
///
/// - 独占持有当前的分析结果：新结果整体替换旧结果
/// - 在途的新上传会作废旧结果但不删除（刷新期间仪表盘继续展示旧数据）
/// - 槽位保证迟到的过期响应不会覆盖更新请求的结果
pub struct UploadFlow {
    phase: UploadPhase,
    result: Option<AnalysisResult>,
    error: Option<String>,
    resolver: MappingResolver,
    slot: RequestSlot,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self {
            phase: UploadPhase::Idle,
            result: None,
            error: None,
            resolver: MappingResolver::new(),
            slot: RequestSlot::new(),
        }
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// 当前的分析结果（上传失败或映射回退期间仍保留旧结果）
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// 附着在当前状态上的错误消息
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn awaiting_mapping(&self) -> bool {
        self.resolver.awaiting_mapping()
    }

    /// 映射表单可选列（等待映射时非空）
    pub fn available_columns(&self) -> &[String] {
        self.resolver.available_columns()
    }

    /// 发起一次上传，返回本次请求身份
    ///
    /// 清除旧错误；新鲜意图会记录数据源供映射重试重放。
    /// 解读覆盖文本由会话层在调用本方法的同时清除
    pub fn begin(&mut self, intent: &UploadIntent) -> RequestId {
        self.error = None;
        if let UploadIntent::Fresh(source) = intent {
            self.resolver.remember_source(source.clone());
        }
        self.phase = UploadPhase::Uploading;
        let id = self.slot.issue();
        info!("📤 开始上传 {}", intent.source());
        id
    }

    /// 应用一次上传完成
    ///
    /// 过期完成（id 已不是槽内最新）被原样丢弃并返回 false。
    /// 从 Uploading 出发只有三种结局：Ready（成功）、AwaitingMapping
    /// （需要映射）、回到 Idle/Ready 并携带错误消息
    pub fn complete(&mut self, id: RequestId, outcome: AppResult<AnalysisResult>) -> bool {
        if !self.slot.is_latest(id) {
            debug!("丢弃过期的上传完成: {:?}", id);
            return false;
        }

        match outcome {
            Ok(result) => {
                info!(
                    "✓ 上传成功: {} 列, {} 个时间点, {} 个异常",
                    result.columns.len(),
                    result.timeseries.len(),
                    result.anomalies.len()
                );
                self.result = Some(result);
                self.phase = UploadPhase::Ready;
                self.resolver.disarm();
                self.error = None;
            }
            Err(err) => {
                if let Some(columns) = err.mapping_columns() {
                    // 可恢复：进入映射回退，不算终态错误，旧结果继续展示
                    info!("需要手动映射，可选列 {} 个", columns.len());
                    self.resolver.arm(columns.to_vec());
                    self.phase = UploadPhase::AwaitingMapping;
                } else {
                    warn!("⚠️ 上传失败: {}", err);
                    self.error = Some(err.user_message());
                    // 回到尝试前的状态，数据不变
                    self.phase = if self.result.is_some() {
                        UploadPhase::Ready
                    } else {
                        UploadPhase::Idle
                    };
                }
            }
        }
        true
    }

    /// 用户提交列映射，构造重放意图
    ///
    /// 没有待重放数据源时返回 None（防御性守卫，不发请求）
    pub fn submit_mapping(&mut self, mapping: ColumnMapping) -> Option<UploadIntent> {
        self.resolver.build_retry(mapping)
    }

    /// 进度指示：1 = 等待数据, 2 = 上传中, 3 = 已有结果
    ///
    /// 纯状态函数；新的上传意图总会回到 2
    pub fn progress_step(&self) -> u8 {
        if self.phase == UploadPhase::Uploading {
            2
        } else if self.result.is_some() {
            3
        } else {
            1
        }
    }
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Metrics, SchemaGuess, UploadSource};

    fn file_intent() -> UploadIntent {
        UploadIntent::Fresh(UploadSource::File {
            name: "sales.csv".to_string(),
            bytes: b"Date,Amount\n2025-01-01,10".to_vec(),
        })
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            schema: SchemaGuess::default(),
            metrics: Metrics {
                total_revenue: 84200.0,
                total_cost: 61800.0,
                total_profit: 22400.0,
                avg_daily_revenue: 1200.0,
                weekly_growth_pct: 12.0,
                projections: vec![1.0],
            },
            timeseries: Vec::new(),
            anomalies: Vec::new(),
            narrative: "默认叙述".to_string(),
            columns: vec!["Date".to_string(), "Amount".to_string(), "Region".to_string()],
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_success_reaches_ready() {
        let mut flow = UploadFlow::new();
        assert_eq!(flow.progress_step(), 1);

        let id = flow.begin(&file_intent());
        assert_eq!(flow.phase(), UploadPhase::Uploading);
        assert_eq!(flow.progress_step(), 2);

        assert!(flow.complete(id, Ok(sample_result())));
        assert_eq!(flow.phase(), UploadPhase::Ready);
        assert_eq!(flow.progress_step(), 3);
        assert!(flow.error().is_none());

        // 规格场景：净结果 = 84200 - 61800
        let result = flow.result().expect("应有结果");
        assert_eq!(result.metrics.net_result(), 22400.0);
        assert_eq!(result.columns.len(), 3);
    }

    #[test]
    fn test_mapping_required_reaches_awaiting_mapping() {
        let mut flow = UploadFlow::new();
        let id = flow.begin(&file_intent());

        let err = AppError::mapping_required(vec!["Date".to_string(), "Amount".to_string()]);
        assert!(flow.complete(id, Err(err)));

        assert_eq!(flow.phase(), UploadPhase::AwaitingMapping);
        assert!(flow.awaiting_mapping());
        assert_eq!(flow.available_columns(), ["Date", "Amount"]);
        // 映射回退不是终态错误
        assert!(flow.error().is_none());
    }

    #[test]
    fn test_failure_without_data_returns_to_idle() {
        let mut flow = UploadFlow::new();
        let id = flow.begin(&file_intent());

        let err = AppError::request_failed("/upload", "上传服务暂不可用");
        assert!(flow.complete(id, Err(err)));

        assert_eq!(flow.phase(), UploadPhase::Idle);
        assert_eq!(flow.error(), Some("上传服务暂不可用"));
        assert!(flow.result().is_none());
    }

    #[test]
    fn test_failure_with_data_returns_to_ready() {
        let mut flow = UploadFlow::new();
        let id = flow.begin(&file_intent());
        flow.complete(id, Ok(sample_result()));

        // 第二次上传失败：回到 Ready，旧数据不变
        let id = flow.begin(&file_intent());
        flow.complete(id, Err(AppError::request_failed("/upload", "网络超时")));

        assert_eq!(flow.phase(), UploadPhase::Ready);
        assert_eq!(flow.error(), Some("网络超时"));
        assert!(flow.result().is_some());
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut flow = UploadFlow::new();

        // 先发起 A，再发起 B；A 迟到完成必须被丢弃
        let id_a = flow.begin(&file_intent());
        let id_b = flow.begin(&file_intent());

        let mut result_b = sample_result();
        result_b.narrative = "B 的结果".to_string();
        assert!(flow.complete(id_b, Ok(result_b)));

        let mut result_a = sample_result();
        result_a.narrative = "A 的结果".to_string();
        assert!(!flow.complete(id_a, Ok(result_a)));

        assert_eq!(
            flow.result().map(|r| r.narrative.as_str()),
            Some("B 的结果")
        );
        assert_eq!(flow.phase(), UploadPhase::Ready);
    }

    #[test]
    fn test_stale_failure_does_not_clobber_success() {
        let mut flow = UploadFlow::new();
        let id_a = flow.begin(&file_intent());
        let id_b = flow.begin(&file_intent());

        flow.complete(id_b, Ok(sample_result()));
        // A 的失败迟到，不应污染 B 的成功状态
        assert!(!flow.complete(id_a, Err(AppError::request_failed("/upload", "慢请求失败"))));

        assert_eq!(flow.phase(), UploadPhase::Ready);
        assert!(flow.error().is_none());
    }

    #[test]
    fn test_mapping_retry_replays_same_source() {
        let mut flow = UploadFlow::new();
        let id = flow.begin(&file_intent());
        flow.complete(
            id,
            Err(AppError::mapping_required(vec![
                "Date".to_string(),
                "Amount".to_string(),
            ])),
        );

        let mapping = ColumnMapping {
            date_column: Some("Date".to_string()),
            revenue_column: Some("Amount".to_string()),
            category_column: None,
        };
        let intent = flow.submit_mapping(mapping).expect("应构造出重放意图");

        // 重放同一份文件并携带映射
        match intent.source() {
            UploadSource::File { name, .. } => assert_eq!(name, "sales.csv"),
            other => panic!("数据源类型不对: {}", other),
        }
        assert!(intent.mapping().is_some());

        // 重试回到 Uploading
        flow.begin(&intent);
        assert_eq!(flow.phase(), UploadPhase::Uploading);
    }

    #[test]
    fn test_mapping_submission_without_source_is_noop() {
        let mut flow = UploadFlow::new();
        assert!(flow.submit_mapping(ColumnMapping::default()).is_none());
    }

    #[test]
    fn test_mapping_required_keeps_previous_result_visible() {
        let mut flow = UploadFlow::new();
        let id = flow.begin(&file_intent());
        flow.complete(id, Ok(sample_result()));

        let id = flow.begin(&file_intent());
        flow.complete(id, Err(AppError::mapping_required(vec!["Date".to_string()])));

        assert_eq!(flow.phase(), UploadPhase::AwaitingMapping);
        // 旧仪表盘继续可见
        assert!(flow.result().is_some());
        assert_eq!(flow.progress_step(), 3);
    }

    #[test]
    fn test_new_upload_clears_previous_error() {
        let mut flow = UploadFlow::new();
        let id = flow.begin(&file_intent());
        flow.complete(id, Err(AppError::request_failed("/upload", "第一次失败")));
        assert!(flow.error().is_some());

        flow.begin(&file_intent());
        assert!(flow.error().is_none());
    }
}
