//! 分析结果数据模型
//!
//! 与 Insights 服务的响应/请求体一一对应；字段名即线上 JSON 字段名

use serde::{Deserialize, Serialize};

/// 一次上传对应的完整分析结果
///
/// 只由成功的上传（或映射重试）产生；产生后不可变，
/// 新的上传整体替换旧结果，从不原地修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub schema: SchemaGuess,
    pub metrics: Metrics,
    pub timeseries: Vec<TimeSeriesPoint>,
    pub anomalies: Vec<Anomaly>,
    pub narrative: String,
    pub columns: Vec<String>,
    pub categories: Vec<CategoryBreakdown>,
}

/// 服务端推断出的列角色
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaGuess {
    pub date: Option<String>,
    pub revenue: Option<String>,
    pub cost: Option<String>,
    pub profit: Option<String>,
    pub product: Option<String>,
    pub qty: Option<String>,
}

/// 指标汇总（全部由服务端计算，客户端视为不透明数值）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    pub avg_daily_revenue: f64,
    pub weekly_growth_pct: f64,
    #[serde(default)]
    pub projections: Vec<f64>,
}

impl Metrics {
    /// 净结果 = 总收入 - 总成本
    pub fn net_result(&self) -> f64 {
        self.total_revenue - self.total_cost
    }
}

/// 时间序列点（ISO 日期字符串）
///
/// 序列由服务端按时间排好序，客户端只过滤、不重排
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub revenue: f64,
}

/// 异常点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: String,
    pub value: f64,
    pub z_score: f64,
    pub message: String,
}

/// 异常严重程度（由 z_score 推导，不在线上存储）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Moderate,
}

impl Anomaly {
    /// |z_score| >= 3 视为高严重度，否则为中等
    pub fn severity(&self) -> Severity {
        if self.z_score.abs() >= 3.0 {
            Severity::High
        } else {
            Severity::Moderate
        }
    }
}

/// 类目汇总（name 在单次结果内唯一）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub total: f64,
}

/// /explain 请求体
#[derive(Debug, Clone, Serialize)]
pub struct ExplainRequest {
    pub metrics: Metrics,
    pub anomalies: Vec<Anomaly>,
    pub categories: Vec<CategoryBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// /explain 响应体
#[derive(Debug, Clone, Deserialize)]
pub struct Explanation {
    pub explanation: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// /alerts/weekly-summary 响应体（status 字段仅在线上存在，展示时忽略）
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklySummary {
    #[serde(default)]
    pub status: String,
    pub summary: String,
}

/// /export/pdf 请求体
#[derive(Debug, Clone, Serialize)]
pub struct ExportPayload {
    pub metrics: Metrics,
    pub timeseries: Vec<TimeSeriesPoint>,
    pub categories: Vec<CategoryBreakdown>,
    pub anomalies: Vec<Anomaly>,
    pub narrative: String,
}
