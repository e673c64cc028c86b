//! # Datasage Client
//!
//! 表格分析工具的客户端编排层：用户上传 CSV/Excel 文件或 Google Sheet
//! 链接，远端 Insights 服务推断业务结构并计算指标，客户端把结果驱动成
//! 可展示的仪表盘状态（KPI、时间序列、类目、异常、AI 解读、PDF 导出）
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 网络边界层（Clients）
//! - `clients/` - 与 Insights 服务的类型化请求/响应边界
//! - `InsightsClient` - 上传、映射重试、解读、周报摘要、PDF 导出
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，无流程知识
//! - `filter_engine` - 对当前结果做纯函数投影（日期范围 / 类目）
//! - `MappingResolver` - 列映射重试循环
//! - `ReportSaver` - PDF 报告落盘能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 每个并发槽位一个显式状态机
//! - `UploadFlow` - Idle → Uploading → Ready（可分支 AwaitingMapping）
//! - `NarrativeFlow` - 解读生命周期与叙述覆盖
//! - `ExportFlow` - 导出生命周期
//! - `RequestSlot` - 请求身份，丢弃迟到的过期完成
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session` - 仪表盘会话，接收用户意图并组合各流程
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::InsightsClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    AnalysisResult, ColumnMapping, Filters, UploadIntent, UploadSource,
};
pub use orchestrator::DashboardSession;
pub use workflow::{UploadFlow, UploadPhase};
