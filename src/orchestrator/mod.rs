//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是整个客户端的"指挥中心"：接收用户意图，按顺序驱动
//! 上传 → 映射回退 → 派生视图 → 解读 → 导出。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::DashboardSession (接收用户意图)
//!     ↓
//! workflow (每个槽位一个状态机：UploadFlow / NarrativeFlow / ExportFlow)
//!     ↓
//! services (能力层：filter_engine / mapping_resolver / report_saver)
//!     ↓
//! clients::InsightsClient (网络边界)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一写者**：AnalysisResult 只由上传流程写入，其余只读
//! 2. **槽位隔离**：上传 / 解读 / 导出各有独立的请求槽位，互不干扰
//! 3. **错误就地捕获**：每个流程的错误附着在自己的错误槽，不向上逃逸

pub mod session;

pub use session::DashboardSession;
