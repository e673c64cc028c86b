//! 流程层（Workflow Layer）
//!
//! 每个流程对应一个独立的并发槽位（上传 / 解读 / 导出），
//! 以显式状态 + 请求身份管理异步生命周期：
//! `begin()` 在网络调用前签发请求身份，`complete()` 在调用返回后应用结果，
//! 迟到的过期完成被丢弃——这条规则等价于单线程模型下的"锁"

pub mod export_flow;
pub mod narrative_flow;
pub mod slot;
pub mod upload_flow;

pub use export_flow::ExportFlow;
pub use narrative_flow::NarrativeFlow;
pub use slot::{RequestId, RequestSlot};
pub use upload_flow::{UploadFlow, UploadPhase};
