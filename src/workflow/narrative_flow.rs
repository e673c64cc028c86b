//! 解读流程 - 流程层
//!
//! 管理"解释当前区间"请求的生命周期，独立于主上传流程：
//! 成功后得到的解读文本覆盖服务端默认叙述（展示与导出都优先用它），
//! 失败时保留已有覆盖文本，只更新错误槽

use crate::error::AppResult;
use crate::models::{Explanation, TimeSeriesPoint};
use crate::workflow::slot::{RequestId, RequestSlot};
use tracing::{debug, info, warn};

/// 解读流程
pub struct NarrativeFlow {
    explanation: Option<String>,
    tags: Vec<String>,
    error: Option<String>,
    pending: bool,
    slot: RequestSlot,
}

impl NarrativeFlow {
    pub fn new() -> Self {
        Self {
            explanation: None,
            tags: Vec::new(),
            error: None,
            pending: false,
            slot: RequestSlot::new(),
        }
    }

    /// 是否有解读请求在途
    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 解读标签（无覆盖文本时为空）
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// 展示用叙述：有覆盖文本时优先于服务端默认叙述
    pub fn display_narrative<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.explanation.as_deref().unwrap_or(fallback)
    }

    /// 当前覆盖文本（导出时同样优先使用）
    pub fn narrative_override(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// 计算区间标签：当前过滤后序列首尾日期的闭区间
    ///
    /// 序列为空时两端都是空串（退化为 " to "，不报错）
    pub fn period_label(filtered: &[TimeSeriesPoint]) -> String {
        let first = filtered.first().map(|p| p.date.as_str()).unwrap_or("");
        let last = filtered.last().map(|p| p.date.as_str()).unwrap_or("");
        format!("{} to {}", first, last)
    }

    /// 发起一次解读请求
    ///
    /// 同一时刻只有最新一次有意义：解读路径除展示外没有顺序敏感的副作用
    pub fn begin(&mut self) -> RequestId {
        self.pending = true;
        info!("🔍 请求 AI 解读当前区间...");
        self.slot.issue()
    }

    /// 应用一次解读完成
    pub fn complete(&mut self, id: RequestId, outcome: AppResult<Explanation>) -> bool {
        if !self.slot.is_latest(id) {
            debug!("丢弃过期的解读完成: {:?}", id);
            return false;
        }
        self.pending = false;

        match outcome {
            Ok(explanation) => {
                info!("✓ 解读完成，标签: {:?}", explanation.tags);
                self.explanation = Some(explanation.explanation);
                self.tags = explanation.tags;
                self.error = None;
            }
            Err(err) => {
                warn!("⚠️ 解读失败: {}", err);
                // 失败不丢弃已有的覆盖文本
                self.error = Some(err.user_message());
            }
        }
        true
    }

    /// 新上传时清除覆盖文本（新数据回到服务端默认叙述）
    pub fn clear_override(&mut self) {
        self.explanation = None;
        self.tags.clear();
    }
}

impl Default for NarrativeFlow {
    fn default() -> Self {
        Self::new()
    }
}
