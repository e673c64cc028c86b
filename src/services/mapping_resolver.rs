//! 列映射重试服务 - 业务能力层
//!
//! 负责"服务端无法自动推断列"之后的手动映射重试循环：
//! 记住本次上传的数据源，等用户提交映射后构造重放意图

use crate::models::{ColumnMapping, UploadIntent, UploadSource};
use tracing::debug;

/// 映射重试状态
///
/// 职责：
/// - 记录最近一次上传的数据源（文件或链接）
/// - 在收到"需要手动映射"错误后进入待映射状态并保存可选列
/// - 把用户提交的映射和保存的数据源组合成重放意图
#[derive(Debug, Default)]
pub struct MappingResolver {
    awaiting: bool,
    columns: Vec<String>,
    pending_source: Option<UploadSource>,
}

impl MappingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否处于等待用户映射的状态
    pub fn awaiting_mapping(&self) -> bool {
        self.awaiting
    }

    /// 服务端返回的可选列列表（映射表单据此渲染）
    pub fn available_columns(&self) -> &[String] {
        &self.columns
    }

    /// 记录本次上传的数据源，供之后的映射重试重放
    pub fn remember_source(&mut self, source: UploadSource) {
        self.pending_source = Some(source);
    }

    /// 进入待映射状态
    pub fn arm(&mut self, columns: Vec<String>) {
        debug!("进入待映射状态，可选列: {:?}", columns);
        self.awaiting = true;
        self.columns = columns;
    }

    /// 上传成功后解除待映射状态
    pub fn disarm(&mut self) {
        self.awaiting = false;
        self.columns.clear();
    }

    /// 用提交的映射构造重放意图
    ///
    /// 没有保存的数据源时返回 None（防御性守卫，正常流程到不了这里），
    /// 此时不发出任何请求。待映射标志乐观清除——若重试仍返回
    /// "需要手动映射"，会被再次置位
    pub fn build_retry(&mut self, mapping: ColumnMapping) -> Option<UploadIntent> {
        let source = self.pending_source.clone()?;
        self.awaiting = false;
        Some(UploadIntent::Remap { source, mapping })
    }
}
