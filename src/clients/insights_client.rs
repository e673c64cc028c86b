/// Insights 服务 API 客户端
///
/// 封装所有与 Insights 服务相关的调用逻辑；每个方法都是单次请求/响应交换，
/// 不在内部重试——重试策略属于调用方
use crate::config::Config;
use crate::error::{AppError, AppResult, InputError};
use crate::models::{
    AnalysisResult, ColumnMapping, Explanation, ExplainRequest, ExportPayload, UploadIntent,
    UploadSource, WeeklySummary,
};
use regex::Regex;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Insights API 客户端
///
/// 基础地址在构造时注入（来自配置），不依赖任何全局可变状态
pub struct InsightsClient {
    http: reqwest::Client,
    base_url: String,
}

impl InsightsClient {
    /// 创建新的 Insights 客户端
    ///
    /// 超时语义完全由传输层承担，编排层不再额外计时
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("HTTP客户端初始化失败: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 按意图分发上传请求
    pub async fn upload(&self, intent: &UploadIntent) -> AppResult<AnalysisResult> {
        match intent.source() {
            UploadSource::File { name, bytes } => {
                self.upload_file(name, bytes.clone(), intent.mapping()).await
            }
            UploadSource::SheetUrl(url) => self.import_sheet(url, intent.mapping()).await,
        }
    }

    /// 上传本地文件
    ///
    /// # 参数
    /// - `file_name`: 原始文件名（服务端据此区分 CSV / Excel）
    /// - `bytes`: 文件内容
    /// - `mapping`: 可选的手动列映射
    ///
    /// # 返回
    /// 返回完整的分析结果
    pub async fn upload_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mapping: Option<&ColumnMapping>,
    ) -> AppResult<AnalysisResult> {
        let endpoint = format!("{}/upload", self.base_url);
        debug!("上传文件: {} ({} 字节)", file_name, bytes.len());

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name.to_string()));

        if let Some(mapping) = mapping {
            if let Some(col) = &mapping.date_column {
                form = form.text("date_column", col.clone());
            }
            if let Some(col) = &mapping.revenue_column {
                form = form.text("revenue_column", col.clone());
            }
            if let Some(col) = &mapping.category_column {
                form = form.text("category_column", col.clone());
            }
        }

        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::transport_failed(&endpoint, e))?;

        self.read_json(&endpoint, response).await
    }

    /// 导入已发布的 Google Sheet CSV 链接
    ///
    /// 链接为空或不是 http(s) 链接时直接在本地失败，不发出请求
    pub async fn import_sheet(
        &self,
        url: &str,
        mapping: Option<&ColumnMapping>,
    ) -> AppResult<AnalysisResult> {
        if url.trim().is_empty() {
            return Err(AppError::Input(InputError::EmptySheetUrl));
        }
        if !looks_like_http_url(url.trim()) {
            return Err(AppError::Input(InputError::InvalidSheetUrl {
                url: url.to_string(),
            }));
        }

        let endpoint = format!("{}/integrations/google-sheets/import", self.base_url);
        debug!("导入表格链接: {}", url);

        let mut fields: Vec<(&str, String)> = vec![("sheet_csv_url", url.trim().to_string())];
        if let Some(mapping) = mapping {
            if let Some(col) = &mapping.date_column {
                fields.push(("date_column", col.clone()));
            }
            if let Some(col) = &mapping.revenue_column {
                fields.push(("revenue_column", col.clone()));
            }
            if let Some(col) = &mapping.category_column {
                fields.push(("category_column", col.clone()));
            }
        }

        let response = self
            .http
            .post(&endpoint)
            .form(&fields)
            .send()
            .await
            .map_err(|e| AppError::transport_failed(&endpoint, e))?;

        self.read_json(&endpoint, response).await
    }

    /// 请求当前区间的 AI 解读
    pub async fn explain(&self, request: &ExplainRequest) -> AppResult<Explanation> {
        let endpoint = format!("{}/explain", self.base_url);

        let response = self
            .http
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::transport_failed(&endpoint, e))?;

        self.read_json(&endpoint, response).await
    }

    /// 获取周报摘要
    ///
    /// 调用方按 best-effort 处理：失败时使用占位文案，从不视为致命错误
    pub async fn weekly_summary(&self) -> AppResult<WeeklySummary> {
        let endpoint = format!("{}/alerts/weekly-summary", self.base_url);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::transport_failed(&endpoint, e))?;

        self.read_json(&endpoint, response).await
    }

    /// 导出 PDF 报告，返回二进制内容
    pub async fn export_pdf(&self, payload: &ExportPayload) -> AppResult<Vec<u8>> {
        let endpoint = format!("{}/export/pdf", self.base_url);

        let response = self
            .http
            .post(&endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::transport_failed(&endpoint, e))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::classify_failure(&endpoint, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::transport_failed(&endpoint, e))?;

        debug!("PDF 导出完成: {} 字节", bytes.len());
        Ok(bytes.to_vec())
    }

    /// 服务健康检查
    pub async fn health(&self) -> AppResult<()> {
        let endpoint = format!("{}/health", self.base_url);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::transport_failed(&endpoint, e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::request_failed(
                &endpoint,
                format!("服务不可用 (HTTP {})", response.status()),
            ))
        }
    }

    /// 读取响应并解码为指定类型
    ///
    /// 非成功状态统一走失败分类；成功但解码失败归为 ParseFailed
    async fn read_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport_failed(endpoint, e))?;

        if !status.is_success() {
            return Err(Self::classify_failure(endpoint, &body));
        }

        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// 把非成功响应体归类为具体错误
    ///
    /// 响应体若是 JSON 且顶层或 detail 下带有 columns 数组，即为"需要手动映射"；
    /// 否则按通用请求失败处理，错误消息原样透出给用户
    fn classify_failure(endpoint: &str, body: &str) -> AppError {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            if let Some(columns) = extract_columns(&value) {
                return AppError::mapping_required(columns);
            }
            return AppError::request_failed(endpoint, extract_message(&value, body));
        }

        AppError::request_failed(endpoint, body.to_string())
    }
}

/// 从错误响应体中提取可选列列表
///
/// FastAPI 会把错误负载包在 detail 字段下，所以顶层和 detail 都要找
fn extract_columns(value: &Value) -> Option<Vec<String>> {
    let columns = value
        .get("columns")
        .or_else(|| value.get("detail").and_then(|d| d.get("columns")))?
        .as_array()?;

    Some(
        columns
            .iter()
            .filter_map(|c| c.as_str().map(String::from))
            .collect(),
    )
}

/// 从错误响应体中提取人类可读的错误消息
fn extract_message(value: &Value, raw: &str) -> String {
    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return message.to_string();
    }
    if let Some(detail) = value.get("detail") {
        if let Some(message) = detail.as_str() {
            return message.to_string();
        }
        if let Some(message) = detail.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    raw.to_string()
}

/// 粗略校验是否是 http(s) 链接
fn looks_like_http_url(url: &str) -> bool {
    Regex::new(r"^https?://\S+$")
        .map(|re| re.is_match(url))
        .unwrap_or(false)
}
