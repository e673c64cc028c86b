use anyhow::{Context, Result};
use datasage_client::utils::logging;
use datasage_client::{Config, DashboardSession, InsightsClient};
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置（datasage.toml 为基底，环境变量覆盖）
    let config = Config::load().await;
    logging::log_startup(&config.api_base_url);

    // 待上传的文件路径来自命令行
    let Some(file_path) = std::env::args().nth(1) else {
        warn!("用法: datasage-client <文件路径 .csv/.xlsx/.xls>");
        return Ok(());
    };
    let path = Path::new(&file_path);

    // 健康检查与文件读取并发进行
    let client = InsightsClient::new(&config)?;
    let (health, bytes) = futures::join!(client.health(), tokio::fs::read(path));
    health.context("Insights 服务健康检查失败")?;
    let bytes = bytes.with_context(|| format!("读取文件失败: {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.csv".to_string());

    // 创建会话并走完整流程：上传 → 仪表盘 → 解读 → 导出
    let mut session = DashboardSession::new(&config)?;
    session.refresh_weekly_summary().await;
    session.submit_file(&file_name, bytes).await;

    if session.awaiting_mapping() {
        warn!(
            "⚠️ 服务无法自动推断列，请指定映射后重试。可选列: {}",
            session.available_columns().join(", ")
        );
        return Ok(());
    }
    if let Some(message) = session.upload_error() {
        warn!("⚠️ 上传失败: {}", message);
        return Ok(());
    }

    if let Some(result) = session.result() {
        logging::log_dashboard(result, session.display_narrative());
    }
    info!("🗞 周报摘要: {}", session.weekly_summary());

    // AI 解读当前区间
    session.explain_current_period().await;
    match session.narrative_error() {
        Some(message) => warn!("⚠️ 解读失败: {}", message),
        None => {
            info!("🧠 AI 解读: {}", session.display_narrative());
            info!("🏷 标签: {}", session.narrative_tags().join(" / "));
        }
    }

    // 导出 PDF 报告
    session.export_pdf().await;
    match (session.last_report(), session.export_error()) {
        (Some(report), _) => info!("📄 报告已保存: {}", report.display()),
        (None, Some(message)) => warn!("⚠️ 导出失败: {}", message),
        (None, None) => {}
    }

    Ok(())
}
