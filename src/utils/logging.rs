/// 日志工具模块
///
/// 提供日志初始化和仪表盘摘要输出的辅助函数
use crate::models::AnalysisResult;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 日志级别由 RUST_LOG 控制，未设置时默认 info
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
pub fn log_startup(api_base_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 Datasage 客户端启动");
    info!("🌐 Insights 服务: {}", api_base_url);
    info!("{}", "=".repeat(60));
}

/// 输出当前仪表盘摘要
///
/// # 参数
/// - `result`: 分析结果
/// - `narrative`: 当前展示的叙述（可能是解读覆盖文本）
pub fn log_dashboard(result: &AnalysisResult, narrative: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 仪表盘概览");
    info!("{}", "=".repeat(60));
    info!("💰 总收入: {:.2}", result.metrics.total_revenue);
    info!("💸 总成本: {:.2}", result.metrics.total_cost);
    info!("📈 净结果: {:.2}", result.metrics.net_result());
    info!("📅 日均收入: {:.2}", result.metrics.avg_daily_revenue);
    info!("📈 周环比: {:.1}%", result.metrics.weekly_growth_pct);
    info!("🗂 类目: {} 个", result.categories.len());

    for anomaly in &result.anomalies {
        info!(
            "⚠️ 异常 [{:?}] {}: {}",
            anomaly.severity(),
            anomaly.date,
            anomaly.message
        );
    }

    info!("📝 叙述: {}", truncate_text(narrative, 120));
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
    }
}
