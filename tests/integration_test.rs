use datasage_client::models::{CategoryFilter, ColumnMapping, DateRange};
use datasage_client::utils::logging;
use datasage_client::{Config, DashboardSession, InsightsClient, UploadPhase};

/// 生成一份结构清晰的测试 CSV（服务端应能自动推断列）
fn sample_csv() -> Vec<u8> {
    let mut csv = String::from("Date,Amount,Category\n");
    for day in 1..=30 {
        csv.push_str(&format!(
            "2025-06-{:02},{},{}\n",
            day,
            1000 + day * 10,
            if day % 2 == 0 { "Alpha" } else { "Bravo" }
        ));
    }
    csv.into_bytes()
}

/// 生成一份列名无法自动识别的 CSV（服务端应要求手动映射）
fn ambiguous_csv() -> Vec<u8> {
    b"c1,c2\n2025-06-01,100\n2025-06-02,120\n".to_vec()
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_full_dashboard_flow() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    let mut session = DashboardSession::new(&config).expect("创建会话失败");

    // 上传 → 应得到完整的分析结果
    session.submit_file("sample.csv", sample_csv()).await;
    assert_eq!(session.upload_phase(), UploadPhase::Ready, "上传应该成功");
    assert_eq!(session.progress_step(), 3);

    let result = session.result().expect("应有分析结果");
    assert!(!result.columns.is_empty());
    assert!(!result.timeseries.is_empty());

    // 过滤器只影响派生视图，不改变结果本身
    let total_points = result.timeseries.len();
    session.set_date_range(DateRange::Days(30));
    assert!(session.filtered_series().len() <= total_points);
    session.set_category(CategoryFilter::Name("Alpha".to_string()));
    assert!(session.filtered_categories().len() <= 1);

    // 解读当前区间 → 叙述覆盖生效
    session.explain_current_period().await;
    assert!(
        session.narrative_error().is_none(),
        "解读应该成功: {:?}",
        session.narrative_error()
    );
    assert!(!session.display_narrative().is_empty());

    // 导出 PDF → 落盘
    session.export_pdf().await;
    assert!(
        session.export_error().is_none(),
        "导出应该成功: {:?}",
        session.export_error()
    );
    let report = session.last_report().expect("应有报告路径");
    assert!(report.exists());
}

#[tokio::test]
#[ignore]
async fn test_mapping_retry_flow() {
    logging::init();

    let config = Config::from_env();
    let mut session = DashboardSession::new(&config).expect("创建会话失败");

    // 列名无法识别 → 进入待映射状态，旧结果不受影响
    session.submit_file("ambiguous.csv", ambiguous_csv()).await;
    assert!(session.awaiting_mapping(), "应该要求手动映射");
    assert!(!session.available_columns().is_empty());

    // 提交映射 → 重放同一份文件 → 成功
    let mapping = ColumnMapping {
        date_column: Some("c1".to_string()),
        revenue_column: Some("c2".to_string()),
        category_column: None,
    };
    session.submit_mapping(mapping).await;
    assert_eq!(session.upload_phase(), UploadPhase::Ready, "映射重试应该成功");
    assert!(!session.awaiting_mapping());
}

#[tokio::test]
#[ignore]
async fn test_health_and_weekly_summary() {
    logging::init();

    let config = Config::from_env();
    let client = InsightsClient::new(&config).expect("创建客户端失败");

    tokio_test::assert_ok!(client.health().await, "服务应该可用");

    // 周报摘要是 best-effort，这里只验证成功路径能解析
    let weekly = client.weekly_summary().await.expect("获取周报摘要失败");
    assert!(!weekly.summary.is_empty());
}

#[tokio::test]
async fn test_invalid_sheet_url_fails_locally() {
    // 纯本地路径：不需要服务在线
    logging::init();

    let config = Config::from_env();
    let mut session = DashboardSession::new(&config).expect("创建会话失败");

    // 空链接在本地被拒绝并附着错误，不发请求
    session.submit_sheet_url("").await;
    assert!(session.upload_error().is_some());
    assert_eq!(session.upload_phase(), UploadPhase::Idle);
    assert!(session.result().is_none());
}
