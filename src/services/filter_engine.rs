//! 派生视图过滤 - 业务能力层
//!
//! 对当前分析结果做纯函数投影：只读输入、产出新序列，
//! 不修改结果本身，也没有任何副作用

use crate::models::{CategoryBreakdown, CategoryFilter, DateRange, TimeSeriesPoint};
use chrono::{Duration, Local, NaiveDate};

/// 按日期范围过滤时间序列
///
/// All 时返回与输入相同的序列；Days(n) 时保留日历日期 >= 今天 - n 天的点。
/// 序列顺序由服务端保证，这里只过滤、不重排
pub fn filter_timeseries(points: &[TimeSeriesPoint], range: &DateRange) -> Vec<TimeSeriesPoint> {
    filter_timeseries_at(points, range, Local::now().date_naive())
}

/// 以指定"今天"为基准过滤（便于确定性测试）
pub(crate) fn filter_timeseries_at(
    points: &[TimeSeriesPoint],
    range: &DateRange,
    today: NaiveDate,
) -> Vec<TimeSeriesPoint> {
    let days = match range {
        DateRange::All => return points.to_vec(),
        DateRange::Days(days) => *days,
    };

    let cutoff = today - Duration::days(i64::from(days));

    points
        .iter()
        .filter(|p| {
            // 日期无法解析的点视为不在范围内
            parse_point_date(&p.date)
                .map(|date| date >= cutoff)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// 按类目过滤类目汇总
///
/// All 时恒等；指定类目名时做精确（区分大小写）匹配，
/// 没有命中时返回空序列而不是错误
pub fn filter_categories(
    categories: &[CategoryBreakdown],
    filter: &CategoryFilter,
) -> Vec<CategoryBreakdown> {
    match filter {
        CategoryFilter::All => categories.to_vec(),
        CategoryFilter::Name(name) => categories
            .iter()
            .filter(|c| &c.name == name)
            .cloned()
            .collect(),
    }
}

/// 解析时间序列点的日期（ISO 日期，允许带时间后缀）
fn parse_point_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, revenue: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            date: date.to_string(),
            revenue,
        }
    }

    fn category(name: &str, total: f64) -> CategoryBreakdown {
        CategoryBreakdown {
            name: name.to_string(),
            total,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("测试日期非法")
    }

    #[test]
    fn test_filter_all_is_identity() {
        let points = vec![point("2025-01-01", 10.0), point("2025-06-01", 20.0)];
        let filtered = filter_timeseries_at(&points, &DateRange::All, today());
        assert_eq!(filtered, points);
    }

    #[test]
    fn test_filter_30_days_keeps_recent_points() {
        // 规格场景：45 / 20 / 5 天前的点，30 天过滤应只留后两个
        let points = vec![
            point("2025-05-01", 10.0), // 45 天前
            point("2025-05-26", 20.0), // 20 天前
            point("2025-06-10", 30.0), // 5 天前
        ];
        let filtered = filter_timeseries_at(&points, &DateRange::Days(30), today());
        assert_eq!(filtered, vec![point("2025-05-26", 20.0), point("2025-06-10", 30.0)]);
    }

    #[test]
    fn test_filter_preserves_order_as_subsequence() {
        let points = vec![
            point("2025-06-01", 1.0),
            point("2025-04-01", 2.0),
            point("2025-06-10", 3.0),
        ];
        let filtered = filter_timeseries_at(&points, &DateRange::Days(90), today());
        // 原序列的子序列，顺序不变
        assert_eq!(filtered, vec![point("2025-06-01", 1.0), point("2025-06-10", 3.0)]);
    }

    #[test]
    fn test_filter_drops_unparseable_dates() {
        let points = vec![point("不是日期", 1.0), point("2025-06-10", 2.0)];
        let filtered = filter_timeseries_at(&points, &DateRange::Days(30), today());
        assert_eq!(filtered, vec![point("2025-06-10", 2.0)]);
    }

    #[test]
    fn test_filter_accepts_datetime_suffix() {
        let points = vec![point("2025-06-10T00:00:00", 2.0)];
        let filtered = filter_timeseries_at(&points, &DateRange::Days(30), today());
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let points = vec![point("2025-05-26", 1.0), point("2025-06-10", 2.0)];
        let once = filter_timeseries_at(&points, &DateRange::Days(30), today());
        let twice = filter_timeseries_at(&once, &DateRange::Days(30), today());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_empty_match_returns_empty() {
        let points = vec![point("2020-01-01", 1.0)];
        let filtered = filter_timeseries_at(&points, &DateRange::Days(30), today());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_categories_all_is_identity() {
        let categories = vec![category("Alpha", 1.0), category("Bravo", 2.0)];
        assert_eq!(
            filter_categories(&categories, &CategoryFilter::All),
            categories
        );
    }

    #[test]
    fn test_filter_categories_exact_match() {
        let categories = vec![category("Alpha", 1.0), category("Bravo", 2.0)];
        let filtered = filter_categories(
            &categories,
            &CategoryFilter::Name("Alpha".to_string()),
        );
        assert_eq!(filtered, vec![category("Alpha", 1.0)]);

        // 大小写敏感，不做部分匹配
        let filtered = filter_categories(
            &categories,
            &CategoryFilter::Name("alpha".to_string()),
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_categories_missing_name_returns_empty() {
        let categories = vec![category("Alpha", 1.0)];
        let filtered = filter_categories(
            &categories,
            &CategoryFilter::Name("Zulu".to_string()),
        );
        assert!(filtered.is_empty());
    }
}
