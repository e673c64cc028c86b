//! 过滤器模型
//!
//! 仅存在于界面会话期间的瞬时状态，不做任何持久化

/// 日期范围过滤（界面提供 all / 30 / 90）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateRange {
    All,
    Days(u32),
}

impl DateRange {
    /// 解析界面传入的取值，无法识别时回落为 All
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => DateRange::All,
            other => other
                .parse::<u32>()
                .map(DateRange::Days)
                .unwrap_or(DateRange::All),
        }
    }
}

/// 类目过滤（all 或精确类目名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Name(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => CategoryFilter::All,
            name => CategoryFilter::Name(name.to_string()),
        }
    }
}

/// 当前生效的过滤器组合
#[derive(Debug, Clone)]
pub struct Filters {
    pub date_range: DateRange,
    pub category: CategoryFilter,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            date_range: DateRange::All,
            category: CategoryFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_parse() {
        assert_eq!(DateRange::parse("all"), DateRange::All);
        assert_eq!(DateRange::parse("30"), DateRange::Days(30));
        assert_eq!(DateRange::parse("90"), DateRange::Days(90));
        // 无法识别的取值回落为 All
        assert_eq!(DateRange::parse("abc"), DateRange::All);
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Alpha"),
            CategoryFilter::Name("Alpha".to_string())
        );
    }
}
