pub mod analysis;
pub mod filters;
pub mod intent;

pub use analysis::{
    AnalysisResult, Anomaly, CategoryBreakdown, Explanation, ExplainRequest, ExportPayload,
    Metrics, SchemaGuess, Severity, TimeSeriesPoint, WeeklySummary,
};
pub use filters::{CategoryFilter, DateRange, Filters};
pub use intent::{ColumnMapping, UploadIntent, UploadSource};
