pub mod filter_engine;
pub mod mapping_resolver;
pub mod report_saver;

pub use filter_engine::{filter_categories, filter_timeseries};
pub use mapping_resolver::MappingResolver;
pub use report_saver::ReportSaver;
