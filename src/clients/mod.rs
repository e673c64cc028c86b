pub mod insights_client;

pub use insights_client::InsightsClient;
