//! Client for the remote analysis endpoint

pub mod api;
pub mod request;

pub use api::{AnalysisClient, ResponseEnvelope};
pub use request::AnalysisRequest;
