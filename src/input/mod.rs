//! Input processing module
//! Collects the two form fields, detects file types, and extracts text

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::{FieldPayload, FieldSource, FileUpload, FormState, InputManager};
