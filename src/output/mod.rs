//! Output module
//! Renders analysis results and handles per-section copy and download

pub mod actions;
pub mod diff;
pub mod formatter;
pub mod report;
pub mod score;
pub mod view;

pub use actions::Section;
pub use formatter::{OutputFormatter, ReportGenerator, ReportView};
pub use report::AnalysisData;
pub use view::{Panel, Tab, TabSelection, ViewState};
