//! Analysis result structures as returned by the analysis endpoint
//!
//! Every field is optional on the wire. Missing fields fall back to their
//! defaults so a partial payload still renders.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The `data` object of a successful analysis response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisData {
    /// Match percentage (0-100), possibly fractional
    pub score: Option<f64>,

    #[serde(deserialize_with = "null_default")]
    pub jd_skills: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub resume_skills: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub matched_skills: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub missing_skills: Vec<String>,

    #[serde(deserialize_with = "null_default")]
    pub upskilling_plan: Vec<PlanItem>,
    pub cover_letter: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub interview_questions: Vec<InterviewQuestion>,
    #[serde(deserialize_with = "null_default")]
    pub formatting_tips: Vec<FormattingTip>,
    pub company_insights: Option<CompanyInsights>,
    pub tailoring_data: Option<TailoringData>,
    pub improved_resume: Option<String>,
}

impl AnalysisData {
    pub fn has_cover_letter(&self) -> bool {
        self.cover_letter.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Tailored resume text, preferring the tailoring workbench output
    pub fn tailored_resume_text(&self) -> Option<&str> {
        self.tailoring_data
            .as_ref()
            .map(|t| t.tailored_resume.as_str())
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.improved_resume.as_deref().filter(|t| !t.trim().is_empty()))
    }
}

/// One course recommendation for a missing skill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanItem {
    #[serde(deserialize_with = "null_default")]
    pub skill: String,
    #[serde(deserialize_with = "null_default")]
    pub course_name: String,
    #[serde(deserialize_with = "null_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_default")]
    pub link: String,
    #[serde(deserialize_with = "null_default")]
    pub practice_task: String,
    #[serde(deserialize_with = "null_default")]
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewQuestion {
    #[serde(deserialize_with = "null_default")]
    pub skill: String,
    #[serde(deserialize_with = "null_default")]
    pub question: String,
    #[serde(deserialize_with = "null_default")]
    pub difficulty: String,
    #[serde(deserialize_with = "null_default")]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingTip {
    #[serde(deserialize_with = "null_default")]
    pub category: String,
    #[serde(deserialize_with = "null_default")]
    pub severity: Severity,
    #[serde(deserialize_with = "null_default")]
    pub issue: String,
    #[serde(deserialize_with = "null_default")]
    pub suggestion: String,
    /// Icon hint from the server; not rendered on the console
    #[serde(deserialize_with = "null_default")]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    High,
    #[default]
    Medium,
    Low,
    Success,
    Other(String),
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            "success" => Severity::Success,
            _ => Severity::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
            Severity::Success => write!(f, "success"),
            Severity::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInsights {
    #[serde(deserialize_with = "null_default")]
    pub company_info: CompanyInfo,
    #[serde(deserialize_with = "null_default")]
    pub culture_signals: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub insights: RoleInsights,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub company_name: Option<String>,
    pub role_title: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleInsights {
    #[serde(deserialize_with = "null_default")]
    pub company_overview: String,
    #[serde(deserialize_with = "null_default")]
    pub role_focus: String,
    #[serde(deserialize_with = "null_default")]
    pub what_to_emphasize: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub application_tips: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub estimated_salary_range: String,
    #[serde(deserialize_with = "null_default")]
    pub career_path: String,
    #[serde(deserialize_with = "null_default")]
    pub red_flags: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub green_flags: Vec<String>,
}

/// Tailoring workbench output: original vs tailored resume and what changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailoringData {
    #[serde(deserialize_with = "null_default")]
    pub original_resume: String,
    #[serde(deserialize_with = "null_default")]
    pub tailored_resume: String,
    #[serde(deserialize_with = "null_default")]
    pub suggestions: Vec<TailoringSuggestion>,
    #[serde(deserialize_with = "null_default")]
    pub modifications: Vec<Modification>,
    #[serde(deserialize_with = "null_default")]
    pub highlights: Vec<Highlight>,
    #[serde(deserialize_with = "null_default")]
    pub improvement_summary: ImprovementSummary,
    #[serde(deserialize_with = "null_default")]
    pub resume_sections: BTreeMap<String, SectionSpan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailoringSuggestion {
    #[serde(deserialize_with = "null_default")]
    pub skill: String,
    #[serde(deserialize_with = "null_default")]
    pub section: String,
    #[serde(deserialize_with = "null_default")]
    pub action: String,
    #[serde(deserialize_with = "null_default")]
    pub location: String,
    #[serde(deserialize_with = "null_default")]
    pub suggestion: String,
    #[serde(deserialize_with = "null_default")]
    pub priority: String,
    pub line_number: Option<usize>,
    pub original_line: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modification {
    #[serde(deserialize_with = "null_default")]
    pub line: usize,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub skills: Vec<String>,
    pub skill: Option<String>,
    pub original: Option<String>,
    pub enhanced: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    #[serde(deserialize_with = "null_default")]
    pub line_number: usize,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "null_default")]
    pub kind: String,
    pub position: Option<usize>,
    pub text: Option<String>,
    pub original: Option<String>,
    pub new: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovementSummary {
    #[serde(deserialize_with = "null_default")]
    pub skills_added: usize,
    #[serde(deserialize_with = "null_default")]
    pub lines_enhanced: usize,
    #[serde(deserialize_with = "null_default")]
    pub total_changes: usize,
    #[serde(deserialize_with = "null_default")]
    pub coverage_improvement: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSpan {
    #[serde(deserialize_with = "null_default")]
    pub start: usize,
    #[serde(deserialize_with = "null_default")]
    pub end: usize,
    #[serde(deserialize_with = "null_default")]
    pub line_count: usize,
}

/// Treat an explicit `null` like a missing field
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
