//! Copy and download actions for individual result sections

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::formatter::{ReportGenerator, ReportView};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A section of the result that can be copied or downloaded on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    CoverLetter,
    TailoredResume,
    InterviewQuestions,
    Report,
}

impl Section {
    pub fn parse(name: &str) -> std::result::Result<Self, String> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "cover-letter" | "letter" => Ok(Section::CoverLetter),
            "tailored-resume" | "resume" | "tailoring" => Ok(Section::TailoredResume),
            "interview-questions" | "interview" | "questions" => Ok(Section::InterviewQuestions),
            "report" | "all" => Ok(Section::Report),
            _ => Err(format!(
                "Invalid section: {}. Supported: cover-letter, tailored-resume, interview-questions, report",
                name
            )),
        }
    }

    /// File name without timestamp; the report takes the output format's extension
    fn base_filename(&self, format: OutputFormat) -> String {
        match self {
            Section::CoverLetter => "cover_letter.txt".to_string(),
            Section::TailoredResume => "tailored_resume.txt".to_string(),
            Section::InterviewQuestions => "interview_questions.txt".to_string(),
            Section::Report => format!("analysis_report.{}", format.extension()),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::CoverLetter => "cover letter",
            Section::TailoredResume => "tailored resume",
            Section::InterviewQuestions => "interview questions",
            Section::Report => "report",
        };
        write!(f, "{}", name)
    }
}

/// Plain text of a single section. Fails when the payload lacks it.
pub fn section_text(section: Section, report: &ReportView) -> Result<String> {
    let data = report.data;
    let missing = || ResumeMatcherError::InvalidInput(format!("No {} in this analysis", section));

    match section {
        Section::CoverLetter => data
            .cover_letter
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .ok_or_else(missing),
        Section::TailoredResume => data
            .tailored_resume_text()
            .map(|t| t.trim().to_string())
            .ok_or_else(missing),
        Section::InterviewQuestions => {
            if data.interview_questions.is_empty() {
                return Err(missing());
            }
            Ok(data
                .interview_questions
                .iter()
                .enumerate()
                .map(|(i, q)| format!("{}. [{}] {} ({}, {})", i + 1, q.skill, q.question, q.difficulty, q.category))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Section::Report => ReportGenerator::default().generate_plain(report),
    }
}

/// File name for a download, optionally suffixed with a UTC timestamp
pub fn suggest_filename(section: Section, format: OutputFormat, timestamp: bool) -> String {
    let base = section.base_filename(format);
    if !timestamp {
        return base;
    }

    let path = Path::new(&base);
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = path.extension().unwrap_or_default().to_string_lossy();
    format!("{}_{}.{}", stem, chrono::Utc::now().format("%Y%m%d_%H%M%S"), ext)
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

/// Write a section into `dir`, returning the path written
pub fn download(
    section: Section,
    report: &ReportView,
    format: OutputFormat,
    dir: &Path,
    timestamp: bool,
) -> Result<PathBuf> {
    let content = match section {
        Section::Report => ReportGenerator::with_options(false, true, true, true).generate_report(report, &format)?,
        _ => section_text(section, report)?,
    };

    let path = dir.join(suggest_filename(section, format, timestamp));
    save_report_to_file(&content, &path)?;
    info!("Saved {} to {}", section, path.display());
    Ok(path)
}

/// How long the process keeps serving a copied selection on Linux
pub const CLIPBOARD_HOLD: Duration = Duration::from_secs(30);

/// Put `text` on the system clipboard.
///
/// X11 and Wayland only serve a selection while its owner is alive, so on
/// Linux this blocks until another application takes the clipboard over
/// (a clipboard manager does so at once) or `hold` runs out.
pub fn copy_to_clipboard(text: &str, hold: Duration) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        info!("Serving clipboard for up to {}s, paste it now", hold.as_secs());
        clipboard
            .set()
            .wait_until(std::time::Instant::now() + hold)
            .text(text.to_string())?;
    }

    #[cfg(not(target_os = "linux"))]
    {
        let _ = hold;
        clipboard.set_text(text.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::{AnalysisData, InterviewQuestion};
    use crate::output::view::Panel;

    fn sample_data() -> AnalysisData {
        AnalysisData {
            score: Some(72.0),
            cover_letter: Some("  Dear Hiring Manager,\n\nThanks.  ".to_string()),
            interview_questions: vec![InterviewQuestion {
                skill: "Docker".to_string(),
                question: "How do you keep images small?".to_string(),
                difficulty: "medium".to_string(),
                category: "Practical".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_section_parse() {
        assert_eq!(Section::parse("cover_letter").unwrap(), Section::CoverLetter);
        assert_eq!(Section::parse("Interview").unwrap(), Section::InterviewQuestions);
        assert!(Section::parse("sidebar").is_err());
    }

    #[test]
    fn test_section_text() {
        let data = sample_data();
        let view = ReportView::new(&data, &[Panel::Score]);

        assert_eq!(
            section_text(Section::CoverLetter, &view).unwrap(),
            "Dear Hiring Manager,\n\nThanks."
        );
        assert_eq!(
            section_text(Section::InterviewQuestions, &view).unwrap(),
            "1. [Docker] How do you keep images small? (medium, Practical)"
        );
        assert!(section_text(Section::Report, &view).unwrap().contains("Match Score: 72%"));
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let data = AnalysisData::default();
        let view = ReportView::new(&data, &[]);
        let err = section_text(Section::TailoredResume, &view).unwrap_err();
        assert_eq!(err.to_string(), "No tailored resume in this analysis");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(Section::CoverLetter, OutputFormat::Console, false), "cover_letter.txt");
        assert_eq!(suggest_filename(Section::Report, OutputFormat::Markdown, false), "analysis_report.md");

        let stamped = suggest_filename(Section::TailoredResume, OutputFormat::Console, true);
        assert!(stamped.starts_with("tailored_resume_"));
        assert!(stamped.ends_with(".txt"));
        assert_eq!(stamped.len(), "tailored_resume_YYYYmmdd_HHMMSS.txt".len());
    }

    #[test]
    fn test_download_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = sample_data();
        let panels = [Panel::Score];
        let view = ReportView::new(&data, &panels);

        let path = download(Section::CoverLetter, &view, OutputFormat::Console, dir.path(), false).unwrap();
        assert_eq!(path, dir.path().join("cover_letter.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Dear Hiring Manager,\n\nThanks.");

        let path = download(Section::Report, &view, OutputFormat::Json, dir.path(), false).unwrap();
        let saved: AnalysisData = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(saved.score, Some(72.0));
    }

    #[test]
    fn test_copied_text_stays_available_while_held() {
        let has_display = std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some();
        if !has_display {
            let err = copy_to_clipboard("Dear Hiring Manager,", Duration::ZERO);
            if let Err(e) = err {
                assert!(matches!(e, ResumeMatcherError::Clipboard(_)));
            }
            return;
        }

        let holder = std::thread::spawn(|| copy_to_clipboard("Dear Hiring Manager,", Duration::from_secs(2)));
        std::thread::sleep(Duration::from_millis(300));

        let pasted = arboard::Clipboard::new().and_then(|mut cb| cb.get_text()).unwrap();
        assert_eq!(pasted, "Dear Hiring Manager,");
        holder.join().unwrap().unwrap();
    }

    #[test]
    fn test_download_missing_section_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let data = AnalysisData::default();
        let view = ReportView::new(&data, &[]);

        assert!(download(Section::CoverLetter, &view, OutputFormat::Console, dir.path(), false).is_err());
        assert!(!dir.path().join("cover_letter.txt").exists());
    }
}
