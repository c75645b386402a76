//! Output formatters: console, JSON, Markdown and HTML renderings of an analysis

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::diff::{diff_stats, line_diff, DiffLine};
use crate::output::report::*;
use crate::output::score::{format_score, ScoreBand};
use crate::output::view::Panel;
use askama::Template;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use unicode_segmentation::UnicodeSegmentation;

pub const NO_MATCHED_SKILLS: &str = "No direct matches found";
pub const NO_MISSING_SKILLS: &str = "No missing skills detected!";
pub const NO_UPSKILLING_NEEDED: &str = "No upskilling needed. You are a great fit!";
pub const NO_INTERVIEW_QUESTIONS: &str = "No interview questions generated.";
pub const NO_FORMATTING_TIPS: &str = "No formatting tips. Your resume looks good!";
pub const NO_COVER_LETTER: &str = "No cover letter was generated.";
pub const NO_COMPANY_INSIGHTS: &str = "No company insights available.";
pub const NO_TAILORED_RESUME: &str = "No tailored resume available.";

const SUGGESTION_PREVIEW_GRAPHEMES: usize = 72;

/// What gets rendered: the payload plus the panels currently visible
pub struct ReportView<'a> {
    pub data: &'a AnalysisData,
    pub panels: &'a [Panel],
    pub generated_at: DateTime<Utc>,
}

impl<'a> ReportView<'a> {
    pub fn new(data: &'a AnalysisData, panels: &'a [Panel]) -> Self {
        Self {
            data,
            panels,
            generated_at: Utc::now(),
        }
    }

    fn shows(&self, panel: Panel) -> bool {
        self.panels.contains(&panel)
    }

    fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, view: &ReportView) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for notes and sharing
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with embedded styling
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Truncate on grapheme boundaries, appending an ellipsis when cut
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        text.to_string()
    } else {
        format!("{}...", graphemes[..max_graphemes].concat().trim_end())
    }
}

fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn indent_block(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let band = ScoreBand::from_score(score);
        if self.use_colors {
            format!("[{}]", band.label().color(band.color()).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    fn format_severity_icon(&self, severity: &Severity) -> String {
        let (icon, text_icon) = match severity {
            Severity::High => ("🚨", "[!]"),
            Severity::Medium => ("⚠️", "[*]"),
            Severity::Low => ("💡", "[-]"),
            Severity::Success => ("✅", "[+]"),
            Severity::Other(_) => ("📋", "[?]"),
        };

        if self.use_colors {
            format!("{} ", icon)
        } else {
            format!("{} ", text_icon)
        }
    }

    fn empty_state(&self, message: &str) -> String {
        format!("  {}\n", self.colorize(message, Color::BrightBlack))
    }

    fn format_skill_list(&self, skills: &[String], empty: &str, color: Color) -> String {
        if skills.is_empty() {
            return self.empty_state(empty);
        }
        skills
            .iter()
            .map(|skill| format!("  • {}\n", self.colorize(skill, color)))
            .collect()
    }

    fn format_score_panel(&self, data: &AnalysisData) -> String {
        let mut output = self.format_header("🎯 Match Score", 2);
        match data.score {
            Some(score) => output.push_str(&format!(
                "Match Score: {}% {}\n",
                self.colorize(&format_score(Some(score)), ScoreBand::from_score(score).color()),
                self.format_score_badge(score)
            )),
            None => output.push_str(&format!("Match Score: {}\n", format_score(None))),
        }
        output
    }

    fn format_plan(&self, plan: &[PlanItem]) -> String {
        let mut output = self.format_header("🚀 Upskilling Plan", 2);
        if plan.is_empty() {
            output.push_str(&self.empty_state(NO_UPSKILLING_NEEDED));
            return output;
        }

        for (i, item) in plan.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, self.colorize(&item.skill, Color::White)));
            output.push_str(&format!("   Course: {}\n", item.course_name));
            output.push_str(&format!("   Task:   {}\n", item.practice_task));
            let mut meta = format!("   ⏱ {}", item.timeline);
            if !item.link.is_empty() {
                meta.push_str(&format!(" | View Course → {}", self.colorize(&item.link, Color::Cyan)));
            }
            output.push_str(&meta);
            output.push_str("\n\n");
        }
        output
    }

    fn format_cover_letter(&self, data: &AnalysisData) -> String {
        let mut output = self.format_header("💌 Cover Letter", 2);
        match data.cover_letter.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(letter) => {
                output.push_str(&indent_block(letter.trim(), "  "));
                output.push('\n');
            }
            None => output.push_str(&self.empty_state(NO_COVER_LETTER)),
        }
        output
    }

    fn format_interview(&self, questions: &[InterviewQuestion]) -> String {
        let mut output = self.format_header("🎤 Interview Questions", 2);
        if questions.is_empty() {
            output.push_str(&self.empty_state(NO_INTERVIEW_QUESTIONS));
            return output;
        }

        for (i, q) in questions.iter().enumerate() {
            let tags = [title_case(&q.difficulty), q.category.clone()]
                .into_iter()
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" · ");
            output.push_str(&format!(
                "{}. {} {}\n",
                i + 1,
                self.colorize(&q.skill, Color::White),
                self.colorize(&format!("({})", tags), Color::BrightBlack)
            ));
            output.push_str(&format!("   {}\n\n", q.question));
        }
        output
    }

    fn format_tips(&self, tips: &[FormattingTip]) -> String {
        let mut output = self.format_header("🧾 Formatting Tips", 2);
        if tips.is_empty() {
            output.push_str(&self.empty_state(NO_FORMATTING_TIPS));
            return output;
        }

        for tip in tips {
            let color = match tip.severity {
                Severity::High => Color::Red,
                Severity::Medium => Color::Yellow,
                Severity::Low => Color::Blue,
                Severity::Success => Color::Green,
                Severity::Other(_) => Color::White,
            };
            output.push_str(&format!(
                "{}{} {}\n",
                self.format_severity_icon(&tip.severity),
                self.colorize(&tip.issue, color),
                self.colorize(&format!("({} · {})", tip.category, tip.severity), Color::BrightBlack)
            ));
            output.push_str(&format!("   {}\n\n", tip.suggestion));
        }
        output
    }

    fn format_bullets(&self, title: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        let mut output = format!("{}\n", self.colorize(title, Color::Cyan));
        for item in items {
            output.push_str(&format!("  • {}\n", item));
        }
        output
    }

    fn format_insights(&self, insights: Option<&CompanyInsights>) -> String {
        let mut output = self.format_header("🏢 Company Insights", 2);
        let Some(insights) = insights else {
            output.push_str(&self.empty_state(NO_COMPANY_INSIGHTS));
            return output;
        };

        let info = &insights.company_info;
        let facts = [
            ("Company", &info.company_name),
            ("Role", &info.role_title),
            ("Size", &info.company_size),
            ("Industry", &info.industry),
            ("Location", &info.location),
        ];
        for (label, value) in facts {
            if let Some(value) = value {
                output.push_str(&format!("{}: {}\n", self.colorize(label, Color::Cyan), value));
            }
        }

        let role = &insights.insights;
        if !role.company_overview.is_empty() {
            output.push_str(&format!("\n{}\n", role.company_overview));
        }
        if !role.role_focus.is_empty() {
            output.push_str(&format!("{}\n", role.role_focus));
        }
        output.push('\n');

        if !insights.culture_signals.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("Culture:", Color::Cyan),
                insights.culture_signals.join(", ")
            ));
        }
        output.push_str(&self.format_bullets("What to emphasize:", &role.what_to_emphasize));
        output.push_str(&self.format_bullets("Application tips:", &role.application_tips));
        if !role.estimated_salary_range.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("Estimated salary:", Color::Cyan),
                role.estimated_salary_range
            ));
        }
        if !role.career_path.is_empty() {
            output.push_str(&format!("{} {}\n", self.colorize("Career path:", Color::Cyan), role.career_path));
        }
        output.push_str(&self.format_bullets("Red flags:", &role.red_flags));
        output.push_str(&self.format_bullets("Green flags:", &role.green_flags));
        output
    }

    fn format_tailoring(&self, data: &AnalysisData) -> String {
        let mut output = self.format_header("✂️  Tailored Resume", 2);

        let Some(tailored) = data.tailored_resume_text() else {
            output.push_str(&self.empty_state(NO_TAILORED_RESUME));
            return output;
        };

        let original = data
            .tailoring_data
            .as_ref()
            .map(|t| t.original_resume.as_str())
            .filter(|o| !o.trim().is_empty());

        if let Some(tailoring) = &data.tailoring_data {
            let summary = &tailoring.improvement_summary;
            output.push_str(&format!(
                "Skills added: {} | Lines enhanced: {} | Total changes: {}",
                summary.skills_added, summary.lines_enhanced, summary.total_changes
            ));
            if !summary.coverage_improvement.is_empty() {
                output.push_str(&format!(
                    " | Coverage: {}",
                    self.colorize(&summary.coverage_improvement, Color::Green)
                ));
            }
            output.push_str("\n\n");

            if !tailoring.suggestions.is_empty() {
                output.push_str(&self.format_header("Suggestions", 3));
                for s in &tailoring.suggestions {
                    output.push_str(&format!(
                        "  • [{}] {} {}\n",
                        s.priority,
                        truncate_text(&s.suggestion, SUGGESTION_PREVIEW_GRAPHEMES),
                        self.colorize(&format!("({})", s.location), Color::BrightBlack)
                    ));
                }
            }
        }

        match original {
            Some(original) => {
                let lines = line_diff(original, tailored);
                let stats = diff_stats(&lines);
                output.push_str(&self.format_header(
                    &format!("Comparison (+{} / -{})", stats.added, stats.removed),
                    3,
                ));
                for line in &lines {
                    let rendered = format!("{} {}", line.marker(), line.text());
                    let rendered = match line {
                        DiffLine::Added(_) => self.colorize(&rendered, Color::Green),
                        DiffLine::Removed(_) => self.colorize(&rendered, Color::Red),
                        DiffLine::Same(_) => rendered,
                    };
                    output.push_str(&rendered);
                    output.push('\n');
                }
            }
            None => {
                output.push_str(&indent_block(tailored.trim(), "  "));
                output.push('\n');
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, view: &ReportView) -> Result<String> {
        let data = view.data;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!("Generated: {}\n", view.timestamp()));

        for panel in view.panels {
            let section = match panel {
                Panel::Score => self.format_score_panel(data),
                Panel::MatchedSkills => format!(
                    "{}{}",
                    self.format_header("✅ Matched Skills", 2),
                    self.format_skill_list(&data.matched_skills, NO_MATCHED_SKILLS, Color::Green)
                ),
                Panel::MissingSkills => format!(
                    "{}{}",
                    self.format_header("⚠️  Missing Skills", 2),
                    self.format_skill_list(&data.missing_skills, NO_MISSING_SKILLS, Color::Yellow)
                ),
                Panel::UpskillingPlan => self.format_plan(&data.upskilling_plan),
                Panel::CoverLetter => self.format_cover_letter(data),
                Panel::InterviewQuestions => self.format_interview(&data.interview_questions),
                Panel::FormattingTips => self.format_tips(&data.formatting_tips),
                Panel::CompanyInsights => self.format_insights(data.company_insights.as_ref()),
                Panel::Tailoring => self.format_tailoring(data),
            };
            output.push_str(&section);
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Matcher v{}\n",
            self.colorize("ℹ️", Color::Blue),
            env!("CARGO_PKG_VERSION")
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, view: &ReportView) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(view.data)?)
        } else {
            Ok(serde_json::to_string(view.data)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_list(items: &[String], empty: &str) -> String {
        if items.is_empty() {
            format!("_{}_\n\n", empty)
        } else {
            let mut out: String = items.iter().map(|i| format!("- {}\n", i)).collect();
            out.push('\n');
            out
        }
    }

    /// Keep server text on one table row: escape pipes, flatten newlines
    fn table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace("\r\n", " ").replace(['\r', '\n'], " ")
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match ScoreBand::from_score(score) {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Good => "🟡 Good",
            ScoreBand::Fair => "🟠 Fair",
            ScoreBand::Poor => "🔴 Poor",
        }
    }

    fn format_insights(output: &mut String, insights: &CompanyInsights) {
        let info = &insights.company_info;
        for (label, value) in [
            ("Company", &info.company_name),
            ("Role", &info.role_title),
            ("Size", &info.company_size),
            ("Industry", &info.industry),
            ("Location", &info.location),
        ] {
            if let Some(value) = value {
                output.push_str(&format!("- **{}:** {}\n", label, value));
            }
        }
        output.push('\n');

        let role = &insights.insights;
        if !role.company_overview.is_empty() {
            output.push_str(&format!("{}\n\n", role.company_overview));
        }
        if !role.role_focus.is_empty() {
            output.push_str(&format!("{}\n\n", role.role_focus));
        }
        if !insights.culture_signals.is_empty() {
            output.push_str(&format!("**Culture:** {}\n\n", insights.culture_signals.join(", ")));
        }
        for (title, items) in [
            ("What to emphasize", &role.what_to_emphasize),
            ("Application tips", &role.application_tips),
            ("Red flags", &role.red_flags),
            ("Green flags", &role.green_flags),
        ] {
            if !items.is_empty() {
                output.push_str(&format!("#### {}\n\n", title));
                output.push_str(&Self::markdown_list(items, ""));
            }
        }
        if !role.estimated_salary_range.is_empty() {
            output.push_str(&format!("**Estimated salary:** {}\n\n", role.estimated_salary_range));
        }
        if !role.career_path.is_empty() {
            output.push_str(&format!("**Career path:** {}\n\n", role.career_path));
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, view: &ReportView) -> Result<String> {
        let data = view.data;
        let mut output = String::new();

        output.push_str("# 📊 Resume Match Analysis\n\n");
        if self.include_metadata {
            output.push_str(&format!("**Generated:** {}\n\n", view.timestamp()));
        }

        if view.shows(Panel::Score) {
            output.push_str("## 🎯 Match Score\n\n");
            match data.score {
                Some(score) => output.push_str(&format!(
                    "**{}%** {}\n\n",
                    format_score(Some(score)),
                    Self::markdown_score_badge(score)
                )),
                None => output.push_str("**N/A**\n\n"),
            }
        }

        if view.shows(Panel::MatchedSkills) {
            output.push_str("## ✅ Matched Skills\n\n");
            output.push_str(&Self::markdown_list(&data.matched_skills, NO_MATCHED_SKILLS));
        }

        if view.shows(Panel::MissingSkills) {
            output.push_str("## ⚠️ Missing Skills\n\n");
            output.push_str(&Self::markdown_list(&data.missing_skills, NO_MISSING_SKILLS));
        }

        if view.shows(Panel::UpskillingPlan) {
            output.push_str("## 🚀 Upskilling Plan\n\n");
            if data.upskilling_plan.is_empty() {
                output.push_str(&format!("_{}_\n\n", NO_UPSKILLING_NEEDED));
            } else {
                output.push_str("| Skill | Course | Task | Timeline |\n");
                output.push_str("|-------|--------|------|----------|\n");
                for item in &data.upskilling_plan {
                    output.push_str(&format!(
                        "| {} | [{}]({}) | {} | ⏱ {} |\n",
                        Self::table_cell(&item.skill),
                        Self::table_cell(&item.course_name),
                        Self::table_cell(&item.link),
                        Self::table_cell(&item.practice_task),
                        Self::table_cell(&item.timeline)
                    ));
                }
                output.push('\n');
            }
        }

        if view.shows(Panel::CoverLetter) {
            output.push_str("## 💌 Cover Letter\n\n");
            match data.cover_letter.as_deref().filter(|c| !c.trim().is_empty()) {
                Some(letter) => {
                    for line in letter.trim().lines() {
                        output.push_str(&format!("> {}\n", line));
                    }
                    output.push('\n');
                }
                None => output.push_str(&format!("_{}_\n\n", NO_COVER_LETTER)),
            }
        }

        if view.shows(Panel::InterviewQuestions) {
            output.push_str("## 🎤 Interview Questions\n\n");
            if data.interview_questions.is_empty() {
                output.push_str(&format!("_{}_\n\n", NO_INTERVIEW_QUESTIONS));
            } else {
                for (i, q) in data.interview_questions.iter().enumerate() {
                    output.push_str(&format!(
                        "{}. **{}** ({}, {}): {}\n",
                        i + 1,
                        q.skill,
                        title_case(&q.difficulty),
                        q.category,
                        q.question
                    ));
                }
                output.push('\n');
            }
        }

        if view.shows(Panel::FormattingTips) {
            output.push_str("## 🧾 Formatting Tips\n\n");
            if data.formatting_tips.is_empty() {
                output.push_str(&format!("_{}_\n\n", NO_FORMATTING_TIPS));
            } else {
                for tip in &data.formatting_tips {
                    output.push_str(&format!(
                        "- **{}** ({}, {}): {}\n",
                        tip.issue, tip.category, tip.severity, tip.suggestion
                    ));
                }
                output.push('\n');
            }
        }

        if view.shows(Panel::CompanyInsights) {
            output.push_str("## 🏢 Company Insights\n\n");
            match &data.company_insights {
                Some(insights) => Self::format_insights(&mut output, insights),
                None => output.push_str(&format!("_{}_\n\n", NO_COMPANY_INSIGHTS)),
            }
        }

        if view.shows(Panel::Tailoring) {
            output.push_str("## ✂️ Tailored Resume\n\n");
            match data.tailored_resume_text() {
                Some(tailored) => {
                    let original = data
                        .tailoring_data
                        .as_ref()
                        .map(|t| t.original_resume.as_str())
                        .filter(|o| !o.trim().is_empty());
                    match original {
                        Some(original) => {
                            output.push_str("```diff\n");
                            for line in line_diff(original, tailored) {
                                output.push_str(&format!("{}{}\n", line.marker(), line.text()));
                            }
                            output.push_str("```\n\n");
                        }
                        None => output.push_str(&format!("```\n{}\n```\n\n", tailored.trim())),
                    }
                }
                None => output.push_str(&format!("_{}_\n\n", NO_TAILORED_RESUME)),
            }
        }

        output.push_str("---\n\n");
        output.push_str(&format!("*Generated by Resume Matcher v{}*\n", env!("CARGO_PKG_VERSION")));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

struct HtmlDiffLine {
    class: &'static str,
    marker: char,
    text: String,
}

struct HtmlQuestion {
    skill: String,
    tags: String,
    question: String,
}

struct HtmlTip {
    severity_class: String,
    issue: String,
    category: String,
    suggestion: String,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Analysis</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .plan-item { display: flex; justify-content: space-between; background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 6px; border-left: 4px solid #007acc; }
        .empty { color: #6c757d; font-style: italic; }
        .tip { padding: 10px 15px; margin: 8px 0; border-radius: 6px; border-left: 4px solid #17a2b8; background: #f8f9fa; }
        .severity-high { border-left-color: #dc3545; }
        .severity-medium { border-left-color: #ffc107; }
        .severity-low { border-left-color: #17a2b8; }
        .severity-success { border-left-color: #28a745; }
        .letter { white-space: pre-wrap; background: #f8f9fa; padding: 20px; border-radius: 6px; }
        .diff { font-family: monospace; white-space: pre-wrap; background: #f8f9fa; padding: 15px; border-radius: 6px; }
        .diff .added { background: #e6ffed; }
        .diff .removed { background: #ffeef0; text-decoration: line-through; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>📊 Resume Match Analysis</h1>
            <p>Generated: {{ generated_at }}</p>
        </div>
        {% if show_score %}
        <div class="section">
            <h2>🎯 Match Score</h2>
            <h3>{{ score_text }}{% if has_score %}% <span class="score-badge {{ score_class }}">{{ score_label }}</span>{% endif %}</h3>
        </div>
        {% endif %}
        {% if show_matched %}
        <div class="section">
            <h2>✅ Matched Skills</h2>
            <ul>
            {% for skill in matched_skills %}<li>{{ skill }}</li>{% endfor %}
            {% if matched_skills.is_empty() %}<li class="empty">{{ no_matched }}</li>{% endif %}
            </ul>
        </div>
        {% endif %}
        {% if show_missing %}
        <div class="section">
            <h2>⚠️ Missing Skills</h2>
            <ul>
            {% for skill in missing_skills %}<li>{{ skill }}</li>{% endfor %}
            {% if missing_skills.is_empty() %}<li class="empty">{{ no_missing }}</li>{% endif %}
            </ul>
        </div>
        {% endif %}
        {% if show_plan %}
        <div class="section">
            <h2>🚀 Upskilling Plan</h2>
            {% for item in plan %}
            <div class="plan-item">
                <div class="plan-info">
                    <h4>{{ item.skill }}</h4>
                    <p><strong>Course:</strong> {{ item.course_name }}</p>
                    <p><strong>Task:</strong> {{ item.practice_task }}</p>
                </div>
                <div class="plan-meta">
                    <span class="timeline">⏱ {{ item.timeline }}</span>
                    <a href="{{ item.link }}" class="course-link" target="_blank">View Course &rarr;</a>
                </div>
            </div>
            {% endfor %}
            {% if plan.is_empty() %}<p class="empty">{{ no_plan }}</p>{% endif %}
        </div>
        {% endif %}
        {% if show_cover_letter %}
        <div class="section">
            <h2>💌 Cover Letter</h2>
            <div class="letter">{{ cover_letter }}</div>
        </div>
        {% endif %}
        {% if show_interview %}
        <div class="section">
            <h2>🎤 Interview Questions</h2>
            <ol>
            {% for q in questions %}<li><strong>{{ q.skill }}</strong> <small>({{ q.tags }})</small><br>{{ q.question }}</li>{% endfor %}
            </ol>
            {% if questions.is_empty() %}<p class="empty">{{ no_questions }}</p>{% endif %}
        </div>
        {% endif %}
        {% if show_tips %}
        <div class="section">
            <h2>🧾 Formatting Tips</h2>
            {% for tip in tips %}
            <div class="tip {{ tip.severity_class }}"><strong>{{ tip.issue }}</strong> <small>({{ tip.category }})</small><p>{{ tip.suggestion }}</p></div>
            {% endfor %}
            {% if tips.is_empty() %}<p class="empty">{{ no_tips }}</p>{% endif %}
        </div>
        {% endif %}
        {% if show_insights %}
        <div class="section">
            <h2>🏢 Company Insights</h2>
            <ul>
            {% for line in insight_lines %}<li>{{ line }}</li>{% endfor %}
            </ul>
            {% if insight_lines.is_empty() %}<p class="empty">{{ no_insights }}</p>{% endif %}
        </div>
        {% endif %}
        {% if show_tailoring %}
        <div class="section">
            <h2>✂️ Tailored Resume</h2>
            <p>{{ tailoring_summary }}</p>
            <div class="diff">{% for line in diff_lines %}<div class="{{ line.class }}">{{ line.marker }} {{ line.text }}</div>{% endfor %}</div>
        </div>
        {% endif %}
        <div class="metadata">
            <p><strong>ℹ️ Generated by Resume Matcher v{{ version }}</strong></p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    generated_at: String,
    show_score: bool,
    has_score: bool,
    score_text: String,
    score_class: &'static str,
    score_label: &'static str,
    show_matched: bool,
    matched_skills: &'a [String],
    no_matched: &'static str,
    show_missing: bool,
    missing_skills: &'a [String],
    no_missing: &'static str,
    show_plan: bool,
    plan: &'a [PlanItem],
    no_plan: &'static str,
    show_cover_letter: bool,
    cover_letter: String,
    show_interview: bool,
    questions: Vec<HtmlQuestion>,
    no_questions: &'static str,
    show_tips: bool,
    tips: Vec<HtmlTip>,
    no_tips: &'static str,
    show_insights: bool,
    insight_lines: Vec<String>,
    no_insights: &'static str,
    show_tailoring: bool,
    tailoring_summary: String,
    diff_lines: Vec<HtmlDiffLine>,
    version: &'static str,
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn insight_lines(insights: &CompanyInsights) -> Vec<String> {
        let info = &insights.company_info;
        let role = &insights.insights;
        let mut lines: Vec<String> = [
            ("Company", &info.company_name),
            ("Role", &info.role_title),
            ("Size", &info.company_size),
            ("Industry", &info.industry),
            ("Location", &info.location),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
        .collect();

        for text in [&role.company_overview, &role.role_focus] {
            if !text.is_empty() {
                lines.push(text.clone());
            }
        }
        if !insights.culture_signals.is_empty() {
            lines.push(format!("Culture: {}", insights.culture_signals.join(", ")));
        }
        lines.extend(role.what_to_emphasize.iter().cloned());
        lines.extend(role.application_tips.iter().cloned());
        if !role.estimated_salary_range.is_empty() {
            lines.push(format!("Estimated salary: {}", role.estimated_salary_range));
        }
        if !role.career_path.is_empty() {
            lines.push(format!("Career path: {}", role.career_path));
        }
        lines.extend(role.red_flags.iter().cloned());
        lines.extend(role.green_flags.iter().cloned());
        lines
    }

    fn diff_lines(data: &AnalysisData) -> (String, Vec<HtmlDiffLine>) {
        let Some(tailored) = data.tailored_resume_text() else {
            return (NO_TAILORED_RESUME.to_string(), Vec::new());
        };
        let original = data
            .tailoring_data
            .as_ref()
            .map(|t| t.original_resume.as_str())
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(tailored);

        let summary = data
            .tailoring_data
            .as_ref()
            .map(|t| {
                let s = &t.improvement_summary;
                format!(
                    "Skills added: {} | Lines enhanced: {} | Total changes: {} | Coverage: {}",
                    s.skills_added, s.lines_enhanced, s.total_changes, s.coverage_improvement
                )
            })
            .unwrap_or_default();

        let lines = line_diff(original, tailored)
            .into_iter()
            .map(|line| HtmlDiffLine {
                class: match line {
                    DiffLine::Added(_) => "added",
                    DiffLine::Removed(_) => "removed",
                    DiffLine::Same(_) => "same",
                },
                marker: line.marker(),
                text: line.text().to_string(),
            })
            .collect();
        (summary, lines)
    }

    fn create_template_data<'a>(&self, view: &ReportView<'a>) -> HtmlTemplate<'a> {
        let data = view.data;
        let band = data.score.map(ScoreBand::from_score);
        let (tailoring_summary, diff_lines) = Self::diff_lines(data);

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: view.timestamp(),
            show_score: view.shows(Panel::Score),
            has_score: data.score.is_some(),
            score_text: format_score(data.score),
            score_class: band.map(|b| b.css_class()).unwrap_or_default(),
            score_label: band.map(|b| b.label()).unwrap_or_default(),
            show_matched: view.shows(Panel::MatchedSkills),
            matched_skills: &data.matched_skills,
            no_matched: NO_MATCHED_SKILLS,
            show_missing: view.shows(Panel::MissingSkills),
            missing_skills: &data.missing_skills,
            no_missing: NO_MISSING_SKILLS,
            show_plan: view.shows(Panel::UpskillingPlan),
            plan: &data.upskilling_plan,
            no_plan: NO_UPSKILLING_NEEDED,
            show_cover_letter: view.shows(Panel::CoverLetter),
            cover_letter: data
                .cover_letter
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| NO_COVER_LETTER.to_string()),
            show_interview: view.shows(Panel::InterviewQuestions),
            questions: data
                .interview_questions
                .iter()
                .map(|q| HtmlQuestion {
                    skill: q.skill.clone(),
                    tags: format!("{} · {}", title_case(&q.difficulty), q.category),
                    question: q.question.clone(),
                })
                .collect(),
            no_questions: NO_INTERVIEW_QUESTIONS,
            show_tips: view.shows(Panel::FormattingTips),
            tips: data
                .formatting_tips
                .iter()
                .map(|tip| HtmlTip {
                    severity_class: format!("severity-{}", tip.severity.to_string().to_lowercase()),
                    issue: tip.issue.clone(),
                    category: tip.category.clone(),
                    suggestion: tip.suggestion.clone(),
                })
                .collect(),
            no_tips: NO_FORMATTING_TIPS,
            show_insights: view.shows(Panel::CompanyInsights),
            insight_lines: data
                .company_insights
                .as_ref()
                .map(Self::insight_lines)
                .unwrap_or_default(),
            no_insights: NO_COMPANY_INSIGHTS,
            show_tailoring: view.shows(Panel::Tailoring),
            tailoring_summary,
            diff_lines,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, view: &ReportView) -> Result<String> {
        self.create_template_data(view)
            .render()
            .map_err(|e| ResumeMatcherError::OutputFormatting(format!("HTML rendering failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true, true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool, include_metadata: bool, include_html_styles: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, view: &ReportView, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(view),
            OutputFormat::Json => self.json_formatter.format_report(view),
            OutputFormat::Markdown => self.markdown_formatter.format_report(view),
            OutputFormat::Html => self.html_formatter.format_report(view),
        }
    }

    /// Uncolored console rendering, for files and the clipboard
    pub fn generate_plain(&self, view: &ReportView) -> Result<String> {
        ConsoleFormatter::new(false).format_report(view)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PANELS: [Panel; 9] = [
        Panel::Score,
        Panel::MatchedSkills,
        Panel::MissingSkills,
        Panel::UpskillingPlan,
        Panel::CoverLetter,
        Panel::InterviewQuestions,
        Panel::FormattingTips,
        Panel::CompanyInsights,
        Panel::Tailoring,
    ];

    fn sample_data() -> AnalysisData {
        AnalysisData {
            score: Some(66.67),
            matched_skills: vec!["python".to_string(), "docker".to_string()],
            missing_skills: vec!["kubernetes".to_string()],
            upskilling_plan: vec![PlanItem {
                skill: "Kubernetes".to_string(),
                course_name: "Mastering Kubernetes on edX".to_string(),
                platform: "edX".to_string(),
                link: "#".to_string(),
                practice_task: "Build a small project using Kubernetes".to_string(),
                timeline: "2 weeks".to_string(),
            }],
            cover_letter: Some("Dear Hiring Manager,\n\nI am writing <to apply>.".to_string()),
            interview_questions: vec![InterviewQuestion {
                skill: "Python".to_string(),
                question: "What are the main advantages of using python?".to_string(),
                difficulty: "easy".to_string(),
                category: "Concept".to_string(),
            }],
            formatting_tips: vec![FormattingTip {
                category: "Contact".to_string(),
                severity: Severity::High,
                issue: "Missing email address".to_string(),
                suggestion: "Add a professional email address.".to_string(),
                icon: "fa-envelope".to_string(),
            }],
            company_insights: Some(CompanyInsights {
                company_info: CompanyInfo {
                    company_name: Some("Acme".to_string()),
                    ..Default::default()
                },
                culture_signals: vec!["Collaborative".to_string()],
                insights: RoleInsights {
                    career_path: "Junior → Senior".to_string(),
                    ..Default::default()
                },
            }),
            tailoring_data: Some(TailoringData {
                original_resume: "Skills\nPython, Docker".to_string(),
                tailored_resume: "Skills\nPython, Docker, Kubernetes".to_string(),
                improvement_summary: ImprovementSummary {
                    skills_added: 1,
                    lines_enhanced: 0,
                    total_changes: 1,
                    coverage_improvement: "+5%".to_string(),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_console_renders_all_panels() {
        let data = sample_data();
        let view = ReportView::new(&data, &ALL_PANELS);
        let output = ConsoleFormatter::new(false).format_report(&view).unwrap();

        assert!(output.contains("Match Score: 66.67% [GOOD]"));
        assert!(output.contains("  • python"));
        assert!(output.contains("Course: Mastering Kubernetes on edX"));
        assert!(output.contains("⏱ 2 weeks | View Course → #"));
        assert!(output.contains("  Dear Hiring Manager,"));
        assert!(output.contains("(Easy · Concept)"));
        assert!(output.contains("[!] Missing email address"));
        assert!(output.contains("Company: Acme"));
        assert!(output.contains("- Python, Docker"));
        assert!(output.contains("+ Python, Docker, Kubernetes"));
        assert!(output.contains("Coverage: +5%"));
    }

    #[test]
    fn test_console_empty_states() {
        let data = AnalysisData::default();
        let panels = [
            Panel::Score,
            Panel::MatchedSkills,
            Panel::MissingSkills,
            Panel::UpskillingPlan,
            Panel::InterviewQuestions,
            Panel::FormattingTips,
        ];
        let view = ReportView::new(&data, &panels);
        let output = ConsoleFormatter::new(false).format_report(&view).unwrap();

        assert!(output.contains("Match Score: N/A"));
        assert!(output.contains(NO_MATCHED_SKILLS));
        assert!(output.contains(NO_MISSING_SKILLS));
        assert!(output.contains(NO_UPSKILLING_NEEDED));
        assert!(output.contains(NO_INTERVIEW_QUESTIONS));
        assert!(output.contains(NO_FORMATTING_TIPS));
    }

    #[test]
    fn test_only_selected_panels_render() {
        let data = sample_data();
        let view = ReportView::new(&data, &[Panel::CoverLetter]);
        let output = ConsoleFormatter::new(false).format_report(&view).unwrap();

        assert!(output.contains("Cover Letter"));
        assert!(!output.contains("Matched Skills"));
        assert!(!output.contains("Upskilling Plan"));
    }

    #[test]
    fn test_markdown_report() {
        let data = sample_data();
        let view = ReportView::new(&data, &ALL_PANELS);
        let output = MarkdownFormatter::new(false).format_report(&view).unwrap();

        assert!(output.contains("**66.67%** 🟡 Good"));
        assert!(output.contains("| Kubernetes | [Mastering Kubernetes on edX](#) |"));
        assert!(output.contains("> Dear Hiring Manager,"));
        assert!(output.contains("```diff\n Skills\n-Python, Docker\n+Python, Docker, Kubernetes\n```"));
        assert!(!output.contains("**Generated:**"));
    }

    #[test]
    fn test_markdown_table_cells_stay_on_one_row() {
        let data = AnalysisData {
            upskilling_plan: vec![PlanItem {
                skill: "CI|CD".to_string(),
                course_name: "Pipelines".to_string(),
                link: "#".to_string(),
                practice_task: "Build a pipeline\nwith two stages".to_string(),
                timeline: "1 week".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let view = ReportView::new(&data, &[Panel::UpskillingPlan]);
        let output = MarkdownFormatter::new(false).format_report(&view).unwrap();

        assert!(output.contains("| CI\\|CD | [Pipelines](#) | Build a pipeline with two stages | ⏱ 1 week |\n"));
    }

    #[test]
    fn test_html_escapes_server_text() {
        let data = sample_data();
        let view = ReportView::new(&data, &ALL_PANELS);
        let output = HtmlFormatter::new(false).format_report(&view).unwrap();

        assert!(output.contains("score-good"));
        assert!(output.contains("Mastering Kubernetes on edX"));
        assert!(!output.contains("<to apply>"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_json_is_the_payload() {
        let data = sample_data();
        let view = ReportView::new(&data, &ALL_PANELS);
        let output = JsonFormatter::new(false).format_report(&view).unwrap();
        let parsed: AnalysisData = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_truncate_text_on_graphemes() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
    }
}
