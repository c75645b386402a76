//! Panel visibility, tab selection, and submit control state

use crate::output::report::AnalysisData;
use std::collections::BTreeSet;
use std::fmt;

/// A result tab; each tab groups one or more panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tab {
    Overview,
    Plan,
    CoverLetter,
    Interview,
    Formatting,
    Insights,
    Tailoring,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Overview,
        Tab::Plan,
        Tab::CoverLetter,
        Tab::Interview,
        Tab::Formatting,
        Tab::Insights,
        Tab::Tailoring,
    ];

    pub fn parse(name: &str) -> Result<Self, String> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "overview" | "score" | "skills" => Ok(Tab::Overview),
            "plan" | "upskilling" => Ok(Tab::Plan),
            "cover-letter" | "letter" => Ok(Tab::CoverLetter),
            "interview" | "questions" => Ok(Tab::Interview),
            "formatting" | "tips" => Ok(Tab::Formatting),
            "insights" | "company" => Ok(Tab::Insights),
            "tailoring" | "tailored" | "resume" => Ok(Tab::Tailoring),
            _ => Err(format!(
                "Invalid tab: {}. Supported: all, overview, plan, cover-letter, interview, formatting, insights, tailoring",
                name
            )),
        }
    }

    pub fn panels(&self) -> &'static [Panel] {
        match self {
            Tab::Overview => &[Panel::Score, Panel::MatchedSkills, Panel::MissingSkills],
            Tab::Plan => &[Panel::UpskillingPlan],
            Tab::CoverLetter => &[Panel::CoverLetter],
            Tab::Interview => &[Panel::InterviewQuestions],
            Tab::Formatting => &[Panel::FormattingTips],
            Tab::Insights => &[Panel::CompanyInsights],
            Tab::Tailoring => &[Panel::Tailoring],
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tab::Overview => "overview",
            Tab::Plan => "plan",
            Tab::CoverLetter => "cover-letter",
            Tab::Interview => "interview",
            Tab::Formatting => "formatting",
            Tab::Insights => "insights",
            Tab::Tailoring => "tailoring",
        };
        write!(f, "{}", name)
    }
}

/// Either every tab stacked, or a single tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabSelection {
    All,
    Single(Tab),
}

impl TabSelection {
    pub fn parse(name: &str) -> Result<Self, String> {
        if name.eq_ignore_ascii_case("all") {
            Ok(TabSelection::All)
        } else {
            Tab::parse(name).map(TabSelection::Single)
        }
    }

    fn includes(&self, tab: Tab) -> bool {
        match self {
            TabSelection::All => true,
            TabSelection::Single(selected) => *selected == tab,
        }
    }
}

/// One display widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Panel {
    Score,
    MatchedSkills,
    MissingSkills,
    UpskillingPlan,
    CoverLetter,
    InterviewQuestions,
    FormattingTips,
    CompanyInsights,
    Tailoring,
}

impl Panel {
    pub fn parse(name: &str) -> Result<Self, String> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "score" => Ok(Panel::Score),
            "matched" | "matched-skills" => Ok(Panel::MatchedSkills),
            "missing" | "missing-skills" => Ok(Panel::MissingSkills),
            "plan" | "upskilling-plan" => Ok(Panel::UpskillingPlan),
            "cover-letter" => Ok(Panel::CoverLetter),
            "interview" | "interview-questions" => Ok(Panel::InterviewQuestions),
            "formatting" | "formatting-tips" => Ok(Panel::FormattingTips),
            "insights" | "company-insights" => Ok(Panel::CompanyInsights),
            "tailoring" => Ok(Panel::Tailoring),
            _ => Err(format!("Invalid panel: {}", name)),
        }
    }

    /// Whether the payload carries anything for this panel. Overview and
    /// plan panels always render, falling back to their empty-state text.
    fn has_data(&self, data: &AnalysisData) -> bool {
        match self {
            Panel::Score | Panel::MatchedSkills | Panel::MissingSkills | Panel::UpskillingPlan => true,
            Panel::CoverLetter => data.has_cover_letter(),
            Panel::InterviewQuestions => !data.interview_questions.is_empty(),
            Panel::FormattingTips => !data.formatting_tips.is_empty(),
            Panel::CompanyInsights => data.company_insights.is_some(),
            Panel::Tailoring => data.tailored_resume_text().is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Analyzing,
}

impl SubmitState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitState::Idle => "Analyze Match",
            SubmitState::Analyzing => "Analyzing...",
        }
    }
}

/// Page-lifetime display state
#[derive(Debug, Clone)]
pub struct ViewState {
    selection: TabSelection,
    hidden: BTreeSet<Panel>,
    submit: SubmitState,
    error: Option<String>,
    results_visible: bool,
}

impl ViewState {
    pub fn new(selection: TabSelection) -> Self {
        Self {
            selection,
            hidden: BTreeSet::new(),
            submit: SubmitState::Idle,
            error: None,
            results_visible: false,
        }
    }

    pub fn selection(&self) -> TabSelection {
        self.selection
    }

    pub fn switch_tab(&mut self, selection: TabSelection) {
        self.selection = selection;
    }

    pub fn hide_panel(&mut self, panel: Panel) {
        self.hidden.insert(panel);
    }

    /// Flip a panel between shown and hidden; returns true if now visible
    pub fn toggle_panel(&mut self, panel: Panel) -> bool {
        if !self.hidden.remove(&panel) {
            self.hidden.insert(panel);
            false
        } else {
            true
        }
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results_visible(&self) -> bool {
        self.results_visible
    }

    /// Clear previous results and errors, then disable submit
    pub fn begin_submit(&mut self) {
        self.error = None;
        self.results_visible = false;
        self.submit = SubmitState::Analyzing;
    }

    pub fn finish_success(&mut self) {
        self.results_visible = true;
        self.submit = SubmitState::Idle;
    }

    pub fn finish_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.results_visible = false;
        self.submit = SubmitState::Idle;
    }

    /// Panels to render for this payload, in display order
    pub fn visible_panels(&self, data: &AnalysisData) -> Vec<Panel> {
        if !self.results_visible {
            return Vec::new();
        }

        Tab::ALL
            .iter()
            .filter(|tab| self.selection.includes(**tab))
            .flat_map(|tab| tab.panels().iter().copied())
            .filter(|panel| !self.hidden.contains(panel))
            .filter(|panel| {
                // A tab picked explicitly shows its empty state too
                matches!(self.selection, TabSelection::Single(_)) || panel.has_data(data)
            })
            .collect()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(TabSelection::All)
    }
}
