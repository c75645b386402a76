//! Match score formatting, banding, and the count-up animation

use colored::Color;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

const ANIMATION_STEPS: u64 = 40;
const ANIMATION_FRAME: Duration = Duration::from_millis(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Round to the two decimals the score is displayed with
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        let score = round_score(score);
        if score >= 80.0 {
            ScoreBand::Excellent
        } else if score >= 60.0 {
            ScoreBand::Good
        } else if score >= 40.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Fair => "FAIR",
            ScoreBand::Poor => "POOR",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::Poor => "score-poor",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Fair => Color::Yellow,
            ScoreBand::Poor => Color::Red,
        }
    }
}

/// Whole scores print without decimals, others with two
pub fn format_score(score: Option<f64>) -> String {
    match score.map(round_score) {
        Some(s) if s.fract() == 0.0 => format!("{:.0}", s),
        Some(s) => format!("{:.2}", s),
        None => "N/A".to_string(),
    }
}

/// Count the score up on a progress bar. Skipped when stderr is not a terminal.
pub async fn animate_score(score: f64) {
    if !std::io::stderr().is_terminal() {
        return;
    }

    let target = score.clamp(0.0, 100.0);
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("Match score [{bar:40.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    for step in 1..=ANIMATION_STEPS {
        let current = target * step as f64 / ANIMATION_STEPS as f64;
        bar.set_position(current.round() as u64);
        bar.set_message(format!("{:.0}%", current));
        tokio::time::sleep(ANIMATION_FRAME).await;
    }

    bar.finish_and_clear();
}
