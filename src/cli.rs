//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Match a resume against a job description")]
#[command(long_about = "Submit a job description and a resume to the analysis service and render the match score, skill gaps, upskilling plan, cover letter, interview questions, formatting tips, company insights and tailored resume")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze how well a resume matches a job description
    Analyze {
        /// Job description text ("-" reads stdin)
        #[arg(long)]
        jd_text: Option<String>,

        /// Job description file (PDF, DOCX, TXT, MD); takes precedence over --jd-text
        #[arg(long)]
        jd_file: Option<PathBuf>,

        /// Resume text ("-" reads stdin)
        #[arg(long)]
        resume_text: Option<String>,

        /// Resume file (PDF, DOCX, TXT, MD); takes precedence over --resume-text
        #[arg(long)]
        resume_file: Option<PathBuf>,

        /// Analysis server base URL
        #[arg(long)]
        server: Option<String>,

        /// Tab to show: all, overview, plan, cover-letter, interview, formatting, insights, tailoring
        #[arg(short, long)]
        tab: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save the rendered report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Copy a section to the clipboard: cover-letter, tailored-resume, interview-questions, report
        #[arg(long)]
        copy: Option<String>,

        /// Download a section into the downloads directory (repeatable)
        #[arg(long)]
        download: Vec<String>,

        /// Override the downloads directory
        #[arg(long)]
        download_dir: Option<PathBuf>,

        /// Skip the score animation
        #[arg(long)]
        no_animate: bool,

        /// Hide a panel (repeatable): score, matched, missing, plan, cover-letter, interview, formatting, insights, tailoring
        #[arg(long)]
        hide: Vec<String>,

        /// Send multipart form data even for plain text
        #[arg(long)]
        multipart: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "server.base_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("html").unwrap(), OutputFormat::Html);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_analyze_args() {
        let cli = Cli::try_parse_from([
            "resume-matcher",
            "analyze",
            "--jd-text",
            "Rust engineer",
            "--resume-file",
            "cv.pdf",
            "--hide",
            "score",
            "--hide",
            "missing",
            "--download",
            "cover-letter",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                jd_text,
                resume_file,
                hide,
                download,
                ..
            } => {
                assert_eq!(jd_text.as_deref(), Some("Rust engineer"));
                assert_eq!(resume_file, Some(PathBuf::from("cv.pdf")));
                assert_eq!(hide, vec!["score", "missing"]);
                assert_eq!(download, vec!["cover-letter"]);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_config_set_args() {
        let cli = Cli::try_parse_from(["resume-matcher", "-v", "config", "set", "server.base_url", "http://x"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Config { action: Some(ConfigAction::Set { .. }) }
        ));
    }
}
