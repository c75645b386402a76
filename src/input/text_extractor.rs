//! Text extraction from various file formats

use crate::error::{Result, ResumeMatcherError};
use pulldown_cmark::{Event, Parser, Tag};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeMatcherError::PdfExtraction(format!(
                "Error parsing file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(normalize_extracted_text(&text))
    }
}

/// Collapse the space runs and blank-line stacks PDF extraction leaves behind
pub fn normalize_extracted_text(text: &str) -> String {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    static BLANK_LINES: OnceLock<Regex> = OnceLock::new();

    let spaces = SPACES.get_or_init(|| Regex::new(r"[ \t\u{a0}]+").expect("Invalid whitespace regex"));
    let blank_lines =
        BLANK_LINES.get_or_init(|| Regex::new(r"\n\s*\n\s*\n+").expect("Invalid blank line regex"));

    let text = spaces.replace_all(text, " ");
    let text = text.lines().map(str::trim).collect::<Vec<_>>().join("\n");
    blank_lines.replace_all(&text, "\n\n").trim().to_string()
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Strip Markdown syntax, keeping one line per block and list item
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_strips_syntax() {
        let md = "# Jane Roe\n\n**Software Engineer**\n\n## Skills\n\n- Rust\n- `Docker`\n";
        let text = markdown_to_text(md);

        assert_eq!(text, "Jane Roe\nSoftware Engineer\nSkills\nRust\nDocker");
    }

    #[test]
    fn test_normalize_extracted_text() {
        let raw = "  Jane   Roe\t\n\n\n\nSkills:  Rust,\u{a0}Go  \n";
        assert_eq!(normalize_extracted_text(raw), "Jane Roe\n\nSkills: Rust, Go");
        // Second call reuses the compiled patterns
        assert_eq!(normalize_extracted_text("a \n\n\n b"), "a\n\nb");
    }

    #[test]
    fn test_markdown_links_keep_label() {
        let text = markdown_to_text("See [my portfolio](https://example.com).");
        assert_eq!(text, "See my portfolio.");
    }
}
