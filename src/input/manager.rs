//! Form state and input resolution for the two analysis fields

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};

pub const MISSING_FIELDS_MESSAGE: &str = "Please provide both a Job Description and a Resume.";
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Unsupported file format. Please upload PDF, DOCX, or TXT.";

/// Marker value that reads a text field from stdin
pub const STDIN_MARKER: &str = "-";

/// Where a single form field gets its content from
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSource {
    Text(String),
    File(PathBuf),
}

impl FieldSource {
    /// Combine the text and file inputs of one field. The file wins when
    /// both are present; blank text counts as absent.
    pub fn from_parts(text: Option<String>, file: Option<PathBuf>) -> Option<Self> {
        if let Some(path) = file {
            return Some(FieldSource::File(path));
        }
        text.map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(FieldSource::Text)
    }

    fn reads_stdin(&self) -> bool {
        matches!(self, FieldSource::Text(t) if t == STDIN_MARKER)
    }
}

/// The gathered state of the analysis form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub jd: Option<FieldSource>,
    pub resume: Option<FieldSource>,
}

impl FormState {
    pub fn new(jd: Option<FieldSource>, resume: Option<FieldSource>) -> Self {
        Self { jd, resume }
    }

    /// Both fields must be filled before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.jd.is_none() || self.resume.is_none() {
            return Err(ResumeMatcherError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let stdin_fields = [&self.jd, &self.resume]
            .iter()
            .filter(|f| f.as_ref().is_some_and(FieldSource::reads_stdin))
            .count();
        if stdin_fields > 1 {
            return Err(ResumeMatcherError::InvalidInput(
                "Only one field can be read from stdin.".to_string(),
            ));
        }

        Ok(())
    }
}

/// A file attached to the form, ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// A resolved field value as it goes on the wire
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPayload {
    Text(String),
    File(FileUpload),
}

type StdinReader = Box<dyn AsyncRead + Unpin + Send>;

pub struct InputManager {
    cache: HashMap<String, String>,
    extract_locally: bool,
    stdin: Option<StdinReader>,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            extract_locally: false,
            stdin: None,
        }
    }

    /// Read the `-` field from `reader` instead of the process stdin
    pub fn with_stdin(mut self, reader: impl AsyncRead + Unpin + Send + 'static) -> Self {
        self.stdin = Some(Box::new(reader));
        self
    }

    /// Turn attached files into text here instead of uploading them
    pub fn with_local_extraction(mut self, enable: bool) -> Self {
        self.extract_locally = enable;
        self
    }

    /// Validate the form and resolve both fields into wire payloads
    pub async fn resolve(&mut self, form: &FormState) -> Result<(FieldPayload, FieldPayload)> {
        form.validate()?;

        let (Some(jd), Some(resume)) = (&form.jd, &form.resume) else {
            return Err(ResumeMatcherError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
        };

        let jd = self.resolve_field(jd).await?;
        let resume = self.resolve_field(resume).await?;
        Ok((jd, resume))
    }

    pub async fn resolve_field(&mut self, source: &FieldSource) -> Result<FieldPayload> {
        match source {
            FieldSource::Text(text) if text == STDIN_MARKER => {
                let text = self.read_stdin().await?;
                if text.is_empty() {
                    return Err(ResumeMatcherError::InvalidInput(MISSING_FIELDS_MESSAGE.to_string()));
                }
                Ok(FieldPayload::Text(text))
            }
            FieldSource::Text(text) => Ok(FieldPayload::Text(text.clone())),
            FieldSource::File(path) if self.extract_locally => {
                let text = self.extract_text(path).await?;
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(ResumeMatcherError::InvalidInput(format!(
                        "No text could be extracted from {}",
                        path.display()
                    )));
                }
                Ok(FieldPayload::Text(text))
            }
            FieldSource::File(path) => Ok(FieldPayload::File(self.load_upload(path).await?)),
        }
    }

    async fn load_upload(&self, path: &Path) -> Result<FileUpload> {
        let file_type = self.detect_file_type(path)?;
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());

        debug!("Attaching {} ({} bytes, {})", file_name, bytes.len(), file_type.mime_type());

        Ok(FileUpload {
            file_name,
            mime_type: file_type.mime_type(),
            bytes,
        })
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Docx => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "DOCX files are parsed by the server; upload {} without local extraction",
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(ResumeMatcherError::UnsupportedFormat(
                    UNSUPPORTED_FORMAT_MESSAGE.to_string(),
                ));
            }
        };

        self.cache.insert(path_str, text.clone());

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match FileType::from_path(path) {
            FileType::Unknown => Err(ResumeMatcherError::UnsupportedFormat(
                UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            )),
            file_type => Ok(file_type),
        }
    }

    async fn read_stdin(&mut self) -> Result<String> {
        let mut buffer = String::new();
        match self.stdin.as_mut() {
            Some(reader) => reader.read_to_string(&mut buffer).await?,
            None => tokio::io::stdin().read_to_string(&mut buffer).await?,
        };
        Ok(buffer.trim().to_string())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
