//! Request payload construction for `POST /api/analyze`

use crate::input::{FieldPayload, FileUpload};
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use serde::Serialize;

/// JSON body used when both fields are plain text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonBody {
    pub jd_text: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Json(JsonBody),
    Multipart {
        jd: FieldPayload,
        resume: FieldPayload,
    },
}

impl AnalysisRequest {
    /// Pick the body encoding: multipart whenever a file is attached or
    /// multipart is preferred, JSON otherwise.
    pub fn build(jd: FieldPayload, resume: FieldPayload, prefer_multipart: bool) -> Self {
        match (jd, resume) {
            (FieldPayload::Text(jd_text), FieldPayload::Text(resume_text)) if !prefer_multipart => {
                AnalysisRequest::Json(JsonBody { jd_text, resume_text })
            }
            (jd, resume) => AnalysisRequest::Multipart { jd, resume },
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, AnalysisRequest::Multipart { .. })
    }

    /// Multipart field names in wire order, e.g. `["jd_text", "resume_file"]`
    pub fn field_names(&self) -> Vec<&'static str> {
        match self {
            AnalysisRequest::Json(_) => vec!["jd_text", "resume_text"],
            AnalysisRequest::Multipart { jd, resume } => vec![
                field_name("jd", jd),
                field_name("resume", resume),
            ],
        }
    }

    pub fn describe(&self) -> String {
        match self {
            AnalysisRequest::Json(body) => format!(
                "JSON body (jd: {} chars, resume: {} chars)",
                body.jd_text.chars().count(),
                body.resume_text.chars().count()
            ),
            AnalysisRequest::Multipart { .. } => {
                format!("multipart form ({})", self.field_names().join(", "))
            }
        }
    }
}

fn field_name(prefix: &str, payload: &FieldPayload) -> &'static str {
    match (prefix, payload) {
        ("jd", FieldPayload::Text(_)) => "jd_text",
        ("jd", FieldPayload::File(_)) => "jd_file",
        (_, FieldPayload::Text(_)) => "resume_text",
        (_, FieldPayload::File(_)) => "resume_file",
    }
}

/// Build the multipart form for a multipart request
pub fn multipart_form(jd: &FieldPayload, resume: &FieldPayload) -> Result<Form> {
    let form = add_field(Form::new(), field_name("jd", jd), jd)?;
    add_field(form, field_name("resume", resume), resume)
}

fn add_field(form: Form, name: &'static str, payload: &FieldPayload) -> Result<Form> {
    match payload {
        FieldPayload::Text(text) => Ok(form.text(name, text.clone())),
        FieldPayload::File(FileUpload {
            file_name,
            mime_type,
            bytes,
        }) => {
            let part = Part::bytes(bytes.clone())
                .file_name(file_name.clone())
                .mime_str(mime_type)
                .with_context(|| format!("Failed to create multipart field {}", name))?;
            Ok(form.part(name, part))
        }
    }
}
