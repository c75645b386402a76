//! Integration tests for the resume matcher

use resume_matcher::client::{AnalysisClient, AnalysisRequest};
use resume_matcher::error::ResumeMatcherError;
use resume_matcher::input::manager::{MISSING_FIELDS_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE};
use resume_matcher::input::{FieldPayload, FieldSource, FormState, InputManager};
use resume_matcher::output::formatter::{ReportGenerator, ReportView};
use resume_matcher::output::report::AnalysisData;
use resume_matcher::output::view::{Tab, TabSelection, ViewState};
use resume_matcher::config::OutputFormat;
use serde_json::json;
use std::path::{Path, PathBuf};
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JD_TEXT: &str = "Looking for Python, Docker and Kubernetes experience.";
const RESUME_TEXT: &str = "Jane Roe. Skills: Python, Docker.";

fn success_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "score": 66.67,
            "jd_skills": ["python", "docker", "kubernetes"],
            "resume_skills": ["python", "docker"],
            "matched_skills": ["python", "docker"],
            "missing_skills": ["kubernetes"],
            "upskilling_plan": [{
                "skill": "Kubernetes",
                "course_name": "Mastering Kubernetes on edX",
                "platform": "edX",
                "link": "#",
                "practice_task": "Build a small project using Kubernetes",
                "timeline": "3 weeks"
            }],
            "cover_letter": "Dear Hiring Manager,\n\nI am excited to apply.",
            "improved_resume": "Jane Roe. Skills: Python, Docker, Kubernetes."
        }
    })
}

fn text_form(jd: &str, resume: &str) -> FormState {
    FormState::new(
        FieldSource::from_parts(Some(jd.to_string()), None),
        FieldSource::from_parts(Some(resume.to_string()), None),
    )
}

/// Resolve the form and send it, the way the analyze command does
async fn submit(server: &MockServer, form: &FormState, prefer_multipart: bool) -> resume_matcher::Result<AnalysisData> {
    let mut manager = InputManager::new();
    let (jd, resume) = manager.resolve(form).await?;
    let request = AnalysisRequest::build(jd, resume, prefer_multipart);
    let client = AnalysisClient::new(format!("{}/api/analyze", server.uri()), 5)?;
    client.analyze(&request).await
}

#[tokio::test]
async fn test_text_fields_are_sent_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(body_json(json!({"jd_text": JD_TEXT, "resume_text": RESUME_TEXT})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let form = text_form(&format!("  {}\n", JD_TEXT), RESUME_TEXT);
    let data = submit(&server, &form, false).await.unwrap();

    assert_eq!(data.score, Some(66.67));
    assert_eq!(data.matched_skills, vec!["python", "docker"]);
    assert_eq!(data.missing_skills, vec!["kubernetes"]);
    assert_eq!(data.upskilling_plan[0].course_name, "Mastering Kubernetes on edX");
}

#[tokio::test]
async fn test_attached_file_switches_to_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"jd_text\""))
        .and(body_string_contains("name=\"resume_file\"; filename=\"sample_resume.txt\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let form = FormState::new(
        FieldSource::from_parts(Some(JD_TEXT.to_string()), None),
        FieldSource::from_parts(
            Some("ignored because a file is attached".to_string()),
            Some(PathBuf::from("tests/fixtures/sample_resume.txt")),
        ),
    );

    let data = submit(&server, &form, false).await.unwrap();
    assert_eq!(data.cover_letter.as_deref(), Some("Dear Hiring Manager,\n\nI am excited to apply."));
}

#[tokio::test]
async fn test_prefer_multipart_sends_text_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"resume_text\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    submit(&server, &text_form(JD_TEXT, RESUME_TEXT), true).await.unwrap();
}

#[tokio::test]
async fn test_error_envelope_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Both Job Description and Resume are required."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = submit(&server, &text_form(JD_TEXT, RESUME_TEXT), false).await.unwrap_err();
    assert!(matches!(err, ResumeMatcherError::Api(_)));
    assert_eq!(err.to_string(), "Both Job Description and Resume are required.");
}

#[tokio::test]
async fn test_server_error_without_message_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let err = submit(&server, &text_form(JD_TEXT, RESUME_TEXT), false).await.unwrap_err();
    assert_eq!(err.to_string(), "An error occurred during analysis.");
}

#[tokio::test]
async fn test_failed_request_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"error": "Service unavailable"})))
        .expect(1)
        .mount(&server)
        .await;

    assert!(submit(&server, &text_form(JD_TEXT, RESUME_TEXT), false).await.is_err());
    server.verify().await;
}

#[tokio::test]
async fn test_empty_fields_issue_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = submit(&server, &text_form("   \n\t", RESUME_TEXT), false).await.unwrap_err();
    assert!(matches!(err, ResumeMatcherError::InvalidInput(_)));
    assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);

    let err = submit(&server, &FormState::default(), false).await.unwrap_err();
    assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let mut manager = InputManager::new();
    let (jd, resume) = manager.resolve(&text_form(JD_TEXT, RESUME_TEXT)).await.unwrap();
    let client = AnalysisClient::new("http://127.0.0.1:9/api/analyze", 5).unwrap();

    let err = client.analyze(&AnalysisRequest::build(jd, resume, false)).await.unwrap_err();
    assert!(matches!(err, ResumeMatcherError::Network(_)));
}

#[tokio::test]
async fn test_rendered_report_from_live_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    let data = submit(&server, &text_form(JD_TEXT, RESUME_TEXT), false).await.unwrap();

    let mut view = ViewState::new(TabSelection::All);
    view.begin_submit();
    view.finish_success();
    let panels = view.visible_panels(&data);
    let report = ReportView::new(&data, &panels);
    let output = ReportGenerator::with_options(false, true, true, true)
        .generate_report(&report, &OutputFormat::Console)
        .unwrap();

    assert!(output.contains("Match Score: 66.67% [GOOD]"));
    assert!(output.contains("Mastering Kubernetes on edX"));
    assert!(output.contains("Dear Hiring Manager,"));
    assert!(output.contains("Jane Roe. Skills: Python, Docker, Kubernetes."));
    assert!(!output.contains("Interview Questions"));

    view.switch_tab(TabSelection::Single(Tab::Interview));
    let panels = view.visible_panels(&data);
    let report = ReportView::new(&data, &panels);
    let output = ReportGenerator::with_options(false, true, true, true)
        .generate_report(&report, &OutputFormat::Console)
        .unwrap();
    assert!(output.contains("No interview questions generated."));
    assert!(!output.contains("Cover Letter"));
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_local_extraction_sends_text() {
    let mut manager = InputManager::new().with_local_extraction(true);
    let form = FormState::new(
        FieldSource::from_parts(None, Some(PathBuf::from("tests/fixtures/sample_jd.txt"))),
        FieldSource::from_parts(None, Some(PathBuf::from("tests/fixtures/sample_resume.md"))),
    );

    let (jd, resume) = manager.resolve(&form).await.unwrap();
    match (&jd, &resume) {
        (FieldPayload::Text(jd), FieldPayload::Text(resume)) => {
            assert!(jd.starts_with("Senior Backend Engineer"));
            assert!(resume.starts_with("John Doe"));
        }
        other => panic!("expected text payloads, got {:?}", other),
    }
    assert!(!AnalysisRequest::build(jd, resume, false).is_multipart());
    assert_eq!(manager.cache_size(), 2);
}

#[tokio::test]
async fn test_docx_is_uploaded_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let docx = dir.path().join("resume.docx");
    std::fs::write(&docx, b"PK\x03\x04fake docx").unwrap();

    let mut manager = InputManager::new();
    match manager.resolve_field(&FieldSource::File(docx)).await.unwrap() {
        FieldPayload::File(upload) => {
            assert_eq!(upload.file_name, "resume.docx");
            assert_eq!(
                upload.mime_type,
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            );
            assert_eq!(upload.bytes, b"PK\x03\x04fake docx");
        }
        other => panic!("expected a file upload, got {:?}", other),
    }
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = PathBuf::from("tests/fixtures/unsupported.xyz");

    let err = manager.resolve_field(&FieldSource::File(path)).await.unwrap_err();
    assert!(matches!(err, ResumeMatcherError::UnsupportedFormat(_)));
    assert_eq!(err.to_string(), UNSUPPORTED_FORMAT_MESSAGE);
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    assert!(manager.extract_text(path).await.is_err());
}
