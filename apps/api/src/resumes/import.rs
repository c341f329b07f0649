//! Resume import: text extraction from an uploaded PDF and a best-effort
//! pre-fill of contact details for the builder.
//!
//! Only `personalInfo` is guessed. Sections are left for the user to fill in.

use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::resume::ResumeData;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const PDF_MAGIC: &[u8] = b"%PDF-";
const MAX_NAME_CHARS: usize = 60;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub raw_text: String,
    pub draft: ResumeData,
}

/// Extracts text from PDF bytes. Runs on the blocking pool since parsing is
/// CPU-bound and the parser may panic on malformed input.
pub async fn extract_pdf_text(bytes: bytes::Bytes) -> Result<String, AppError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF".to_string(),
        ));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            warn!("PDF extraction aborted: {e}");
            AppError::UnprocessableEntity("Could not read the uploaded PDF".to_string())
        })?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read the uploaded PDF: {e}")))?;

    debug!("Extracted {} chars from {size} byte PDF", text.len());
    Ok(text)
}

/// Guesses contact details from extracted resume text.
pub fn draft_from_text(text: &str) -> ResumeData {
    let mut draft = ResumeData::default();
    let info = &mut draft.personal_info;

    for token in text.split_whitespace().map(strip_punctuation) {
        let lower = token.to_lowercase();
        if info.email.is_empty() && is_email_token(token) {
            info.email = token.trim_start_matches("mailto:").to_string();
        } else if info.linkedin.is_empty() && lower.contains("linkedin.com/") {
            info.linkedin = token.to_string();
        } else if info.github.is_empty() && lower.contains("github.com/") {
            info.github = token.to_string();
        }
    }

    if let Some(phone) = text.lines().find_map(find_phone) {
        info.phone = phone;
    }

    if let Some(name) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
        if looks_like_name(name) {
            info.name = name.to_string();
        }
    }

    draft
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| matches!(c, ',' | ';' | '|' | '(' | ')' | '<' | '>' | '"' | '\''))
}

fn is_email_token(token: &str) -> bool {
    let token = token.trim_start_matches("mailto:");
    match token.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    }
}

/// First run of phone-ish characters on the line holding 10 to 15 digits.
fn find_phone(line: &str) -> Option<String> {
    let is_phone_char = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' ' | '.');

    let mut run = String::new();
    for c in line.chars().chain(std::iter::once('\n')) {
        if is_phone_char(c) {
            run.push(c);
            continue;
        }
        let digits = run.chars().filter(char::is_ascii_digit).count();
        if (10..=15).contains(&digits) {
            return Some(run.trim().trim_end_matches(['-', '.']).trim().to_string());
        }
        run.clear();
    }
    None
}

fn looks_like_name(line: &str) -> bool {
    line.chars().count() <= MAX_NAME_CHARS
        && !line.contains('@')
        && !line.contains("://")
        && !line.chars().any(|c| c.is_ascii_digit())
        && line.split_whitespace().count() <= 5
}
