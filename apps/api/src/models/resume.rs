//! Resume record as exchanged with the builder UI and stored in Postgres.
//!
//! The wire format is camelCase. Older clients send snake_case keys for the
//! same fields, so those are accepted as aliases on input; they are never
//! emitted. The database row is converted exactly once, in
//! `From<SavedResumeRow> for SavedResume`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_TEMPLATE: &str = "professional";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    #[serde(alias = "personal_info")]
    pub personal_info: PersonalInfo,
    pub skills: Skills,
    #[serde(deserialize_with = "lenient::list")]
    pub experience: Vec<ExperienceItem>,
    #[serde(deserialize_with = "lenient::list")]
    pub projects: Vec<ProjectItem>,
    #[serde(deserialize_with = "lenient::list")]
    pub education: Vec<EducationItem>,
    #[serde(deserialize_with = "lenient::list")]
    pub certifications: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(alias = "job_title", deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient::string")]
    pub github: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "lenient::list")]
    pub technical: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub soft: Vec<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceItem {
    #[serde(deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    /// Free text as typed by the user, e.g. "2 years".
    #[serde(deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    /// Timeframe strings (`YYYY`, `YYYY-MM`, `present`).
    #[serde(alias = "start_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectItem {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(alias = "tech_stack", deserialize_with = "lenient::list")]
    pub tech_stack: Vec<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationItem {
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub college: String,
    #[serde(deserialize_with = "lenient::string")]
    pub year: String,
    #[serde(deserialize_with = "lenient::string")]
    pub cgpa: String,
    #[serde(alias = "start_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// A resume owned by a user, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResume {
    pub id: Uuid,
    #[serde(alias = "user_id")]
    pub user_id: String,
    pub title: String,
    #[serde(alias = "target_role")]
    pub target_role: Option<String>,
    #[serde(alias = "template_name")]
    pub template: String,
    pub data: ResumeData,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct SavedResumeRow {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub target_role: Option<String>,
    pub template: String,
    pub data: Json<ResumeData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SavedResumeRow> for SavedResume {
    fn from(row: SavedResumeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            target_role: row.target_role,
            template: row.template,
            data: row.data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Body of create and update requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeInput {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, alias = "target_role")]
    pub target_role: Option<String>,
    #[serde(default, alias = "template_name", alias = "templateName")]
    pub template: Option<String>,
    #[serde(default, alias = "resume_data", alias = "resumeData")]
    pub data: ResumeData,
}

impl ResumeInput {
    pub fn template_or_default(&self) -> &str {
        self.template
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TEMPLATE)
    }

    /// Blank target roles are stored as NULL.
    pub fn target_role_normalized(&self) -> Option<&str> {
        self.target_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Builder UIs send `null`, numbers, or omit keys for fields they have not
/// touched yet. These accept all of that and fall back to empty values.
mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(other) => Err(D::Error::custom(format!(
                "expected text, found {other}"
            ))),
        }
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }
}
