use serde::{Deserialize, Serialize};

use crate::formatting::date::is_timeframe;
use crate::models::resume::{ResumeData, ResumeInput};

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_TEMPLATE_CHARS: usize = 64;
pub const MAX_TEXT_CHARS: usize = 10_000;
pub const MAX_LIST_ITEMS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub issues: Vec<FieldIssue>,
}

#[derive(Default)]
struct Collector {
    issues: Vec<FieldIssue>,
}

impl Collector {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    fn text(&mut self, field: &str, value: &str) {
        if value.chars().count() > MAX_TEXT_CHARS {
            self.push(field, format!("must be at most {MAX_TEXT_CHARS} characters"));
        }
    }

    fn list<T>(&mut self, field: &str, items: &[T]) {
        if items.len() > MAX_LIST_ITEMS {
            self.push(field, format!("must contain at most {MAX_LIST_ITEMS} items"));
        }
    }

    /// List length plus the length of each entry.
    fn strings(&mut self, field: &str, items: &[String]) {
        self.list(field, items);
        for (i, item) in items.iter().enumerate() {
            self.text(&format!("{field}[{i}]"), item);
        }
    }

    fn timeframe(&mut self, field: &str, value: Option<&str>) {
        if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
            if !is_timeframe(v) {
                self.push(field, format!("'{v}' is not YYYY, YYYY-MM or 'present'"));
            }
        }
    }
}

/// Checks a create/update body before it reaches the store.
///
/// Every field stays optional; only title and template are required, and
/// anything present must be within size limits and well-shaped.
pub fn validate_resume_input(input: &ResumeInput) -> ValidationReport {
    let mut c = Collector::default();

    let title = input.title.trim();
    if title.is_empty() {
        c.push("title", "is required");
    } else if title.chars().count() > MAX_TITLE_CHARS {
        c.push("title", format!("must be at most {MAX_TITLE_CHARS} characters"));
    }

    if input.template_or_default().chars().count() > MAX_TEMPLATE_CHARS {
        c.push(
            "template",
            format!("must be at most {MAX_TEMPLATE_CHARS} characters"),
        );
    }

    if let Some(role) = input.target_role_normalized() {
        c.text("targetRole", role);
    }

    validate_data(&mut c, &input.data);

    ValidationReport {
        passed: c.issues.is_empty(),
        issues: c.issues,
    }
}

fn validate_data(c: &mut Collector, data: &ResumeData) {
    let info = &data.personal_info;
    for (field, value) in [
        ("personalInfo.name", &info.name),
        ("personalInfo.jobTitle", &info.job_title),
        ("personalInfo.email", &info.email),
        ("personalInfo.phone", &info.phone),
        ("personalInfo.linkedin", &info.linkedin),
        ("personalInfo.github", &info.github),
        ("personalInfo.location", &info.location),
        ("personalInfo.summary", &info.summary),
    ] {
        c.text(field, value);
    }

    let email = info.email.trim();
    if !email.is_empty() && !looks_like_email(email) {
        c.push("personalInfo.email", "must be a valid email address");
    }

    c.strings("skills.technical", &data.skills.technical);
    c.strings("skills.soft", &data.skills.soft);
    c.strings("skills.tools", &data.skills.tools);
    c.list("experience", &data.experience);
    c.list("projects", &data.projects);
    c.list("education", &data.education);
    c.strings("certifications", &data.certifications);
    c.strings("achievements", &data.achievements);

    for (i, exp) in data.experience.iter().enumerate() {
        c.text(&format!("experience[{i}].role"), &exp.role);
        c.text(&format!("experience[{i}].company"), &exp.company);
        c.text(&format!("experience[{i}].duration"), &exp.duration);
        c.text(&format!("experience[{i}].description"), &exp.description);
        c.timeframe(&format!("experience[{i}].startDate"), exp.start_date.as_deref());
        c.timeframe(&format!("experience[{i}].endDate"), exp.end_date.as_deref());
    }

    for (i, project) in data.projects.iter().enumerate() {
        c.text(&format!("projects[{i}].title"), &project.title);
        c.text(&format!("projects[{i}].description"), &project.description);
        c.strings(&format!("projects[{i}].techStack"), &project.tech_stack);
    }

    for (i, edu) in data.education.iter().enumerate() {
        c.text(&format!("education[{i}].degree"), &edu.degree);
        c.text(&format!("education[{i}].college"), &edu.college);
        c.text(&format!("education[{i}].year"), &edu.year);
        c.text(&format!("education[{i}].cgpa"), &edu.cgpa);
        c.timeframe(&format!("education[{i}].startDate"), edu.start_date.as_deref());
        c.timeframe(&format!("education[{i}].endDate"), edu.end_date.as_deref());
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !s.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationItem, ExperienceItem, ProjectItem};

    fn input(title: &str) -> ResumeInput {
        ResumeInput {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_input_passes() {
        let r = validate_resume_input(&input("My resume"));
        assert!(r.passed, "{:?}", r.issues);
    }

    #[test]
    fn test_blank_title_fails() {
        let r = validate_resume_input(&input("   "));
        assert!(!r.passed);
        assert_eq!(r.issues[0].field, "title");
    }

    #[test]
    fn test_long_title_fails() {
        let r = validate_resume_input(&input(&"a".repeat(MAX_TITLE_CHARS + 1)));
        assert!(!r.passed);
    }

    #[test]
    fn test_bad_email_fails() {
        let mut i = input("x");
        i.data.personal_info.email = "not-an-email".into();
        let r = validate_resume_input(&i);
        assert!(!r.passed);
        assert_eq!(r.issues[0].field, "personalInfo.email");
    }

    #[test]
    fn test_good_email_passes() {
        let mut i = input("x");
        i.data.personal_info.email = "asha@example.com".into();
        assert!(validate_resume_input(&i).passed);
    }

    #[test]
    fn test_malformed_experience_dates_reported_with_index() {
        let mut i = input("x");
        i.data.experience = vec![
            ExperienceItem {
                start_date: Some("2021-03".into()),
                end_date: Some("present".into()),
                ..Default::default()
            },
            ExperienceItem {
                start_date: Some("March 2021".into()),
                end_date: Some("".into()),
                ..Default::default()
            },
        ];
        let r = validate_resume_input(&i);
        assert!(!r.passed);
        assert_eq!(r.issues.len(), 1);
        assert_eq!(r.issues[0].field, "experience[1].startDate");
    }

    #[test]
    fn test_education_month_out_of_range() {
        let mut i = input("x");
        i.data.education = vec![EducationItem {
            end_date: Some("2020-13".into()),
            ..Default::default()
        }];
        assert!(!validate_resume_input(&i).passed);
    }

    #[test]
    fn test_too_many_items() {
        let mut i = input("x");
        i.data.achievements = vec!["won".to_string(); MAX_LIST_ITEMS + 1];
        let r = validate_resume_input(&i);
        assert!(!r.passed);
        assert_eq!(r.issues[0].field, "achievements");
    }

    #[test]
    fn test_oversized_summary() {
        let mut i = input("x");
        i.data.personal_info.summary = "z".repeat(MAX_TEXT_CHARS + 1);
        assert!(!validate_resume_input(&i).passed);
    }

    #[test]
    fn test_every_text_field_is_length_checked() {
        let long = "x".repeat(MAX_TEXT_CHARS + 1);
        let mut i = input("x");
        i.data.experience = vec![ExperienceItem {
            role: long.clone(),
            company: long.clone(),
            duration: long.clone(),
            ..Default::default()
        }];
        i.data.projects = vec![ProjectItem {
            title: long.clone(),
            tech_stack: vec!["Rust".into(), long.clone()],
            ..Default::default()
        }];
        i.data.education = vec![EducationItem {
            degree: long.clone(),
            college: long.clone(),
            year: long.clone(),
            cgpa: long.clone(),
            ..Default::default()
        }];
        i.data.skills.technical = vec![long.clone()];
        i.data.skills.soft = vec![long.clone()];
        i.data.skills.tools = vec![long.clone()];
        i.data.certifications = vec![long.clone()];
        i.data.achievements = vec!["ok".into(), long];

        let r = validate_resume_input(&i);
        assert!(!r.passed);
        let fields: Vec<&str> = r.issues.iter().map(|issue| issue.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "skills.technical[0]",
                "skills.soft[0]",
                "skills.tools[0]",
                "certifications[0]",
                "achievements[1]",
                "experience[0].role",
                "experience[0].company",
                "experience[0].duration",
                "projects[0].title",
                "projects[0].techStack[1]",
                "education[0].degree",
                "education[0].college",
                "education[0].year",
                "education[0].cgpa",
            ]
        );
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@bco"));
        assert!(!looks_like_email("a b@c.io"));
        assert!(!looks_like_email("a@.io"));
    }
}
