//! Markdown export of a saved resume.

use crate::formatting::date::{format_date, format_date_range};
use crate::models::resume::{EducationItem, ExperienceItem, SavedResume};

/// Renders a resume as a markdown document. Empty sections are skipped.
pub fn render_resume_to_md(resume: &SavedResume) -> String {
    let data = &resume.data;
    let info = &data.personal_info;

    let heading = non_empty(&info.name).unwrap_or(resume.title.as_str());
    let mut md = format!("# {heading}\n\n");

    if let Some(job_title) = non_empty(&info.job_title) {
        md.push_str(&format!("**{job_title}**\n\n"));
    }

    let contacts: Vec<&str> = [
        &info.email,
        &info.phone,
        &info.location,
        &info.linkedin,
        &info.github,
    ]
    .into_iter()
    .filter_map(|s| non_empty(s))
    .collect();
    if !contacts.is_empty() {
        md.push_str(&contacts.join(" | "));
        md.push_str("\n\n");
    }

    if let Some(summary) = non_empty(&info.summary) {
        md.push_str("## Summary\n\n");
        md.push_str(summary);
        md.push_str("\n\n");
    }

    let skills = &data.skills;
    if !(skills.technical.is_empty() && skills.soft.is_empty() && skills.tools.is_empty()) {
        md.push_str("## Skills\n\n");
        for (label, items) in [
            ("Technical", &skills.technical),
            ("Tools", &skills.tools),
            ("Soft", &skills.soft),
        ] {
            if !items.is_empty() {
                md.push_str(&format!("- **{label}:** {}\n", items.join(", ")));
            }
        }
        md.push('\n');
    }

    if !data.experience.is_empty() {
        md.push_str("## Experience\n\n");
        for exp in &data.experience {
            md.push_str(&format!("### {} — {}\n", exp.role.trim(), exp.company.trim()));
            let when = experience_timeframe(exp);
            if !when.is_empty() {
                md.push_str(&format!("_{when}_\n"));
            }
            if let Some(description) = non_empty(&exp.description) {
                md.push('\n');
                md.push_str(description);
                md.push('\n');
            }
            md.push('\n');
        }
    }

    if !data.projects.is_empty() {
        md.push_str("## Projects\n\n");
        for project in &data.projects {
            md.push_str(&format!("### {}\n", project.title.trim()));
            if !project.tech_stack.is_empty() {
                md.push_str(&format!("_{}_\n", project.tech_stack.join(", ")));
            }
            if let Some(description) = non_empty(&project.description) {
                md.push('\n');
                md.push_str(description);
                md.push('\n');
            }
            md.push('\n');
        }
    }

    if !data.education.is_empty() {
        md.push_str("## Education\n\n");
        for edu in &data.education {
            let mut line = format!("- **{}**, {}", edu.degree.trim(), edu.college.trim());
            let when = education_timeframe(edu);
            if !when.is_empty() {
                line.push_str(&format!(" ({when})"));
            }
            if let Some(cgpa) = non_empty(&edu.cgpa) {
                line.push_str(&format!(" — CGPA {cgpa}"));
            }
            md.push_str(&line);
            md.push('\n');
        }
        md.push('\n');
    }

    push_bullets(&mut md, "Certifications", &data.certifications);
    push_bullets(&mut md, "Achievements", &data.achievements);

    md
}

/// Prefers the structured range; falls back to whatever the user typed.
fn experience_timeframe(exp: &ExperienceItem) -> String {
    if has_range(exp.start_date.as_deref(), exp.end_date.as_deref()) {
        format_date_range(exp.start_date.as_deref(), exp.end_date.as_deref())
    } else {
        exp.duration.trim().to_string()
    }
}

fn education_timeframe(edu: &EducationItem) -> String {
    if has_range(edu.start_date.as_deref(), edu.end_date.as_deref()) {
        format_date_range(edu.start_date.as_deref(), edu.end_date.as_deref())
    } else {
        format_date(Some(&edu.year))
    }
}

fn has_range(start: Option<&str>, end: Option<&str>) -> bool {
    [start, end]
        .into_iter()
        .flatten()
        .any(|s| !s.trim().is_empty())
}

fn push_bullets(md: &mut String, title: &str, items: &[String]) {
    let items: Vec<&str> = items.iter().filter_map(|s| non_empty(s)).collect();
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("## {title}\n\n"));
    for item in items {
        md.push_str(&format!("- {item}\n"));
    }
    md.push('\n');
}

fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    (!t.is_empty()).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ProjectItem, ResumeData, DEFAULT_TEMPLATE};
    use chrono::Utc;
    use uuid::Uuid;

    fn saved(data: ResumeData) -> SavedResume {
        SavedResume {
            id: Uuid::new_v4(),
            user_id: "user_1".into(),
            title: "Main resume".into(),
            target_role: None,
            template: DEFAULT_TEMPLATE.into(),
            data,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_resume_uses_title_heading() {
        let md = render_resume_to_md(&saved(ResumeData::default()));
        assert_eq!(md, "# Main resume\n\n");
    }

    #[test]
    fn test_experience_range_is_formatted() {
        let mut data = ResumeData::default();
        data.personal_info.name = "Asha Rao".into();
        data.experience.push(ExperienceItem {
            role: "Engineer".into(),
            company: "Acme".into(),
            start_date: Some("2022-01".into()),
            end_date: None,
            ..Default::default()
        });
        let md = render_resume_to_md(&saved(data));
        assert!(md.starts_with("# Asha Rao\n"));
        assert!(md.contains("### Engineer — Acme\n_Jan 2022 \u{2013} Present_\n"));
    }

    #[test]
    fn test_experience_falls_back_to_duration() {
        let mut data = ResumeData::default();
        data.experience.push(ExperienceItem {
            role: "Intern".into(),
            company: "Acme".into(),
            duration: "6 months".into(),
            ..Default::default()
        });
        let md = render_resume_to_md(&saved(data));
        assert!(md.contains("_6 months_"));
    }

    #[test]
    fn test_education_year_and_cgpa() {
        let mut data = ResumeData::default();
        data.education.push(EducationItem {
            degree: "B.Tech".into(),
            college: "NIT".into(),
            year: "2021-05".into(),
            cgpa: "8.9".into(),
            ..Default::default()
        });
        let md = render_resume_to_md(&saved(data));
        assert!(md.contains("- **B.Tech**, NIT (May 2021) — CGPA 8.9\n"));
    }

    #[test]
    fn test_skills_projects_and_lists() {
        let mut data = ResumeData::default();
        data.skills.technical = vec!["Rust".into(), "SQL".into()];
        data.projects.push(ProjectItem {
            title: "Crawler".into(),
            tech_stack: vec!["Rust".into(), "Tokio".into()],
            description: "Fetches pages.".into(),
        });
        data.certifications = vec!["AWS SAA".into(), "  ".into()];
        let md = render_resume_to_md(&saved(data));
        assert!(md.contains("- **Technical:** Rust, SQL\n"));
        assert!(!md.contains("**Soft:**"));
        assert!(md.contains("### Crawler\n_Rust, Tokio_\n\nFetches pages.\n"));
        assert!(md.contains("## Certifications\n\n- AWS SAA\n\n"));
        assert!(!md.contains("## Achievements"));
    }
}
