//! Company registry — the fixed set of companies the interview flow can
//! target. Each entry maps a slug to its display metadata and the folder
//! that holds the company's interview material.
//!
//! The table is compiled in; there is no runtime registration.

pub mod handlers;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyConfig {
    pub folder_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

/// Definition order is the order returned by `available_company_slugs`.
static COMPANIES: &[(&str, CompanyConfig)] = &[
    (
        "accenture",
        CompanyConfig {
            folder_name: "Accenture",
            display_name: "Accenture",
            description: "Global professional services company specialising in consulting, technology and operations.",
        },
    ),
    (
        "capgemini",
        CompanyConfig {
            folder_name: "Capgemini",
            display_name: "Capgemini",
            description: "Consulting, technology services and digital transformation partner headquartered in Paris.",
        },
    ),
    (
        "cognizant",
        CompanyConfig {
            folder_name: "Cognizant",
            display_name: "Cognizant",
            description: "IT services and consulting company focused on digital engineering and modernisation.",
        },
    ),
    (
        "infosys",
        CompanyConfig {
            folder_name: "Infosys",
            display_name: "Infosys",
            description: "Indian multinational providing business consulting, IT and outsourcing services.",
        },
    ),
    (
        "tcs",
        CompanyConfig {
            folder_name: "TCS",
            display_name: "Tata Consultancy Services",
            description: "IT services, consulting and business solutions arm of the Tata Group.",
        },
    ),
    (
        "wipro",
        CompanyConfig {
            folder_name: "Wipro",
            display_name: "Wipro",
            description: "Technology services and consulting company delivering cloud, AI and engineering solutions.",
        },
    ),
];

/// Trims and lower-cases a slug. Idempotent.
pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

/// Looks up a company by slug, ignoring case and surrounding whitespace.
pub fn get_company_config(slug: &str) -> Option<&'static CompanyConfig> {
    let key = normalize_slug(slug);
    COMPANIES
        .iter()
        .find(|(s, _)| *s == key)
        .map(|(_, config)| config)
}

pub fn available_company_slugs() -> Vec<&'static str> {
    COMPANIES.iter().map(|(slug, _)| *slug).collect()
}

pub fn is_valid_company_slug(slug: &str) -> bool {
    get_company_config(slug).is_some()
}

/// All entries paired with their slug, in definition order.
pub fn all_companies() -> impl Iterator<Item = (&'static str, &'static CompanyConfig)> {
    COMPANIES.iter().map(|(slug, config)| (*slug, config))
}
