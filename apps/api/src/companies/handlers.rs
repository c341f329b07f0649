use axum::{extract::Path, Json};
use serde::Serialize;

use crate::companies::{all_companies, get_company_config, normalize_slug, CompanyConfig};
use crate::errors::AppError;

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub slug: String,
    #[serde(flatten)]
    pub config: &'static CompanyConfig,
}

/// GET /api/v1/companies
pub async fn handle_list_companies() -> Json<Vec<CompanyResponse>> {
    Json(
        all_companies()
            .map(|(slug, config)| CompanyResponse {
                slug: slug.to_string(),
                config,
            })
            .collect(),
    )
}

/// GET /api/v1/companies/:slug
pub async fn handle_get_company(Path(slug): Path<String>) -> Result<Json<CompanyResponse>, AppError> {
    let config = get_company_config(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Company '{}' not found", slug.trim())))?;
    Ok(Json(CompanyResponse {
        slug: normalize_slug(&slug),
        config,
    }))
}
