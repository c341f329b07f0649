use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::Config;
use crate::interview::retell::CallRegistrar;
use crate::resumes::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The three external collaborators sit behind trait objects so the router
/// can be exercised against in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub resumes: Arc<dyn ResumeStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub calls: Arc<dyn CallRegistrar>,
    pub config: Config,
}
