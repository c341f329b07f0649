// Saved resumes: CRUD over the store seam, boundary validation, markdown
// export and PDF import.

pub mod handlers;
pub mod import;
pub mod render;
pub mod store;
pub mod validation;
