//! Domain services behind the route handlers.

pub mod content;
pub mod dashboard;
pub mod images;
pub mod insights;
pub mod prompts;
pub mod social;
