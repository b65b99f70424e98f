//! HTTP handlers, one module per resource.

pub mod documents;
pub mod onboarding;
pub mod pdf_fill;
pub mod requirements;
