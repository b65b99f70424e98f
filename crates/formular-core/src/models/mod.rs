//! Data models for the application
//!
//! This module contains the data structures shared across the service,
//! organized by domain: company/subsidiary/contact master data, uploaded
//! document metadata, and the onboarding progress record.

mod company;
mod onboarding;
mod upload;

// Re-export all models for convenient imports
pub use company::*;
pub use onboarding::*;
pub use upload::*;
