//! Database repositories for data access layer
//!
//! Each repository owns one domain entity. Repositories are cheap to clone
//! and hold a connection pool handle.

pub mod onboarding;
pub mod subsidiary;

pub use onboarding::OnboardingRepository;
pub use subsidiary::SubsidiaryRepository;
