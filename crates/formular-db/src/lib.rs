//! Database access layer.

pub mod db;

pub use db::{OnboardingRepository, SubsidiaryRepository};
