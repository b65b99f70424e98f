//! Formular Core Library
//!
//! This crate provides the domain models, legal-form registry, document
//! requirement resolver, error types and configuration shared across all
//! formular components.

pub mod config;
pub mod constants;
pub mod error;
pub mod legal_form;
pub mod models;
pub mod resolver;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use legal_form::{DocumentType, LegalForm};
pub use resolver::{required_document_slots, DocumentSlot, SlotCondition, WizardAnswers};
pub use storage_types::StorageBackend;
