//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use formular_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Formular API",
        version = "0.1.0",
        description = "Onboarding document service: legal-form resolution, document requirement checklists, document uploads with signed URLs, and server-side PDF form generation."
    ),
    paths(
        handlers::pdf_fill::fill_form,
        handlers::documents::upload_document,
        handlers::documents::get_document_url,
        handlers::documents::delete_document,
        handlers::requirements::get_document_requirements,
        handlers::onboarding::get_onboarding,
        handlers::onboarding::update_onboarding,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::pdf_fill::FillFormRequest,
        handlers::pdf_fill::FillFormResponse,
        handlers::pdf_fill::FormType,
        handlers::documents::DocumentUrlResponse,
        handlers::documents::DeleteDocumentRequest,
        handlers::documents::DeleteDocumentResponse,
        handlers::requirements::DocumentRequirementsResponse,
        handlers::requirements::DocumentSlotResponse,
        handlers::onboarding::UpdateOnboardingRequest,
        models::OnboardingProgress,
        models::UploadedDocument,
        models::DocumentCategory,
    )),
    tags(
        (name = "pdf", description = "Server-side PDF form fill"),
        (name = "documents", description = "Subsidiary document management"),
        (name = "onboarding", description = "Onboarding progress")
    )
)]
pub struct ApiDoc;
