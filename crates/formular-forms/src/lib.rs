//! Formular Forms Library
//!
//! Pure form-generation pipeline: compiling company/subsidiary/contact data
//! into a flat field set, mapping that set onto the literal PDF form field
//! names of the Bestellformular and the legal-form-specific
//! Dokumentationsbogen variants, and filling AcroForm templates.

pub mod bestellformular;
pub mod compile;
pub mod dokumentationsbogen;
pub mod fill;
pub mod templates;

pub use bestellformular::map_bestellformular;
pub use compile::{compile_form_data, CardType, CompiledFieldSet, DocumentsStepData};
pub use dokumentationsbogen::map_dokumentationsbogen;
pub use fill::{fill_pdf_form, FillError, FillOptions};
pub use templates::{bestellformular_template, dokumentationsbogen_template};
