//! Content validation: engine boundary, built-in HTML engine, and the
//! concurrent per-capture validator.

mod content;
mod engine;
pub mod html;

pub use content::ContentValidator;
pub use engine::{EngineMessage, EngineReport, EngineResult, ValidationEngine, SEVERITY_ERROR};
pub use html::HtmlEngine;
