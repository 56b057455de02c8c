//! Application layer: Use cases and view state.
//!
//! This module wires domain logic to the ports and holds the state both
//! front ends render from.

pub mod animation;
mod assessment;
mod form;
pub mod presenter;

pub use animation::{ProbabilityCounter, Ticker};
pub use assessment::{Assessment, AssessmentService};
pub use form::{ClinicalForm, FieldKey, FieldValue, FormField};
pub use presenter::{render, PresenterConfig, PresenterState, UiDescription, ViewModel};

#[cfg(test)]
pub(crate) use assessment::fakes;
