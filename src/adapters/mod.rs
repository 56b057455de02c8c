//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external libraries:
//! - `http`: ureq client for the prediction service
//! - `report`: paginated PDF report on disk (printpdf)
//! - `sanitize`: PII filtering for logs

pub mod http;
pub mod report;
pub mod sanitize;

pub use http::HttpPredictor;
pub use report::PdfReportExporter;
