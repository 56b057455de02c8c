//! Headless one-shot assessment.
//!
//! Reads a clinical input JSON document, asks the configured prediction
//! service for a probability and prints the outcome. With `--report-dir`
//! the PDF report is written as well.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin assess -- --input patient.json [--report-dir <dir>]
//! ```
//!
//! The input uses the form's field names:
//!
//! ```json
//! {"age": 63, "sex": "M", "chestPain": "ATA", "restingBP": 145,
//!  "cholesterol": 233, "fastingBS": 1, "restingECG": "Normal",
//!  "maxHR": 150, "angina": "N", "oldpeak": 2.3, "slope": "Up",
//!  "heartDisease": 0}
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiopulse::adapters::sanitize::SanitizingMakeWriter;
use cardiopulse::adapters::{HttpPredictor, PdfReportExporter};
use cardiopulse::application::{AssessmentService, PresenterConfig, ViewModel};
use cardiopulse::config::Settings;
use cardiopulse::domain::ClinicalInput;
use cardiopulse::ports::ReportExporter;
use cardiopulse::{CardioPulseError, Result};

#[derive(Debug)]
struct Args {
    input: PathBuf,
    report_dir: Option<PathBuf>,
}

fn usage() -> String {
    "Usage: assess --input <file.json> [--report-dir <dir>]".to_string()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> std::result::Result<Args, String> {
    let mut input: Option<PathBuf> = None;
    let mut report_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" | "-i" => {
                let v = args.next().ok_or_else(usage)?;
                input = Some(PathBuf::from(v));
            }
            "--report-dir" => {
                let v = args.next().ok_or_else(usage)?;
                report_dir = Some(PathBuf::from(v));
            }
            _ => return Err(usage()),
        }
    }

    let input = input.ok_or_else(usage)?;
    Ok(Args { input, report_dir })
}

fn run(args: &Args, settings: &Settings) -> Result<()> {
    let raw = fs::read_to_string(&args.input)?;
    let input: ClinicalInput = serde_json::from_str(&raw)?;

    let predictor = HttpPredictor::new(settings.predict_url.clone(), settings.timeout);
    let service = AssessmentService::new(Arc::new(predictor));
    let assessment = service.assess(input)?;

    let mut vm = ViewModel::new(PresenterConfig {
        risk_threshold: settings.risk_threshold,
        explanation: settings.explanation,
    });
    vm.on_success(assessment);
    vm.finish_animation();

    let report = vm.report(chrono::Local::now())?;
    println!("{} ({})", report.risk_label, report.probability);
    for factor in &report.factors {
        println!("  - {factor}");
    }

    if let Some(dir) = &args.report_dir {
        let path = PdfReportExporter::new(dir.clone()).export(&report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(std::io::stderr)))
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    let outcome = Settings::from_env()
        .map_err(CardioPulseError::from)
        .and_then(|settings| run(&args, &settings));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error ({}): {e}", args.input.display());
            ExitCode::FAILURE
        }
    }
}
