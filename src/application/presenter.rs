//! Presenter: the view-model behind both front ends.
//!
//! The view-model owns the form, the submit control and, once a prediction
//! arrives, the result panel. [`render`] maps it to a [`UiDescription`]
//! without touching any terminal, so every transition is testable.
//!
//! ```text
//!   FormActive --(prediction ok)--> ResultShown
//!       ^   |
//!       +---+ (prediction failed: notify, "Try Again")
//! ```

use crate::domain::{
    explain, Comparison, ExplanationThresholds, PredictionResult, RiskThreshold, RiskTier,
};
use crate::ports::{PredictorError, Report, ReportError, ReportVitals};

use super::animation::{stroke_offset, ProbabilityCounter};
use super::assessment::Assessment;
use super::form::ClinicalForm;

/// Which half of the screen is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    FormActive,
    ResultShown,
}

/// Label of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitLabel {
    Predict,
    Processing,
    TryAgain,
}

impl SubmitLabel {
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self {
            Self::Predict => "Predict Risk",
            Self::Processing => "Processing...",
            Self::TryAgain => "Try Again",
        }
    }
}

/// The submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: SubmitLabel,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SubmitLabel::Predict,
        }
    }
}

/// Blocking message that must be acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub is_error: bool,
}

/// Result panel state, present only in `ResultShown`.
#[derive(Debug, Clone)]
pub struct ResultPanel {
    assessment: Assessment,
    counter: ProbabilityCounter,
}

impl ResultPanel {
    #[must_use]
    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    #[must_use]
    pub fn counter(&self) -> &ProbabilityCounter {
        &self.counter
    }
}

/// Thresholds the presenter classifies with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PresenterConfig {
    pub risk_threshold: RiskThreshold,
    pub explanation: ExplanationThresholds,
}

/// Typed view-model.
#[derive(Debug, Clone)]
pub struct ViewModel {
    config: PresenterConfig,
    pub form: ClinicalForm,
    submit: SubmitControl,
    notification: Option<Notification>,
    result: Option<ResultPanel>,
}

impl ViewModel {
    #[must_use]
    pub fn new(config: PresenterConfig) -> Self {
        Self {
            config,
            form: ClinicalForm::default(),
            submit: SubmitControl::default(),
            notification: None,
            result: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> PresenterState {
        if self.result.is_some() {
            PresenterState::ResultShown
        } else {
            PresenterState::FormActive
        }
    }

    #[must_use]
    pub fn submit(&self) -> SubmitControl {
        self.submit
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&ResultPanel> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> PresenterConfig {
        self.config
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.submit.label == SubmitLabel::Processing
    }

    /// Start a submission: snapshot the form and disable the control.
    ///
    /// Returns `None` when the control is disabled, a notification is
    /// open, or the result is already shown.
    pub fn begin_submit(&mut self) -> Option<crate::domain::ClinicalInput> {
        if self.state() != PresenterState::FormActive
            || !self.submit.enabled
            || self.notification.is_some()
        {
            return None;
        }

        self.submit = SubmitControl {
            enabled: false,
            label: SubmitLabel::Processing,
        };
        Some(self.form.snapshot())
    }

    /// A prediction arrived: show the result and start the counter.
    pub fn on_success(&mut self, assessment: Assessment) {
        if self.state() == PresenterState::ResultShown {
            return;
        }

        let target = assessment.result.percent();
        tracing::debug!(target, "Showing result");

        self.result = Some(ResultPanel {
            assessment,
            counter: ProbabilityCounter::new(target),
        });
        self.submit = SubmitControl {
            enabled: false,
            label: SubmitLabel::Processing,
        };
        self.notification = None;
        self.form.clear_sensitive();
    }

    /// The prediction failed: stay on the form and offer a retry.
    pub fn on_failure(&mut self, error: &PredictorError) {
        if self.state() == PresenterState::ResultShown {
            return;
        }

        self.notification = Some(Notification {
            title: "Error".to_string(),
            message: format!("Check that the prediction service is running! ({error})"),
            is_error: true,
        });
        self.submit = SubmitControl {
            enabled: true,
            label: SubmitLabel::TryAgain,
        };
    }

    /// Show an informational notification (e.g. where a report went).
    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>, is_error: bool) {
        self.notification = Some(Notification {
            title: title.into(),
            message: message.into(),
            is_error,
        });
    }

    /// Acknowledge the open notification.
    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Advance the counter by `steps` ticks; returns true if it moved.
    pub fn advance(&mut self, steps: u32) -> bool {
        match &mut self.result {
            Some(panel) => panel.counter.advance(steps) > 0,
            None => false,
        }
    }

    /// Jump the counter to its final value.
    pub fn finish_animation(&mut self) {
        if let Some(panel) = &mut self.result {
            panel.counter.finish();
        }
    }

    /// Assemble the exportable report.
    ///
    /// # Errors
    /// Returns `ReportError::NotReady` before a result is shown.
    pub fn report(
        &self,
        generated_at: chrono::DateTime<chrono::Local>,
    ) -> Result<Report, ReportError> {
        let panel = self.result.as_ref().ok_or(ReportError::NotReady)?;
        let input = &panel.assessment.input;
        let tier = panel.assessment.result.tier(self.config.risk_threshold);

        Ok(Report {
            generated_at,
            vitals: ReportVitals {
                age: format_vital(input.age),
                sex: crate::domain::Category::label(input.sex).to_string(),
                resting_bp: format_vital(input.resting_bp),
                cholesterol: format_vital(input.cholesterol),
                max_hr: format_vital(input.max_hr),
            },
            tier,
            risk_label: tier.badge().to_string(),
            probability: format!("{}%", panel.assessment.result.percent()),
            factors: explain(input, &self.config.explanation),
        })
    }
}

fn format_vital(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// One form row as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub is_choice: bool,
    pub selected: bool,
}

/// Result panel as it should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub tier: RiskTier,
    pub badge: &'static str,
    pub description: &'static str,
    pub percent: u8,
    pub percent_text: String,
    pub stroke_offset: f64,
    pub animating: bool,
    pub comparison: Comparison,
    pub explanations: Vec<String>,
    pub prediction: PredictionResult,
}

/// Everything the UI shows, derived from a [`ViewModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct UiDescription {
    pub state: PresenterState,
    pub form_visible: bool,
    pub fields: Vec<FieldView>,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub notification: Option<Notification>,
    pub result: Option<ResultView>,
    pub export_enabled: bool,
}

/// Map the view-model to a UI description.
#[must_use]
pub fn render(vm: &ViewModel) -> UiDescription {
    let state = vm.state();
    let form_visible = state == PresenterState::FormActive;

    let fields = if form_visible {
        vm.form
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| FieldView {
                label: f.label,
                hint: f.hint,
                value: f.display(),
                is_choice: f.is_choice(),
                selected: i == vm.form.selected_field,
            })
            .collect()
    } else {
        Vec::new()
    };

    let result = vm.result.as_ref().map(|panel| {
        let assessment = &panel.assessment;
        let tier = assessment.result.tier(vm.config.risk_threshold);
        let current = panel.counter.current();
        ResultView {
            tier,
            badge: tier.badge(),
            description: tier.description(),
            percent: current,
            percent_text: format!("{current}%"),
            stroke_offset: stroke_offset(current),
            animating: !panel.counter.is_done(),
            comparison: Comparison::from_input(&assessment.input),
            explanations: explain(&assessment.input, &vm.config.explanation),
            prediction: assessment.result,
        }
    });

    UiDescription {
        state,
        form_visible,
        fields,
        submit_label: vm.submit.label.text(),
        submit_enabled: vm.submit.enabled,
        notification: vm.notification.clone(),
        export_enabled: result.is_some(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::animation::circumference;
    use crate::domain::PredictionResult;

    fn submitted() -> (ViewModel, crate::domain::ClinicalInput) {
        let mut vm = ViewModel::new(PresenterConfig::default());
        vm.form.load_sample_data();
        let input = vm.begin_submit().expect("Should submit");
        (vm, input)
    }

    #[test]
    fn test_initial_state() {
        let vm = ViewModel::new(PresenterConfig::default());
        let ui = render(&vm);
        assert_eq!(ui.state, PresenterState::FormActive);
        assert!(ui.form_visible);
        assert_eq!(ui.fields.len(), 12);
        assert!(ui.fields[0].selected);
        assert_eq!(ui.submit_label, "Predict Risk");
        assert!(ui.submit_enabled);
        assert!(ui.result.is_none());
        assert!(!ui.export_enabled);
    }

    #[test]
    fn test_pending_disables_submit() {
        let (mut vm, _) = submitted();
        let ui = render(&vm);
        assert_eq!(ui.submit_label, "Processing...");
        assert!(!ui.submit_enabled);
        assert!(vm.is_pending());

        // A second submission is refused while pending
        assert!(vm.begin_submit().is_none());
    }

    #[test]
    fn test_high_risk_result() {
        let (mut vm, input) = submitted();
        vm.on_success(Assessment {
            input,
            result: PredictionResult::new(0.72),
        });

        let ui = render(&vm);
        assert_eq!(ui.state, PresenterState::ResultShown);
        assert!(!ui.form_visible);
        assert!(ui.fields.is_empty());
        assert!(ui.export_enabled);

        let result = ui.result.expect("Should show result");
        assert_eq!(result.badge, "HIGH RISK");
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(result.percent_text, "0%");
        assert!(result.animating);
        assert!((result.stroke_offset - circumference()).abs() < 1e-9);
        assert_eq!(result.explanations.len(), 3);

        while vm.advance(1) {}
        let result = render(&vm).result.expect("Should show result");
        assert_eq!(result.percent_text, "72%");
        assert!(!result.animating);
        assert!((result.stroke_offset - circumference() * 0.28).abs() < 1e-9);
    }

    #[test]
    fn test_low_risk_result() {
        let (mut vm, input) = submitted();
        vm.on_success(Assessment {
            input,
            result: PredictionResult::new(0.31),
        });
        vm.finish_animation();

        let result = render(&vm).result.expect("Should show result");
        assert_eq!(result.badge, "LOW RISK");
        assert_eq!(result.description, "Metrics are within healthy ranges.");
        assert_eq!(result.percent_text, "31%");
    }

    #[test]
    fn test_failure_keeps_form_and_offers_retry() {
        let (mut vm, _) = submitted();
        vm.on_failure(&PredictorError::Status(500));

        let ui = render(&vm);
        assert_eq!(ui.state, PresenterState::FormActive);
        assert!(ui.form_visible);
        assert_eq!(ui.submit_label, "Try Again");
        assert!(ui.submit_enabled);
        let note = ui.notification.expect("Should notify");
        assert!(note.is_error);
        assert!(note.message.contains("500"));

        // Form values survive for the retry
        assert_eq!(ui.fields[0].value, "63");

        // The notification blocks until dismissed
        assert!(vm.begin_submit().is_none());
        vm.dismiss_notification();
        assert!(vm.begin_submit().is_some());
    }

    #[test]
    fn test_result_is_one_way() {
        let (mut vm, input) = submitted();
        vm.on_success(Assessment {
            input: input.clone(),
            result: PredictionResult::new(0.72),
        });

        vm.on_failure(&PredictorError::Transport("late".to_string()));
        assert_eq!(vm.state(), PresenterState::ResultShown);
        assert!(vm.notification().is_none());
        assert!(vm.begin_submit().is_none());

        vm.on_success(Assessment {
            input,
            result: PredictionResult::new(0.10),
        });
        let panel = vm.result().expect("Should keep result");
        assert_eq!(panel.counter().target(), 72);
    }

    #[test]
    fn test_report_requires_result() {
        let vm = ViewModel::new(PresenterConfig::default());
        assert!(matches!(
            vm.report(chrono::Local::now()),
            Err(ReportError::NotReady)
        ));
    }

    #[test]
    fn test_report_contents() {
        let (mut vm, input) = submitted();
        vm.on_success(Assessment {
            input,
            result: PredictionResult::new(0.72),
        });

        let report = vm.report(chrono::Local::now()).expect("Should build report");
        assert_eq!(report.tier, RiskTier::High);
        assert_eq!(report.risk_label, "HIGH RISK");
        assert_eq!(report.probability, "72%");
        assert_eq!(report.vitals.age, "63");
        assert_eq!(report.vitals.sex, "Male");
        assert_eq!(report.vitals.resting_bp, "145");
        assert_eq!(report.vitals.max_hr, "150");
        assert_eq!(
            report.factors,
            vec![
                "Resting blood pressure above normal range".to_string(),
                "ST depression indicates ischemia risk".to_string(),
                "Age above average cardiac risk threshold".to_string(),
            ]
        );
    }
}
