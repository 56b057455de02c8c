//! Main TUI application loop.
//!
//! Handles:
//! - Input event handling
//! - Background prediction via the worker
//! - Driving the probability counter from wall-clock time
//! - Report export

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::adapters::{HttpPredictor, PdfReportExporter};
use crate::application::{
    render, AssessmentService, PresenterConfig, PresenterState, Ticker, ViewModel,
};
use crate::config::Settings;
use crate::ports::{Predictor, PredictorError, ReportExporter};

use super::ui::render_screen;
use super::worker::{PredictionProgress, PredictionWorker, PredictionWorkerHandle};

/// Main application state
pub struct App<P = HttpPredictor, E = PdfReportExporter>
where
    P: Predictor + 'static,
    E: ReportExporter,
{
    should_quit: bool,
    service: AssessmentService<P>,
    exporter: E,
    config: PresenterConfig,
    vm: ViewModel,
    pending_worker: Option<PredictionWorkerHandle>,
    ticker: Ticker,
    tick: Duration,
    last_frame: Instant,
}

impl App {
    /// Build the application from settings using the HTTP predictor and
    /// the PDF exporter.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let predictor = HttpPredictor::new(settings.predict_url.clone(), settings.timeout);
        let exporter = PdfReportExporter::new(settings.report_dir.clone());
        let config = PresenterConfig {
            risk_threshold: settings.risk_threshold,
            explanation: settings.explanation,
        };

        Self::with_dependencies(
            AssessmentService::new(Arc::new(predictor)),
            exporter,
            config,
            settings.tick,
        )
    }
}

impl<P, E> App<P, E>
where
    P: Predictor + 'static,
    E: ReportExporter,
{
    /// Create the application with injected dependencies.
    pub fn with_dependencies(
        service: AssessmentService<P>,
        exporter: E,
        config: PresenterConfig,
        tick: Duration,
    ) -> Self {
        Self {
            should_quit: false,
            service,
            exporter,
            config,
            vm: ViewModel::new(config),
            pending_worker: None,
            ticker: Ticker::new(tick),
            tick,
            last_frame: Instant::now(),
        }
    }

    /// Current view-model.
    #[must_use]
    pub fn view_model(&self) -> &ViewModel {
        &self.vm
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!(endpoint = self.service.endpoint(), "Prediction service configured");

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        self.vm.form.clear_sensitive();
        result
    }

    fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.poll_worker();
            self.tick_counter(Instant::now());

            let ui = render(&self.vm);
            terminal.draw(|f| render_screen(f, &ui))?;

            // Poll at the counter rate while it runs, otherwise stay lazy
            let timeout = if ui.result.as_ref().is_some_and(|r| r.animating) {
                self.tick
            } else {
                Duration::from_millis(50)
            };
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Drain worker messages into the view-model.
    fn poll_worker(&mut self) {
        loop {
            let Some(worker) = self.pending_worker.as_ref() else {
                return;
            };

            let progress = match worker.try_recv() {
                Ok(p) => p,
                Err(TryRecvError::Empty) => return,
                Err(TryRecvError::Disconnected) => PredictionProgress::Failed(
                    PredictorError::Transport("prediction worker stopped".to_string()),
                ),
            };

            match progress {
                PredictionProgress::Submitted => {
                    tracing::debug!("Prediction request submitted");
                }
                PredictionProgress::Complete(assessment) => {
                    self.pending_worker = None;
                    self.vm.on_success(assessment);
                    self.ticker = Ticker::new(self.tick);
                    self.last_frame = Instant::now();
                }
                PredictionProgress::Failed(e) => {
                    self.pending_worker = None;
                    self.vm.on_failure(&e);
                }
            }
        }
    }

    fn tick_counter(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        if self.vm.state() == PresenterState::ResultShown {
            let steps = self.ticker.due(elapsed);
            self.vm.advance(steps);
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // An open notification swallows everything until acknowledged
        if self.vm.notification().is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                self.vm.dismiss_notification();
            }
            return;
        }

        match self.vm.state() {
            PresenterState::FormActive => self.handle_form_key(key),
            PresenterState::ResultShown => self.handle_result_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.submit();
                return;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        let form = &mut self.vm.form;
        match key {
            KeyCode::Up | KeyCode::BackTab => form.prev_field(),
            KeyCode::Down | KeyCode::Tab => form.next_field(),
            KeyCode::Left => form.cycle_choice(false),
            KeyCode::Right => form.cycle_choice(true),
            KeyCode::Backspace => form.delete_char(),
            KeyCode::Delete => form.clear_field(),
            KeyCode::Char('s') | KeyCode::Char('S') => form.load_sample_data(),
            KeyCode::Char(c) => form.input_char(c),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(' ') | KeyCode::Enter => self.vm.finish_animation(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_report(),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                // Fresh view-model, nothing carries over
                self.vm = ViewModel::new(self.config);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn submit(&mut self) {
        let Some(input) = self.vm.begin_submit() else {
            return;
        };
        let worker = PredictionWorker::spawn(self.service.clone(), input);
        self.pending_worker = Some(worker);
    }

    fn write_report(&self) -> crate::Result<PathBuf> {
        let report = self.vm.report(chrono::Local::now())?;
        Ok(self.exporter.export(&report)?)
    }

    fn export_report(&mut self) {
        match self.write_report() {
            Ok(path) => {
                tracing::info!("Report exported to {}", path.display());
                self.vm
                    .notify("Report saved", path.display().to_string(), false);
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.vm.notify("Export failed", e.to_string(), true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::FakePredictor;
    use crate::application::presenter::SubmitLabel;

    fn app(predictor: FakePredictor, dir: &std::path::Path) -> App<FakePredictor> {
        App::with_dependencies(
            AssessmentService::new(Arc::new(predictor)),
            PdfReportExporter::new(dir),
            PresenterConfig::default(),
            Duration::from_millis(20),
        )
    }

    fn wait_for_worker<P: Predictor + 'static>(app: &mut App<P>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.pending_worker.is_some() && Instant::now() < deadline {
            app.poll_worker();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn press(app: &mut App<FakePredictor>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_submit_shows_result_and_exports() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(FakePredictor::ok(0.72), dir.path());

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.vm.submit().label, SubmitLabel::Processing);

        wait_for_worker(&mut app);
        assert_eq!(app.vm.state(), PresenterState::ResultShown);

        // 72 steps at 20 ms each
        let start = app.last_frame;
        app.tick_counter(start + Duration::from_millis(20 * 72));
        let ui = render(&app.vm);
        assert_eq!(ui.result.expect("Should show result").percent_text, "72%");

        press(&mut app, KeyCode::Char('e'));
        let note = app.vm.notification().expect("Should confirm export");
        assert!(!note.is_error);
        assert!(dir.path().join(crate::adapters::report::REPORT_FILE_NAME).exists());

        press(&mut app, KeyCode::Enter);
        assert!(app.vm.notification().is_none());

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.vm.state(), PresenterState::FormActive);
        assert_eq!(app.vm.submit().label, SubmitLabel::Predict);
    }

    #[test]
    fn test_export_failure_keeps_result() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").expect("Should create file");
        let mut app = app(FakePredictor::ok(0.72), &blocker.join("reports"));

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        wait_for_worker(&mut app);
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Char('e'));
        let note = app.vm.notification().expect("Should report the failure");
        assert!(note.is_error);
        assert_eq!(note.title, "Export failed");
        assert!(note.message.starts_with("Report export failed: Report I/O failed:"));
        assert_eq!(app.vm.state(), PresenterState::ResultShown);
        assert!(!blocker.join("reports").exists());

        // Dismissing returns to the same result
        press(&mut app, KeyCode::Enter);
        assert!(app.vm.notification().is_none());
        assert_eq!(app.vm.state(), PresenterState::ResultShown);
        assert!(app.vm.result().is_some());
    }

    #[test]
    fn test_failure_blocks_until_dismissed() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(FakePredictor::failing(PredictorError::Status(500)), dir.path());

        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Enter);
        wait_for_worker(&mut app);

        assert_eq!(app.vm.state(), PresenterState::FormActive);
        assert!(app.vm.notification().is_some());
        assert_eq!(app.vm.submit().label, SubmitLabel::TryAgain);

        // Typing is ignored while the notification is open
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.vm.form.fields[0].display(), "63");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
        assert!(app.pending_worker.is_some());
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let mut app = app(FakePredictor::ok(0.1), dir.path());
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
