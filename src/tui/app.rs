use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::controller::{ContactForm, Refusal};
use crate::submit::{ChallengeProvider, SubmitError, Transport, obtain_token};

use super::action::Action;
use super::error::AppError;
use super::screens::{draw_contact, handle_key};

/// How long the loop waits for input before advancing timers.
const TICK: Duration = Duration::from_millis(100);

type Outcome = Result<(), SubmitError>;

/// Top-level application state.
///
/// Submissions run on the tokio runtime; their outcomes come back over a
/// channel and are applied on the UI thread between frames.
pub struct App {
    form: ContactForm,
    runtime: Handle,
    transport: Arc<dyn Transport>,
    challenge: Option<Arc<dyn ChallengeProvider>>,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    should_quit: bool,
}

impl App {
    pub fn new(
        form: ContactForm,
        runtime: Handle,
        transport: Arc<dyn Transport>,
        challenge: Option<Arc<dyn ChallengeProvider>>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            form,
            runtime,
            transport,
            challenge,
            outcome_tx,
            outcome_rx,
            should_quit: false,
        }
    }

    /// Main event loop: draw → poll input → dispatch → apply outcomes → tick.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
            self.drain_outcomes();
            self.form.tick(Instant::now());
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        draw_contact(&self.form, frame, frame.area());
    }

    /// Handles a key event: global keys first, then the screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match handle_key(&mut self.form, key) {
            Action::None => {}
            Action::Submit => self.start_submit(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Validates and, if allowed, sends the form in the background.
    fn start_submit(&mut self) {
        let submission = match self.form.begin_submit() {
            Ok(submission) => submission,
            Err(Refusal::Busy) => return,
            Err(refusal) => {
                tracing::debug!(?refusal, "submission not sent");
                return;
            }
        };

        let transport = Arc::clone(&self.transport);
        let challenge = self.challenge.clone();
        let site_key = self.form.config().challenge_site_key().map(str::to_string);
        let limit = self.form.config().challenge_timeout();
        let outcome_tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let token = obtain_token(site_key.as_deref(), challenge.as_deref(), limit).await;
            let result = transport.send(&submission.with_token(token)).await;
            // The receiver only goes away when the app is shutting down.
            let _ = outcome_tx.send(result);
        });
    }

    /// Applies every submission outcome that has arrived.
    pub fn drain_outcomes(&mut self) {
        while let Ok(result) = self.outcome_rx.try_recv() {
            self.form.finish_submit(result);
        }
    }

    /// Returns the form controller.
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::*;
    use crate::clipboard::{Clipboard, ClipboardError};
    use crate::config::Config;
    use crate::model::{Control, SubmissionStatus};
    use crate::storage::MemoryStore;
    use crate::submit::Submission;

    struct CountingTransport {
        accept: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn send(&self, _submission: &Submission) -> Result<(), SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.accept {
                Ok(())
            } else {
                Err(SubmitError::Rejected {
                    status: 500,
                    message: None,
                })
            }
        }
    }

    struct NoClipboard;

    impl Clipboard for NoClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    fn make_app(accept: bool) -> (Arc<CountingTransport>, App) {
        let transport = Arc::new(CountingTransport {
            accept,
            calls: AtomicUsize::new(0),
        });
        let form = ContactForm::mount(
            Config::default(),
            Box::new(MemoryStore::new()),
            Box::new(NoClipboard),
        );
        let app = App::new(form, Handle::current(), transport.clone(), None);
        (transport, app)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    fn type_string(app: &mut App, s: &str) {
        for ch in s.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn fill_valid(app: &mut App) {
        type_string(app, "Jo");
        app.handle_key(press(KeyCode::Tab));
        type_string(app, "jo@x.com");
        app.handle_key(press(KeyCode::Tab));
        type_string(app, "Hello there!");
    }

    /// Waits for the background submission and applies it.
    async fn settle(app: &mut App) {
        let result = app.outcome_rx.recv().await.unwrap();
        app.form.finish_submit(result);
    }

    #[tokio::test]
    async fn starts_on_name_field() {
        let (_transport, app) = make_app(true);
        assert_eq!(app.form().focused(), Control::Name);
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn esc_quits() {
        let (_transport, mut app) = make_app(true);
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn ctrl_c_quits_even_with_modal_open() {
        let (_transport, mut app) = make_app(true);
        fill_valid(&mut app);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        settle(&mut app).await;
        assert!(app.form().is_thanks_open());
        app.handle_key(press(KeyCode::Esc));
        assert!(!app.should_quit());
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn release_events_are_ignored() {
        let (_transport, mut app) = make_app(true);
        app.handle_key(release(KeyCode::Char('x')));
        app.handle_key(release(KeyCode::Esc));
        assert!(app.form().fields().is_blank());
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn invalid_submit_sends_nothing() {
        let (transport, mut app) = make_app(true);
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.form().status(), SubmissionStatus::Idle);
        assert!(app.form().toast().is_some());
        app.drain_outcomes();
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_submit_runs_in_background() {
        let (transport, mut app) = make_app(true);
        fill_valid(&mut app);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.form().status(), SubmissionStatus::Loading);

        // Single-flight: a second trigger while loading is dropped.
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        settle(&mut app).await;
        assert_eq!(app.form().status(), SubmissionStatus::Success);
        assert!(app.form().fields().is_blank());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_submit_keeps_input() {
        let (_transport, mut app) = make_app(false);
        fill_valid(&mut app);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        settle(&mut app).await;
        assert_eq!(app.form().status(), SubmissionStatus::Error);
        assert_eq!(app.form().fields().message, "Hello there!");
    }
}
