#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::fs::{self, File, OpenOptions};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use pvs_contact::clipboard::SystemClipboard;
use pvs_contact::config::Config;
use pvs_contact::controller::{ContactForm, Refusal};
use pvs_contact::model::{Field, SubmissionStatus};
use pvs_contact::storage::{FileStore, KeyValueStore, MemoryStore, delete_draft};
use pvs_contact::submit::{ChallengeProvider, CommandChallenge, HttpTransport, Transport};
use pvs_contact::tui::App;

/// Contact form for Premier Virtual Solutions.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (defaults to the XDG config dir).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file (defaults to the XDG data dir).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a message without opening the form.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long, hide = true, default_value = "")]
        company: String,
    },
    /// Delete the saved draft.
    ClearDraft,
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("pvs-contact: logging disabled: {e}");
    }

    let config = Config::load(cli.config.as_deref())?;
    let runtime = Runtime::new()?;
    let transport = {
        let _guard = runtime.enter();
        Arc::new(HttpTransport::new(
            config.endpoint.clone(),
            config.submit_timeout(),
        )?)
    };
    let challenge: Option<Arc<dyn ChallengeProvider>> = config
        .challenge_command
        .as_deref()
        .map(|program| Arc::new(CommandChallenge::new(program)) as Arc<dyn ChallengeProvider>);

    match cli.command {
        None => {
            let form = ContactForm::mount(
                config,
                open_store(),
                Box::new(SystemClipboard::new()),
            );
            let app = App::new(form, runtime.handle().clone(), transport, challenge);
            run_tui(app)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Send {
            name,
            email,
            message,
            company,
        }) => {
            // Headless sends never touch the interactive draft.
            let mut form = ContactForm::mount(
                config,
                Box::new(MemoryStore::new()),
                Box::new(SystemClipboard::new()),
            );
            form.on_field_change(Field::Name, name);
            form.on_field_change(Field::Email, email);
            form.on_field_change(Field::Message, message);
            form.set_honeypot(company);
            let outcome = runtime.block_on(form.submit(
                transport.as_ref() as &dyn Transport,
                challenge.as_deref(),
            ));
            Ok(report_send(&form, outcome))
        }
        Some(Command::ClearDraft) => {
            let store = open_store();
            delete_draft(store.as_ref(), &config.draft_storage_key);
            println!("Draft cleared");
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn init_logging(explicit: Option<&Path>) -> Result<(), io::Error> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match dirs::data_dir() {
            Some(dir) => dir.join("pvs-contact").join("pvs-contact.log"),
            None => return Ok(()),
        },
    };
    let file = open_log_file(&path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> Result<File, io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn open_store() -> Box<dyn KeyValueStore> {
    match FileStore::new() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "draft storage unavailable, drafts will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn report_send(form: &ContactForm, outcome: Result<SubmissionStatus, Refusal>) -> ExitCode {
    match outcome {
        Ok(SubmissionStatus::Success) => {
            println!("{}", form.submit_message().unwrap_or_default());
            ExitCode::SUCCESS
        }
        Ok(_) => {
            eprintln!("{}", form.submit_message().unwrap_or_default());
            ExitCode::FAILURE
        }
        Err(Refusal::Invalid) => {
            for (field, error) in form.errors().iter() {
                eprintln!("{field}: {error}");
            }
            ExitCode::from(2)
        }
        Err(Refusal::Trapped) => ExitCode::SUCCESS,
        Err(Refusal::Busy) => ExitCode::FAILURE,
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = app.run(&mut terminal);

    let restore_result = restore_terminal();
    match result {
        Err(e) => Err(e.into()),
        Ok(()) => restore_result.map_err(Into::into),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn restore_terminal() -> Result<(), io::Error> {
    let raw_result = disable_raw_mode();
    let screen_result = execute!(stdout(), LeaveAlternateScreen);
    raw_result.and(screen_result)
}
