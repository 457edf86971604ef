//! Waystep - terminal multi-step form wizard

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use waystep::app::{App, AppMessage};
use waystep::constants;
use waystep::definition::WizardDefinition;
use waystep::ui::{self, render::DefaultRenderer};
use waystep::wizard::{FieldValues, Finisher, FinisherFuture};

/// Terminal multi-step form wizard
#[derive(Parser)]
#[command(name = "waystep")]
#[command(version = "1.0.0")]
#[command(about = "Multi-step form wizard - collects validated answers and submits one merged payload")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a wizard
    Run {
        /// Wizard definition file (defaults to ./waystep.toml, then the
        /// built-in demo)
        #[arg(short, long)]
        definition: Option<PathBuf>,
        /// Where to write the merged submission payload
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a wizard definition without launching the TUI
    Check {
        /// Wizard definition file
        #[arg(short, long)]
        definition: PathBuf,
    },
    /// Print the built-in demo definition
    Sample,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging to file; the TUI owns the terminal.
    let log_dir = dirs::data_local_dir()
        .map(|d| d.join("waystep"))
        .unwrap_or_else(|| PathBuf::from("/tmp/waystep"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "waystep.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!("waystep starting");

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { definition }) => check_definition(&definition),
        Some(Commands::Sample) => {
            print!("{}", WizardDefinition::sample_toml());
            Ok(())
        }
        Some(Commands::Run { definition, output }) => run_wizard(definition, output).await,
        None => run_wizard(None, None).await,
    }
}

/// Headless definition lint: print the outline, fail on invalid documents.
fn check_definition(path: &Path) -> Result<()> {
    let definition = WizardDefinition::load(path)
        .with_context(|| format!("invalid definition {}", path.display()))?;
    for line in definition.summary_lines() {
        println!("{line}");
    }
    println!("definition OK");
    Ok(())
}

/// Resolve the definition, build the app, and run the TUI.
async fn run_wizard(definition: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let definition = match definition {
        Some(path) => WizardDefinition::load(&path)
            .with_context(|| format!("invalid definition {}", path.display()))?,
        None => {
            let local = PathBuf::from(constants::LOCAL_DEFINITION_FILE);
            if local.exists() {
                WizardDefinition::load(&local)
                    .with_context(|| format!("invalid definition {}", local.display()))?
            } else {
                WizardDefinition::sample()
            }
        }
    };

    let output_path = output
        .or_else(|| definition.wizard.output.clone())
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_FILE));

    let finisher = json_file_finisher(definition.wizard.title.clone(), output_path.clone());
    let app = App::new(&definition, output_path, finisher)?;
    run_tui(app).await
}

/// The default finisher: merge envelope written as pretty JSON.
fn json_file_finisher(title: String, path: PathBuf) -> Finisher {
    Arc::new(move |payload: FieldValues| {
        let title = title.clone();
        let path = path.clone();
        Box::pin(async move { write_payload(&path, &title, payload).await }) as FinisherFuture
    })
}

async fn write_payload(path: &Path, title: &str, values: FieldValues) -> Result<bool> {
    let envelope = serde_json::json!({
        "wizard": title,
        "submitted_at": chrono::Utc::now().to_rfc3339(),
        "values": values,
    });
    let body = serde_json::to_string_pretty(&envelope)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "submission payload written");
    Ok(true)
}

async fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create the message channel for submission settlements
    let (msg_tx, mut msg_rx) = mpsc::channel::<AppMessage>(constants::MESSAGE_CHANNEL_SIZE);
    app.set_message_sender(msg_tx);

    // Run the app
    let result = run_app(&mut terminal, &mut app, &mut msg_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        return Err(err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    msg_rx: &mut mpsc::Receiver<AppMessage>,
) -> Result<()> {
    let renderer = DefaultRenderer;

    // Async event stream for responsive input
    let mut event_stream = EventStream::new();

    loop {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app, &renderer))?;

        let timeout = Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS);

        tokio::select! {
            biased;  // Prioritize in order: keys, settlements, timeout

            // Terminal key events (instant response)
            Some(Ok(event)) = event_stream.next() => {
                if let Event::Key(key) = event {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }
            // Submission settlements from the finisher task
            Some(msg) = msg_rx.recv() => {
                app.handle_message(msg);
            }
            // Timeout for spinner animation and redraw
            _ = tokio::time::sleep(timeout) => {}
        }

        // Update spinner animation
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
