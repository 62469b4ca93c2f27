//! DocChat TUI Entry Point
//!
//! Launches the terminal UI for chatting with your PDFs.
//!
//! Usage:
//!   docchat-tui [OPTIONS] [FILES...]
//!
//! Options:
//!   --base-url <URL>  Server base URL (default: http://localhost:8000)
//!
//! Any trailing PDF paths are staged immediately, like dropping them onto
//! the upload screen.

use std::io;
use std::panic;
use std::path::PathBuf;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docchat_core::ConfigOverrides;
use docchat_tui::App;

/// Parsed command-line arguments.
struct CliArgs {
    overrides: ConfigOverrides,
    initial_files: Vec<PathBuf>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut overrides = ConfigOverrides::new();
    let mut initial_files = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base-url" => {
                let url = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--base-url requires a value"))?;
                overrides = overrides.with_base_url(url);
            }
            "--no-health-check" => {
                overrides = overrides.with_health_check_on_start(false);
            }
            "--help" | "-h" => {
                println!("Usage: docchat-tui [OPTIONS] [FILES...]");
                println!();
                println!("Options:");
                println!("  --base-url <URL>    Server base URL (default: http://localhost:8000)");
                println!("  --no-health-check   Skip the startup backend probe");
                std::process::exit(0);
            }
            other if other.starts_with("--") => {
                anyhow::bail!("unknown option: {other}");
            }
            path => initial_files.push(PathBuf::from(path)),
        }
    }

    Ok(CliArgs {
        overrides,
        initial_files,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: docchat-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  - Running in a non-interactive environment (CI, container)");
        eprintln!("  - SSH without -t flag");
        eprintln!("  - Piped stdin/stdout");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, args).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    args: CliArgs,
) -> anyhow::Result<()> {
    let mut app = App::new(args.overrides, args.initial_files)?;
    app.run(terminal).await
}
