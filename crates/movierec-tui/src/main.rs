use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use movierec_core::{Config, HttpMovieApi, MovieApi, Route, config_file};

mod action;
mod app;
mod backend;
mod input;
mod logging;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

/// movierec: pick five movies you like, get recommendations for more.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Recommendation API origin (default: http://localhost:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds; 0 disables it
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Color theme: dark (default) or light
    #[arg(long)]
    theme: Option<String>,

    /// Route to open at startup, e.g. "/recommendations?movies=1,2,3,4,5"
    #[arg(long)]
    open: Option<Route>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: file logging disabled: {e}");
            None
        }
    };

    // Resolve config from CLI flags > env vars > config file > defaults
    let file = config_file::load_config();
    let mut config = Config::default();
    config.apply_file(&file);
    if let Ok(url) = std::env::var("MOVIEREC_API_URL") {
        config.api_url = url;
    }
    if let Some(url) = args.api_url {
        config.api_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    config.api_url = config.api_url.trim_end_matches('/').to_string();

    let theme_name = args
        .theme
        .or_else(|| std::env::var("MOVIEREC_THEME").ok())
        .or_else(|| file.display.as_ref().and_then(|d| d.theme.clone()))
        .unwrap_or_else(|| "dark".to_string());
    let theme = theme::Theme::from_name(&theme_name);

    tracing::info!(api_url = %config.api_url, theme = theme.name, "Starting movierec");

    let api: Arc<dyn MovieApi> = Arc::new(HttpMovieApi::new(&config.api_url, config.request_timeout));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(&config, theme);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();

    app.backend_cmd_tx = Some(cmd_tx);

    // Spawn backend command listener
    let backend = backend::Backend::new(
        api,
        event_tx,
        config.search_debounce,
        config.top_k,
        cancel.clone(),
    );
    tokio::spawn(backend::run(backend, cmd_rx));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    app.start(args.open.unwrap_or(Route::Catalog));

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    tracing::info!("Shutting down");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;

    Ok(())
}
