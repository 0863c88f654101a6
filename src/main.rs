use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use seatdesk::app::{App, CollectionRequest, InputMode, StatusLevel};
use seatdesk::config::{self, Backend, Config};
use seatdesk::core::Context;
use seatdesk::infrastructure::{
    FirestoreConfig, FirestoreStore, RuntimeBridge, RuntimeCommand, RuntimeEvent,
};
use seatdesk::store::{DocumentStore, MemoryStore, SqliteDocumentStore};
use seatdesk::ui;
use seatdesk::ui::layout::{rect_contains, tab_at};

#[derive(Debug, Parser)]
#[command(
    name = "seatdesk",
    version,
    about = "Seatdesk: seat booking admin dashboard for the terminal"
)]
struct Args {
    /// Config file (defaults to ~/.config/seatdesk/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document store backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Firestore project id
    #[arg(long)]
    project: Option<String>,

    /// SQLite database file
    #[arg(long)]
    db: Option<PathBuf>,

    /// Import a JSON fixture into the SQLite store before starting
    #[arg(long)]
    import: Option<PathBuf>,

    /// Use built-in sample data
    #[arg(long)]
    demo: bool,

    /// Log filter, e.g. `debug` or `seatdesk=trace` (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let config_path = args.config.clone().or_else(config::config_path);
    let mut config = config::load(config_path.as_deref());
    apply_args(&mut config, &args);

    let store = open_store(&config, &args)?;
    tracing::info!(backend = store.backend(), "seatdesk starting");

    let ctx = Context::new(
        config.collections.clone(),
        config.profile.clone(),
        store.backend(),
    );
    let runtime = RuntimeBridge::new(store, config.collections.clone())?;
    let app = App::new(ctx)
        .with_notifications(config.ui.notifications)
        .with_config_path(config_path.map(|path| path.display().to_string()));

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(config.ui.tick_ms.max(16));
    let res = run_app(&mut terminal, app, runtime, tick_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %format!("{err:#}"), "seatdesk exited with error");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Log to `<data_dir>/seatdesk.log`; the terminal belongs to the UI.
fn init_logging(level: Option<&str>) {
    let Some(path) = config::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let filter = level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn apply_args(config: &mut Config, args: &Args) {
    if let Some(backend) = args.backend {
        config.store.backend = backend;
    }
    if let Some(project) = args.project.clone() {
        config.store.project_id = Some(project);
    }
    if let Some(db) = args.db.clone() {
        config.store.path = Some(db);
    }
    if args.demo {
        config.store.backend = Backend::Memory;
    }
}

fn open_store(config: &Config, args: &Args) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.store.backend {
        Backend::Memory => Arc::new(MemoryStore::demo(&config.collections)),
        Backend::Firestore => {
            let project = config
                .store
                .project_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .context("firestore backend needs a project id (--project or [store].project_id)")?;
            let mut firestore = FirestoreConfig::new(project);
            if let Some(database) = config.store.database.clone() {
                firestore.database = database;
            }
            firestore.api_key = config.store.api_key.clone();
            firestore.base_url = config.store.base_url.clone();
            Arc::new(FirestoreStore::new(firestore)?)
        }
        Backend::Sqlite => {
            let path = config
                .store
                .path
                .clone()
                .or_else(config::database_path)
                .context("no data directory for the sqlite store; pass --db")?;
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let sqlite = SqliteDocumentStore::open(&path)?;
            if let Some(fixture) = args.import.as_deref() {
                import_fixture(&sqlite, fixture)?;
            }
            Arc::new(sqlite)
        }
    };
    if args.import.is_some() && config.store.backend != Backend::Sqlite {
        tracing::warn!("--import only applies to the sqlite backend; ignored");
    }
    Ok(store)
}

fn import_fixture(store: &SqliteDocumentStore, path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read fixture {}", path.display()))?;
    let fixture: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parse fixture {}", path.display()))?;
    let written = store.import_fixture(&fixture)?;
    tracing::info!(path = %path.display(), documents = written, "fixture imported");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    app.mount_dashboard();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            app.unmount_dashboard();
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::SummaryReady { mount, state } => {
                app.apply_summary(mount, state);
            }
            RuntimeEvent::CollectionReady {
                mount,
                collection,
                documents,
            } => app.apply_collection(mount, collection, documents),
            RuntimeEvent::CollectionFailed {
                mount,
                collection,
                message,
            } => app.apply_collection_failed(mount, collection, message),
            RuntimeEvent::Error { message } => app.set_status(message, StatusLevel::Error),
        }
    }

    if let Some(mount) = app.take_summary_request() {
        if let Err(err) = runtime.send(RuntimeCommand::FetchSummary { mount }) {
            app.set_status(format!("{err}"), StatusLevel::Error);
        }
    }
    for CollectionRequest { mount, collection } in app.take_collection_requests() {
        if let Err(err) = runtime.send(RuntimeCommand::LoadCollection { mount, collection }) {
            app.set_status(format!("{err}"), StatusLevel::Error);
        }
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.settings_open || app.input_mode != InputMode::Normal {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size, app.router.is_profile());
    let (col, row) = (mouse.column, mouse.row);

    if rect_contains(areas.profile, col, row) {
        app.open_profile();
    } else if rect_contains(areas.settings, col, row) {
        app.settings_open = true;
    } else if rect_contains(areas.search, col, row) {
        app.input_mode = InputMode::Search;
    } else if let Some(idx) = tab_at(&areas, col, row) {
        app.select_panel(idx as i64);
    }
}
