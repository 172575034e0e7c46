//! Propscope - a terminal scatter plot for housing market data.

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use propscope::app::App;
use propscope::chart::hit_test::RawPointer;
use propscope::chart::ScatterChart;
use propscope::data::{DataReader, Dataset, FieldMapping};
use propscope::interaction::ScreenPosition;
use propscope::scale::PixelArea;
use propscope::switcher::DatasetId;
use propscope::ui;
use propscope::util::ChartConfig;
use propscope::viewport::ResizeOutcome;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "propscope")]
#[command(about = "An animated terminal scatter plot for housing market data", long_about = None)]
struct Args {
    /// JSON file with "CBD Distance", "Price" and "kmeans_3" fields
    #[arg(long)]
    cbd: Option<PathBuf>,

    /// JSON file with "Landsize", "Price" and "kmeans_3" fields
    #[arg(long)]
    landsize: Option<PathBuf>,

    /// Dataset shown first
    #[arg(long, value_enum, default_value_t = DatasetId::Cbd)]
    start: DatasetId,

    /// Duration of the switch animation in milliseconds
    #[arg(long, default_value_t = 1000)]
    transition_ms: u64,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the scene as JSON instead of opening the terminal UI
    #[arg(long)]
    dump: bool,

    /// Canvas width in pixels for --dump
    #[arg(long, default_value_t = 700.0)]
    width: f64,

    /// Canvas height in pixels for --dump
    #[arg(long, default_value_t = 510.0)]
    height: f64,
}

/// Owns the terminal while the UI runs and hands it back on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Propscope");
    }

    let cbd = load(args.cbd.as_deref(), "CBD Distance", DataReader::sample_cbd)?;
    let landsize = load(args.landsize.as_deref(), "Landsize", DataReader::sample_landsize)?;
    let config = ChartConfig::default().with_transition(Duration::from_millis(args.transition_ms));
    let mut chart = ScatterChart::mount(cbd, landsize, args.start, config);

    if args.dump {
        let now = Instant::now();
        match chart.resize(PixelArea::new(args.width, args.height), now)? {
            ResizeOutcome::Deferred => {
                bail!("Canvas {}x{} is too small to draw", args.width, args.height)
            }
            ResizeOutcome::Applied { .. } | ResizeOutcome::Unchanged => {}
        }
        let scene = chart.scene(now);
        println!("{}", scene.to_json()?);
        tracing::info!("Dumped {} marks for {}", scene.live_marks(), scene.active.name());
        return Ok(());
    }

    let mut session = TerminalSession::enter()?;
    let res = run_app(&mut session.terminal, App::new(chart));
    drop(session);

    if let Err(err) = &res {
        tracing::error!("Propscope failed: {}", err);
    }
    tracing::info!("Propscope exited");
    res
}

/// Read a dataset file, or fall back to the bundled sample.
fn load(
    path: Option<&Path>,
    x_field: &str,
    sample: fn() -> propscope::Result<Dataset>,
) -> Result<Dataset> {
    let dataset = match path {
        Some(path) => DataReader::read_file(path, &FieldMapping::new(x_field, "Price"))?,
        None => sample()?,
    };
    Ok(dataset)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(size.width, size.height, Instant::now());

    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| ui::draw(f, &app, now))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = if app.chart.is_animating(now) {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };
        if !event::poll(timeout)? {
            continue;
        }

        let now = Instant::now();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) | (KeyModifiers::NONE, KeyCode::Esc) => {
                    app.quit();
                }
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.quit(),
                (KeyModifiers::NONE, KeyCode::Char('s')) | (KeyModifiers::NONE, KeyCode::Tab) => {
                    app.toggle_dataset(now);
                }
                (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
                (_, KeyCode::Char('?')) => app.show_help(),
                _ => {}
            }
            Event::Mouse(mouse) => {
                let position = ScreenPosition::new(mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                        app.pointer(RawPointer::Moved(position), now);
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.pointer(RawPointer::Pressed(position), now);
                    }
                    _ => {}
                }
            }
            Event::Resize(cols, rows) => app.resize(cols, rows, now),
            _ => {}
        }
    }
}
