// App state and the event loop: terminal setup/teardown, animation tick
// dispatch, input polling, frame-gated redraw.
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::AnimationLoop;
use crate::config::timing;
use crate::renderer::TerminalPresenter;
use crate::settings::{Mode, Settings, SettingsPatch};
use crate::surface::Surface;
use crate::{grid, keyboard, panel};

#[derive(Parser)]
#[command(author, version, about = "Animated grid of randomly colored blocks for the terminal")]
pub struct Args {
    /// Blocks per row (and per column)
    #[arg(long)]
    pub blocks_per_row: Option<u32>,

    /// Color mode: DEFAULT (fully random) or FROM-UI (base + jitter)
    #[arg(long)]
    pub mode: Option<String>,

    /// Re-render interval in milliseconds
    #[arg(long)]
    pub interval: Option<u64>,

    /// Per-block rotation jitter in degrees
    #[arg(long)]
    pub rotation: Option<i64>,

    /// Start with the animation toggle off
    #[arg(long)]
    pub no_animate: bool,

    /// Re-roll base colors and jitter on every animated frame
    #[arg(long)]
    pub auto_randomize: bool,

    /// RNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Settings file (defaults to the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Apply interval changes to a running timer immediately instead of on
    /// the next restart
    #[arg(long)]
    pub restart_on_interval_change: bool,

    /// Render a single frame and exit
    #[arg(long)]
    pub one_shot: bool,
}

pub struct App {
    pub settings: Settings,
    pub animation: AnimationLoop,
    pub surface: Surface,
    pub presenter: TerminalPresenter,
    pub rng: StdRng,

    // Panel state
    pub panel_visible: bool,
    pub selected_field: usize,
    pub entry: Option<String>,
    pub status_message: String,
    pub status_is_error: bool,

    // App state
    pub needs_redraw: bool,
    pub exit_requested: bool,
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let config_path = args.config.clone().or_else(Settings::default_path);
        let mut settings = match &config_path {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        settings
            .apply(SettingsPatch {
                blocks_per_row: args.blocks_per_row,
                mode: args.mode.clone().map(Mode::from),
                rerender_blocks_interval: args.interval,
                rotation_max_randomness: args.rotation,
                rerender_blocks: args.no_animate.then_some(false),
                auto_randomize: args.auto_randomize.then_some(true),
                ..SettingsPatch::default()
            })
            .map_err(|e| anyhow::anyhow!("invalid command line value: {}", e))?;

        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        // The surface is sized once from the terminal at startup and not
        // re-measured on resize.
        let (cols, rows) = terminal::size()?;
        let presenter = TerminalPresenter::new(cols, rows);
        let (surface_w, surface_h) = presenter.surface_size();
        let surface = Surface::new(surface_w, surface_h);

        let mut animation = AnimationLoop::new(
            Duration::from_millis(settings.rerender_blocks_interval),
            args.restart_on_interval_change,
        );
        // Started once at init; the animate toggle gates the tick handler,
        // not the timer.
        animation.start(Instant::now());

        Ok(Self {
            settings,
            animation,
            surface,
            presenter,
            rng,
            panel_visible: true,
            selected_field: 0,
            entry: None,
            status_message: "Space: animate | R: randomize | G: generate | H: hide | Q: quit"
                .to_string(),
            status_is_error: false,
            needs_redraw: true,
            exit_requested: false,
            config_path,
        })
    }

    /// Plan the grid and paint every block into the surface.
    pub fn regenerate(&mut self) -> Result<()> {
        let plan = grid::plan(
            self.surface.width() as f64,
            self.surface.height() as f64,
            self.settings.blocks_per_row,
            self.settings.rotation_max_randomness,
        )?;
        let surface = &mut self.surface;
        grid::render(
            &plan,
            &self.settings,
            &mut self.rng,
            |fill, x, y, w, h, rotation| surface.fill_rect(&fill, x, y, w, h, rotation),
        );
        self.needs_redraw = true;
        Ok(())
    }

    pub fn randomize_and_regenerate(&mut self) -> Result<()> {
        self.settings.randomize(&mut self.rng);
        self.regenerate()
    }

    /// Run one patch through the settings boundary. Rejections land on the
    /// status line and leave the record untouched.
    pub fn apply_patch(&mut self, patch: SettingsPatch) {
        let old_interval = self.settings.rerender_blocks_interval;
        match self.settings.apply(patch) {
            Ok(()) => {
                self.status_message = "updated".to_string();
                self.status_is_error = false;
                if self.settings.rerender_blocks_interval != old_interval {
                    self.animation.set_interval(
                        Instant::now(),
                        Duration::from_millis(self.settings.rerender_blocks_interval),
                    );
                }
            }
            Err(e) => {
                crate::log_debug!("rejected settings patch: {}", e);
                self.status_message = e.to_string();
                self.status_is_error = true;
            }
        }
        self.needs_redraw = true;
    }

    pub fn restart_timer(&mut self) {
        self.animation.start(Instant::now());
        self.set_status(
            format!("timer restarted at {} ms", self.animation.interval().as_millis()),
            false,
        );
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = message.into();
        self.status_is_error = is_error;
        self.needs_redraw = true;
    }

    /// One animation tick. The animate toggle gates the work here, so the
    /// timer itself never stops while the toggle is off.
    fn on_tick(&mut self) -> Result<()> {
        if !self.settings.rerender_blocks {
            return Ok(());
        }
        if self.settings.auto_randomize {
            self.settings.randomize(&mut self.rng);
        }
        self.surface.clear();
        self.regenerate()
    }
}

pub async fn run(args: Args) -> Result<()> {
    let mut app = App::new(&args)?;
    app.regenerate()?;

    if args.one_shot {
        app.presenter.present(&app.surface)?;
        println!();
        return Ok(());
    }

    setup_terminal()?;
    let result = run_app(&mut app).await;
    restore_terminal()?;

    if let Some(path) = app.config_path.clone() {
        if let Err(e) = app.settings.save(&path) {
            crate::log_debug!("failed to save settings to {}: {:#}", path.display(), e);
        }
    }

    result
}

fn setup_terminal() -> Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}

async fn run_app(app: &mut App) -> Result<()> {
    let mut last_frame = Instant::now();
    app.needs_redraw = true;

    loop {
        let now = Instant::now();

        if app.animation.poll(now) {
            app.on_tick()?;
        }

        // Redraw only when something changed, capped to the frame budget.
        if app.needs_redraw
            && now.duration_since(last_frame).as_millis() >= timing::FRAME_TIME_MS
        {
            last_frame = now;
            app.presenter.present(&app.surface)?;
            if app.panel_visible {
                panel::render(app)?;
            }
            app.needs_redraw = false;
        }

        if event::poll(Duration::from_millis(timing::INPUT_POLL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if !keyboard::handle_input(app, key).await? {
                    break;
                }
                if app.exit_requested {
                    break;
                }
            }
        }
    }

    Ok(())
}
