//! Interactive terminal front end built on `ratatui` and `crossterm`.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use probabilistic_life::{Engine, Stats};
use rand_chacha::ChaCha12Rng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use sysinfo::{System, SystemExt};

/// Application state for the interactive board.
struct App {
    /// The simulation itself
    engine: Engine,
    /// Generator feeding seeding and every step
    rng: ChaCha12Rng,
    /// Indicates whether the simulation is currently running
    running: bool,
    /// Statistics tracking for the simulation
    stats: Stats,
    /// System information for resource monitoring
    sys: System,
}

impl App {
    fn new(width: usize, height: usize, mut rng: ChaCha12Rng) -> Result<App> {
        let engine = Engine::new(width, height, &mut rng)?;
        let stats = Stats::new(engine.current().population());
        Ok(App {
            engine,
            rng,
            running: false,
            stats,
            sys: System::new_all(),
        })
    }

    /// Advances one generation and folds it into the statistics.
    fn update(&mut self) {
        let report = self.engine.step(&mut self.rng);
        self.stats.record(report);
        if report.population == 0 {
            self.running = false;
        }
        self.sys.refresh_memory();
    }

    /// Replaces the board with a freshly seeded one of the same size.
    fn reseed(&mut self) -> Result<()> {
        self.engine = Engine::new(self.engine.width(), self.engine.height(), &mut self.rng)?;
        self.stats = Stats::new(self.engine.current().population());
        Ok(())
    }

    fn toggle_running(&mut self) {
        self.running = !self.running;
    }
}

fn draw_grid(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Probabilistic Life [Space: Play/Pause | Enter: Step | r: Reseed | q: Quit]");

    let paragraph = Paragraph::new(app.engine.render())
        .style(Style::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

/// Label/value rows shown in the statistics panel.
fn stats_rows(app: &App) -> Vec<(&'static str, String)> {
    let stats = &app.stats;
    let cells = (app.engine.width() * app.engine.height()) as f64;
    let status = match (stats.current_population, app.running) {
        (0, _) => "Extinct",
        (_, true) => "Running",
        (_, false) => "Paused",
    };

    vec![
        ("Generation", stats.generation.to_string()),
        ("Population", stats.current_population.to_string()),
        (
            "Density",
            format!("{:.1}%", 100.0 * stats.current_population as f64 / cells),
        ),
        ("Born", format!("{} ({:.2}/gen)", stats.cells_created, stats.birth_rate())),
        ("Died", format!("{} ({:.2}/gen)", stats.cells_destroyed, stats.death_rate())),
        (
            "Memory",
            format!(
                "{} / {} MB",
                app.sys.used_memory() >> 20,
                app.sys.total_memory() >> 20
            ),
        ),
        ("Status", status.to_string()),
    ]
}

fn draw_stats(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let label_style = Style::default().fg(Color::Cyan);
    let lines: Vec<Line> = stats_rows(app)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), label_style),
                Span::raw(value),
            ])
        })
        .collect();

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(panel, area);
}

/// Runs the interactive board until the user quits.
///
/// The terminal is restored even if the event loop fails.
pub fn run(width: usize, height: usize, rng: ChaCha12Rng, tick_rate: Duration) -> Result<()> {
    let mut app = App::new(width, height, rng)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, tick_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
                .split(f.size());

            draw_grid(f, app, chunks[0]);
            draw_stats(f, app, chunks[1]);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char(' ') => app.toggle_running(),
                    KeyCode::Char('r') => app.reseed()?,
                    KeyCode::Enter => {
                        if !app.running {
                            app.update();
                        }
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.running {
                app.update();
            }
            last_tick = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn update_tracks_statistics() {
        let mut app = App::new(20, 10, ChaCha12Rng::seed_from_u64(8)).unwrap();
        let before = app.stats.current_population;
        assert!(before > 0);
        app.update();
        assert_eq!(app.stats.generation, 1);
        assert_eq!(
            app.stats.current_population,
            app.engine.current().population() as u64
        );
    }

    #[test]
    fn reseed_resets_statistics() {
        let mut app = App::new(20, 10, ChaCha12Rng::seed_from_u64(8)).unwrap();
        app.update();
        app.reseed().unwrap();
        assert_eq!(app.stats.generation, 0);
        assert_eq!(app.engine.generation(), 0);
    }

    #[test]
    fn stats_panel_reports_extinction() {
        let mut app = App::new(4, 4, ChaCha12Rng::seed_from_u64(2)).unwrap();
        app.engine = Engine::from_grid(probabilistic_life::Grid::new(4, 4).unwrap());
        app.running = true;
        app.update();
        assert!(!app.running);
        let rows = stats_rows(&app);
        assert!(rows.contains(&("Status", "Extinct".to_string())));
        assert!(rows.contains(&("Density", "0.0%".to_string())));
    }

    #[test]
    fn rejects_empty_board() {
        assert!(App::new(0, 10, ChaCha12Rng::seed_from_u64(1)).is_err());
    }
}
