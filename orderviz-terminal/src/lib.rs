//! Terminal host for the transform-order sketch
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self},
};
use log::{info, warn};
use orderviz_core::{DrawList, Sketch};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod panel;
pub mod renderer;

pub use config::{Args, GridSize, SketchConfig};
pub use panel::Panel;
pub use renderer::{CellSize, LineRenderer};

const PANEL_WIDTH: u16 = 46;
const HELP: &str = "Up/Down select  Left/Right adjust (Shift: fine)  Space toggle  q quit";

/// Main application struct for the terminal sketch
pub struct SketchApp {
    config: SketchConfig,
    sketch: Sketch,
    panel: Panel,
    renderer: LineRenderer,
    draw_list: DrawList,
    running: bool,
    started: Instant,
    time: f32,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    warned_small: bool,
}

impl SketchApp {
    pub fn new(config: SketchConfig) -> Self {
        let mut sketch = Sketch::new();
        config.apply(&mut sketch);
        let now = Instant::now();

        Self {
            renderer: LineRenderer::new(0, 0, config.cell),
            config,
            sketch,
            panel: Panel::new(),
            draw_list: DrawList::new(),
            running: true,
            started: now,
            time: 0.0,
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            warned_small: false,
        }
    }

    pub fn sketch(&self) -> &Sketch {
        &self.sketch
    }

    /// Set up the terminal, run until quit, and always restore the terminal
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = self.setup()?;
        let result = self.main_loop(&mut terminal);

        // Cleanup
        restore_terminal(terminal.backend_mut())?;
        info!("terminal restored");

        result
    }

    fn setup(&mut self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        info!(
            "starting: mode {}, object {}, {} fps, cell {}x{} px",
            self.sketch.mode().slug(),
            self.sketch.object().slug(),
            self.config.fps,
            self.config.cell.width,
            self.config.cell.height
        );

        terminal::enable_raw_mode().context("entering raw mode")?;
        let terminal = or_restore(enter_screen(), || restore_terminal(&mut stdout()))?;

        self.started = Instant::now();
        self.last_frame = self.started;
        Ok(terminal)
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let target_frame_time = self.config.frame_time();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            terminal.draw(|frame| self.draw(frame))?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Release {
                return Ok(());
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                _ => {
                    self.panel.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Sample the clock once per frame
    fn update(&mut self) {
        self.time = self.started.elapsed().as_secs_f32();
    }

    fn draw(&mut self, frame: &mut Frame) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(PANEL_WIDTH), Constraint::Min(0)])
            .split(frame.size());
        let scene_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(columns[1]);

        // Controls first, so edits show up in this frame's scene
        self.panel.set_title(format!("Controls | {:.0} fps", self.fps));
        self.panel.begin();
        self.sketch.controls(&mut self.panel);
        self.panel.finish();
        frame.render_widget(&self.panel, columns[0]);

        self.render_scene(scene_rows[0]);
        frame.render_widget(&self.renderer, scene_rows[0]);
        frame.render_widget(
            Paragraph::new(Line::from(HELP)).style(Style::default().fg(Color::DarkGray)),
            scene_rows[1],
        );
    }

    /// Draw the sketch into the renderer sized to `area`
    fn render_scene(&mut self, area: Rect) {
        self.renderer.resize(area.width as usize, area.height as usize);
        self.renderer.clear();

        let viewport = match self.renderer.viewport() {
            Ok(viewport) => viewport,
            Err(e) => {
                if !self.warned_small {
                    warn!("terminal too small for the scene: {}", e);
                    self.warned_small = true;
                }
                return;
            }
        };
        self.warned_small = false;

        self.draw_list.clear();
        self.sketch.draw(&mut self.draw_list, &viewport, self.time);
        let camera = self.sketch.camera(viewport);
        self.renderer.render(&self.draw_list, &camera);
    }

    /// Render a single frame at `time` seconds without touching the terminal
    pub fn snapshot<W: Write>(&mut self, size: GridSize, time: f32, writer: &mut W, colored: bool) -> Result<()> {
        info!("snapshot at {}s, {}x{} cells", time, size.columns, size.rows);
        self.time = time;
        self.render_scene(Rect::new(0, 0, size.columns, size.rows));

        if colored {
            self.renderer.draw(writer)?;
        } else {
            for row in self.renderer.rows() {
                writeln!(writer, "{}", row.trim_end())?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn enter_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide).context("entering the alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout())).context("creating the terminal")?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal<W: Write>(writer: &mut W) -> Result<()> {
    terminal::disable_raw_mode().context("leaving raw mode")?;
    execute!(writer, terminal::LeaveAlternateScreen, cursor::Show).context("leaving the alternate screen")?;
    Ok(())
}

/// Pass `step` through, running `restore` first when it failed
fn or_restore<T>(step: Result<T>, restore: impl FnOnce() -> Result<()>) -> Result<T> {
    step.or_else(|e| {
        if let Err(cleanup) = restore() {
            warn!("restoring the terminal failed: {:#}", cleanup);
        }
        Err(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_setup_step_restores_the_terminal() {
        let mut restored = false;
        let result: Result<()> = or_restore(Err(anyhow::anyhow!("no tty")), || {
            restored = true;
            Ok(())
        });
        assert!(result.is_err());
        assert!(restored);

        let mut restored = false;
        let value = or_restore(Ok(7), || {
            restored = true;
            Ok(())
        })
        .unwrap();
        assert_eq!(value, 7);
        assert!(!restored);

        // The setup error wins over a failing cleanup
        let result: Result<()> = or_restore(Err(anyhow::anyhow!("no tty")), || Err(anyhow::anyhow!("cleanup")));
        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }

    #[test]
    fn test_snapshot_shows_title_and_grid() {
        let mut app = SketchApp::new(SketchConfig::default());
        let size = GridSize {
            columns: 100,
            rows: 40,
        };
        let mut out = Vec::new();
        app.snapshot(size, 0.0, &mut out, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 40);
        // Title at (50, 50) px: column 6, row 3
        assert!(lines[3].contains("A tentacle"));
        assert!(text.contains('.'));
    }

    #[test]
    fn test_config_seeds_the_sketch() {
        let config = SketchConfig {
            mode: Some(orderviz_core::ModeKind::Trs),
            three_d: true,
            ..SketchConfig::default()
        };
        let app = SketchApp::new(config);
        assert_eq!(app.sketch().mode(), orderviz_core::ModeKind::Trs);
        assert!(app.sketch().settings.three_d);
    }

    #[test]
    fn test_update_samples_the_clock() {
        let mut app = SketchApp::new(SketchConfig::default());
        std::thread::sleep(Duration::from_millis(5));
        app.update();
        assert!(app.time > 0.0);
    }

    #[test]
    fn test_zero_sized_area_draws_nothing() {
        let mut app = SketchApp::new(SketchConfig::default());
        app.render_scene(Rect::new(0, 0, 0, 0));
        assert!(app.warned_small);
        assert!(app.draw_list.is_empty());
    }
}
