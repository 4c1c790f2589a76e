// Config Module - command-line arguments and start-up settings
use anyhow::{bail, Result};
use clap::Parser;
use orderviz_core::{ModeKind, ObjectKind, Sketch, SketchError};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::renderer::CellSize;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Interactive terminal sketch showing how transform order changes the result",
    long_about = "Composes translate, rotate and scale in different orders and draws the result in the terminal.\n\
                  Use the control panel on the left: Up/Down to pick a control, Left/Right to adjust it \
                  (hold Shift for fine steps), Space/Enter to toggle, q or Esc to quit."
)]
pub struct Args {
    /// Target frame rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Starting mode: tentacle, trs, tsr or rts
    #[arg(short, long)]
    pub mode: Option<ModeKind>,

    /// Starting object: rect, rotating-rects, side-rect, box or rotating-box
    #[arg(short, long)]
    pub object: Option<ObjectKind>,

    /// Start in 3D (perspective) view
    #[arg(long)]
    pub three_d: bool,

    /// Start with the grid hidden
    #[arg(long)]
    pub no_grid: bool,

    /// Scene pixels per terminal column
    #[arg(long, default_value_t = 8.0)]
    pub cell_width: f32,

    /// Scene pixels per terminal row
    #[arg(long, default_value_t = 16.0)]
    pub cell_height: f32,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Render one frame at this many seconds to stdout and exit
    #[arg(long)]
    pub snapshot: Option<f32>,

    /// Snapshot size in terminal cells
    #[arg(long, default_value = "120x40")]
    pub size: GridSize,
}

/// Width and height in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub columns: u16,
    pub rows: u16,
}

impl FromStr for GridSize {
    type Err = SketchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || SketchError::InvalidSize(s.to_string());
        let (columns, rows) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let columns: u16 = columns.trim().parse().map_err(|_| invalid())?;
        let rows: u16 = rows.trim().parse().map_err(|_| invalid())?;
        if columns == 0 || rows == 0 {
            return Err(invalid());
        }
        Ok(Self { columns, rows })
    }
}

/// Validated start-up settings
#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    pub fps: u32,
    pub mode: Option<ModeKind>,
    pub object: Option<ObjectKind>,
    pub three_d: bool,
    pub show_grid: bool,
    pub cell: CellSize,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            mode: None,
            object: None,
            three_d: false,
            show_grid: true,
            cell: CellSize::default(),
        }
    }
}

impl SketchConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.fps == 0 {
            bail!("--fps must be at least 1");
        }
        for (name, value) in [("--cell-width", args.cell_width), ("--cell-height", args.cell_height)] {
            if !(value.is_finite() && value > 0.0) {
                bail!("{} must be a positive number, got {}", name, value);
            }
        }

        Ok(Self {
            fps: args.fps,
            mode: args.mode,
            object: args.object,
            three_d: args.three_d,
            show_grid: !args.no_grid,
            cell: CellSize {
                width: args.cell_width,
                height: args.cell_height,
            },
        })
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    /// Seed a fresh sketch. The mode goes first so an explicit object wins
    /// over the mode's own choice.
    pub fn apply(&self, sketch: &mut Sketch) {
        if let Some(mode) = self.mode {
            sketch.select_mode(mode);
        }
        if let Some(object) = self.object {
            sketch.select_object(object);
        }
        sketch.settings.three_d = self.three_d;
        sketch.settings.show_grid = self.show_grid;
    }
}
