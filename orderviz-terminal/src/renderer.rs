//! Line rasterizer for terminal rendering
use crossterm::{
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use orderviz_core::{Camera, DrawList, Rgba, Segment, SketchError, TextSize, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color as TuiColor, Modifier, Style},
    widgets::Widget,
};
use std::io::Write;

/// Lines below these opacities are drawn as dots instead of strokes
const FAINT_ALPHA: u8 = 32;
const GHOST_ALPHA: u8 = 64;

const FAINT_GLYPH: char = '.';
const GHOST_GLYPH: char = ':';

/// Scene pixels covered by one terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    symbol: char,
    rgb: (u8, u8, u8),
    bold: bool,
}

const BLANK: Cell = Cell {
    symbol: ' ',
    rgb: (0, 0, 0),
    bold: false,
};

/// Renderer that turns a recorded frame into terminal characters
pub struct LineRenderer {
    width: usize,
    height: usize,
    cell: CellSize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize, cell: CellSize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            cell,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![BLANK; size],
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Match the terminal area; contents are cleared when the size changes
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        *self = Self::new(width, height, self.cell);
    }

    /// The scene area in scene pixels
    pub fn viewport(&self) -> Result<Viewport, SketchError> {
        Viewport::new(
            self.width as f32 * self.cell.width,
            self.height as f32 * self.cell.height,
        )
    }

    pub fn clear(&mut self) {
        for i in 0..self.cells.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.cells[i] = BLANK;
        }
    }

    /// Rasterize every line of `list` through `camera`, then its labels on top
    pub fn render(&mut self, list: &DrawList, camera: &Camera) {
        for (segment, color) in list.lines() {
            self.render_line(segment, color, camera);
        }
        for (text, position, size, color) in list.labels() {
            self.render_label(text, position.x, position.y, size, color);
        }
    }

    fn render_line(&mut self, segment: &Segment, color: Rgba, camera: &Camera) {
        let Some((a, b)) = camera.project_segment(segment) else {
            return; // Entirely outside the depth range
        };

        // Screen pixels to cell coordinates
        let (x0, y0) = (a.0 / self.cell.width, a.1 / self.cell.height);
        let (x1, y1) = (b.0 / self.cell.width, b.1 / self.cell.height);
        let (dx, dy) = (x1 - x0, y1 - y0);

        let symbol = if color.a < FAINT_ALPHA {
            FAINT_GLYPH
        } else if color.a < GHOST_ALPHA {
            GHOST_GLYPH
        } else {
            line_glyph(dx, dy)
        };
        let cell = Cell {
            symbol,
            rgb: shade(color),
            bold: false,
        };

        let Some((t0, t1)) = clip_to_rect(x0, y0, dx, dy, self.width as f32, self.height as f32) else {
            return;
        };

        // Walk the visible part one cell at a time
        let (start_x, start_y) = (x0 + dx * t0, y0 + dy * t0);
        let start_depth = a.2 + (b.2 - a.2) * t0;
        let length = (dx.abs().max(dy.abs()) * (t1 - t0)).ceil().max(1.0) as usize;
        let step_x = dx * (t1 - t0) / length as f32;
        let step_y = dy * (t1 - t0) / length as f32;
        let step_depth = (b.2 - a.2) * (t1 - t0) / length as f32;

        for step in 0..=length {
            let x = (start_x + step_x * step as f32).floor();
            let y = (start_y + step_y * step as f32).floor();
            if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
                continue;
            }

            let depth = start_depth + step_depth * step as f32;
            let idx = y as usize * self.width + x as usize;
            if depth <= self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.cells[idx] = cell;
            }
        }
    }

    fn render_label(&mut self, text: &str, x: f32, y: f32, size: TextSize, color: Rgba) {
        let row = (y / self.cell.height).floor();
        let column = (x / self.cell.width).floor();
        if row < 0.0 || row >= self.height as f32 || column < 0.0 {
            return;
        }

        let start = row as usize * self.width;
        for (offset, symbol) in text.chars().enumerate() {
            let x = column as usize + offset;
            if x >= self.width {
                break;
            }
            self.depth_buffer[start + x] = f32::NEG_INFINITY;
            self.cells[start + x] = Cell {
                symbol,
                rgb: shade(color),
                bold: size == TextSize::Large,
            };
        }
    }

    pub fn symbol_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].symbol)
    }

    /// Plain text, one string per row
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|cell| cell.symbol).collect())
            .collect()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                let (r, g, b) = cell.rgb;
                writer.queue(SetForegroundColor(Color::Rgb { r, g, b }))?;
                if cell.bold {
                    writer.queue(SetAttribute(Attribute::Bold))?;
                }
                writer.queue(Print(cell.symbol))?;
                if cell.bold {
                    writer.queue(SetAttribute(Attribute::NormalIntensity))?;
                }
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Widget for &LineRenderer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = (area.width as usize).min(self.width);
        let rows = (area.height as usize).min(self.height);
        for y in 0..rows {
            for x in 0..columns {
                let cell = self.cells[y * self.width + x];
                if cell.symbol == ' ' {
                    continue;
                }
                let (r, g, b) = cell.rgb;
                let mut style = Style::default().fg(TuiColor::Rgb(r, g, b));
                if cell.bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                buf.get_mut(area.x + x as u16, area.y + y as u16)
                    .set_char(cell.symbol)
                    .set_style(style);
            }
        }
    }
}

/// Stroke character for a line heading `(dx, dy)` in cell space, Y down
fn line_glyph(dx: f32, dy: f32) -> char {
    let (adx, ady) = (dx.abs(), dy.abs());
    if ady * 2.0 < adx {
        '-'
    } else if adx * 2.0 < ady {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Dim a colour by its opacity; faint lines stay readable on a dark terminal
fn shade(color: Rgba) -> (u8, u8, u8) {
    let factor = 0.25 + 0.75 * (color.a as f32 / 255.0);
    let dim = |channel: u8| (channel as f32 * factor).round() as u8;
    (dim(color.r), dim(color.g), dim(color.b))
}

/// Parameter range of `(x0, y0) + t * (dx, dy)` inside `[0, width] x [0, height]`
fn clip_to_rect(x0: f32, y0: f32, dx: f32, dy: f32, width: f32, height: f32) -> Option<(f32, f32)> {
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    for (p, q) in [(-dx, x0), (dx, width - x0), (-dy, y0), (dy, height - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}
