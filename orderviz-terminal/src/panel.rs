//! Keyboard-driven control panel.
//!
//! The panel is rebuilt every frame from the `Ui` calls the sketch makes.
//! Controls are identified by their position in that sequence: key presses
//! move the focus or queue an adjustment, and the adjustment is applied by
//! whichever control sits at the focus on the next frame.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nalgebra::Vector2;
use orderviz_core::Ui;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::ops::RangeInclusive;

/// Slider travel in coarse steps
const SLIDER_STEPS: f32 = 100.0;
/// Fine steps per coarse step
const FINE_DIVISOR: f32 = 10.0;

const LABEL_WIDTH: usize = 22;
const BAR_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Decrease,
    Increase,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    adjust: Adjust,
    fine: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Row {
    Heading(String),
    Control {
        label: String,
        value: String,
        focused: bool,
    },
}

#[derive(Debug, Default)]
pub struct Panel {
    focus: usize,
    pending: Option<Pending>,
    rows: Vec<Row>,
    controls: usize,
    title: String,
}

impl Panel {
    pub fn new() -> Self {
        Self {
            title: "Controls".to_string(),
            ..Self::default()
        }
    }

    /// Start a new frame of controls
    pub fn begin(&mut self) {
        self.rows.clear();
        self.controls = 0;
    }

    /// End the frame; adjustments no control picked up are dropped
    pub fn finish(&mut self) {
        self.pending = None;
        self.focus = self.focus.min(self.controls.saturating_sub(1));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns `false` for keys the panel does not use
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let fine = key.modifiers.contains(KeyModifiers::SHIFT);
        let adjust = match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.focus = self.focus.saturating_sub(1);
                return true;
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus += 1;
                return true;
            }
            KeyCode::Left => Adjust::Decrease,
            KeyCode::Right => Adjust::Increase,
            KeyCode::Char(' ') | KeyCode::Enter => Adjust::Toggle,
            _ => return false,
        };
        self.pending = Some(Pending { adjust, fine });
        true
    }

    /// Claim the next control slot; the pending adjustment if it is focused
    fn next_control(&mut self) -> (bool, Option<Pending>) {
        let index = self.controls;
        self.controls += 1;
        if index == self.focus {
            (true, self.pending.take())
        } else {
            (false, None)
        }
    }

    fn push_control(&mut self, label: String, value: String, focused: bool) {
        self.rows.push(Row::Control {
            label,
            value,
            focused,
        });
    }

    fn float_control(&mut self, label: String, value: &mut f32, range: &RangeInclusive<f32>) -> bool {
        let (focused, pending) = self.next_control();
        let (min, max) = (*range.start(), *range.end());
        let mut changed = false;

        if let Some(Pending { adjust, fine }) = pending {
            let mut step = (max - min) / SLIDER_STEPS;
            if fine {
                step /= FINE_DIVISOR;
            }
            let target = match adjust {
                Adjust::Decrease => *value - step,
                Adjust::Increase => *value + step,
                Adjust::Toggle => *value,
            };
            let target = target.clamp(min, max);
            changed = target != *value;
            *value = target;
        }

        let fraction = if max > min { (*value - min) / (max - min) } else { 0.0 };
        self.push_control(label, format!("{} {:8.3}", bar(fraction), value), focused);
        changed
    }
}

impl Ui for Panel {
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
        let (focused, pending) = self.next_control();
        let changed = pending.is_some();
        if changed {
            *value = !*value;
        }
        let mark = if *value { "[x]" } else { "[ ]" };
        self.push_control(label.to_string(), mark.to_string(), focused);
        changed
    }

    fn slider(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool {
        self.float_control(label.to_string(), value, &range)
    }

    fn slider_int(&mut self, label: &str, value: &mut u32, range: RangeInclusive<u32>) -> bool {
        let (focused, pending) = self.next_control();
        let (min, max) = (*range.start(), *range.end());
        let before = *value;

        if let Some(pending) = pending {
            *value = match pending.adjust {
                Adjust::Decrease => value.saturating_sub(1),
                Adjust::Increase => value.saturating_add(1),
                Adjust::Toggle => *value,
            }
            .clamp(min, max);
        }

        let fraction = if max > min {
            value.saturating_sub(min) as f32 / (max - min) as f32
        } else {
            0.0
        };
        self.push_control(label.to_string(), format!("{} {:8}", bar(fraction), value), focused);
        *value != before
    }

    fn slider2(&mut self, label: &str, value: &mut Vector2<f32>, range: RangeInclusive<f32>) -> bool {
        let x = self.float_control(format!("{} x", label), &mut value.x, &range);
        let y = self.float_control(format!("{} y", label), &mut value.y, &range);
        x || y
    }

    fn slider3(&mut self, label: &str, value: &mut [f32; 3], range: RangeInclusive<f32>) -> bool {
        let mut changed = false;
        for (axis, component) in ["x", "y", "z"].iter().zip(value.iter_mut()) {
            changed |= self.float_control(format!("{} {}", label, axis), component, &range);
        }
        changed
    }

    fn combo(&mut self, label: &str, current: &mut usize, items: &[&str]) -> bool {
        let (focused, pending) = self.next_control();
        let count = items.len();
        let mut changed = false;

        if let (Some(pending), true) = (pending, count > 0) {
            *current = match pending.adjust {
                Adjust::Decrease => (*current + count - 1) % count,
                Adjust::Increase | Adjust::Toggle => (*current + 1) % count,
            };
            changed = true;
        }

        let shown = items.get(*current).copied().unwrap_or("-");
        self.push_control(label.to_string(), format!("< {} >", shown), focused);
        changed
    }

    fn heading(&mut self, text: &str) {
        self.rows.push(Row::Heading(text.to_string()));
    }
}

fn bar(fraction: f32) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f32).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

impl Widget for &Panel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut focused_line = 0;
        let lines: Vec<Line> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| match row {
                Row::Heading(text) => Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                Row::Control {
                    label,
                    value,
                    focused,
                } => {
                    let style = if *focused {
                        focused_line = i;
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Line::from(vec![
                        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), style),
                        Span::raw(" "),
                        Span::styled(value.clone(), style),
                    ])
                }
            })
            .collect();

        // Keep the focused row in view
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = (focused_line + 1).saturating_sub(visible) as u16;

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(self.title.as_str()))
            .scroll((scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Runs one frame with a checkbox, a slider and a combo
    fn frame(panel: &mut Panel, flag: &mut bool, level: &mut f32, pick: &mut usize) -> [bool; 3] {
        panel.begin();
        let a = panel.checkbox("Flag", flag);
        let b = panel.slider("Level", level, 0.0..=10.0);
        let c = panel.combo("Pick", pick, &["one", "two", "three"]);
        panel.finish();
        [a, b, c]
    }

    #[test]
    fn test_focus_moves_and_clamps() {
        let (mut flag, mut level, mut pick) = (false, 5.0, 0);
        let mut panel = Panel::new();
        for _ in 0..10 {
            panel.handle_key(key(KeyCode::Down));
        }
        frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert_eq!(panel.focus(), 2);

        panel.handle_key(key(KeyCode::Up));
        panel.handle_key(key(KeyCode::Up));
        panel.handle_key(key(KeyCode::Up));
        assert_eq!(panel.focus(), 0);
    }

    #[test]
    fn test_toggle_applies_to_focused_control_only() {
        let (mut flag, mut level, mut pick) = (false, 5.0, 0);
        let mut panel = Panel::new();
        panel.handle_key(key(KeyCode::Char(' ')));
        let changed = frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert_eq!(changed, [true, false, false]);
        assert!(flag);

        // Consumed: the next frame changes nothing
        let changed = frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert_eq!(changed, [false, false, false]);
    }

    #[test]
    fn test_slider_steps_and_clamps() {
        let (mut flag, mut level, mut pick) = (false, 5.0, 0);
        let mut panel = Panel::new();
        panel.handle_key(key(KeyCode::Down));

        panel.handle_key(key(KeyCode::Right));
        frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert!((level - 5.1).abs() < 1e-5);

        panel.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT));
        frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert!((level - 5.09).abs() < 1e-5);

        level = 10.0;
        panel.handle_key(key(KeyCode::Right));
        let changed = frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert_eq!(level, 10.0);
        assert!(!changed[1]);
    }

    #[test]
    fn test_combo_wraps() {
        let (mut flag, mut level, mut pick) = (false, 5.0, 0);
        let mut panel = Panel::new();
        panel.handle_key(key(KeyCode::Down));
        panel.handle_key(key(KeyCode::Down));

        panel.handle_key(key(KeyCode::Left));
        let changed = frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert!(changed[2]);
        assert_eq!(pick, 2);

        panel.handle_key(key(KeyCode::Enter));
        frame(&mut panel, &mut flag, &mut level, &mut pick);
        assert_eq!(pick, 0);
    }

    #[test]
    fn test_multi_sliders_expose_each_component() {
        let mut panel = Panel::new();
        let mut pair = Vector2::new(1.0, 1.0);
        let mut triple = [0.0; 3];
        panel.begin();
        panel.heading("Section");
        panel.slider2("Scale", &mut pair, 0.1..=20.0);
        panel.slider3("Rotation 3d", &mut triple, 0.0..=6.0);
        panel.finish();

        let labels: Vec<&str> = panel
            .rows
            .iter()
            .filter_map(|row| match row {
                Row::Control { label, .. } => Some(label.as_str()),
                Row::Heading(_) => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec!["Scale x", "Scale y", "Rotation 3d x", "Rotation 3d y", "Rotation 3d z"]
        );
    }

    #[test]
    fn test_unused_keys_are_ignored() {
        let mut panel = Panel::new();
        assert!(!panel.handle_key(key(KeyCode::Char('q'))));
        assert!(panel.pending.is_none());
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0), "[----------]");
        assert_eq!(bar(0.5), "[#####-----]");
        assert_eq!(bar(1.5), "[##########]");
    }
}
