//! Immediate-mode control panel seam.
//!
//! Parameters are bound by passing `&mut` references every frame: a widget
//! shows the current value and writes the edited value straight back,
//! returning `true` when it changed. Implementations clamp to the given
//! range.

use std::ops::RangeInclusive;

use nalgebra::Vector2;

pub trait Ui {
    fn checkbox(&mut self, label: &str, value: &mut bool) -> bool;

    fn slider(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool;

    fn slider_int(&mut self, label: &str, value: &mut u32, range: RangeInclusive<u32>) -> bool;

    /// Two sliders sharing a label and range
    fn slider2(&mut self, label: &str, value: &mut Vector2<f32>, range: RangeInclusive<f32>) -> bool;

    /// Three sliders sharing a label and range
    fn slider3(&mut self, label: &str, value: &mut [f32; 3], range: RangeInclusive<f32>) -> bool;

    /// Pick one of `items`; returns `true` whenever a selection is made
    fn combo(&mut self, label: &str, current: &mut usize, items: &[&str]) -> bool;

    /// Section title; purely visual
    fn heading(&mut self, _text: &str) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// A `Ui` that applies queued edits by label and records what was shown
    #[derive(Default)]
    pub struct ScriptedUi {
        pub shown: Vec<String>,
        pub bools: HashMap<String, bool>,
        pub floats: HashMap<String, f32>,
        pub ints: HashMap<String, u32>,
        pub pairs: HashMap<String, Vector2<f32>>,
        pub triples: HashMap<String, [f32; 3]>,
        pub choices: HashMap<String, usize>,
    }

    impl ScriptedUi {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Ui for ScriptedUi {
        fn checkbox(&mut self, label: &str, value: &mut bool) -> bool {
            self.shown.push(label.to_string());
            match self.bools.remove(label) {
                Some(v) => {
                    *value = v;
                    true
                }
                None => false,
            }
        }

        fn slider(&mut self, label: &str, value: &mut f32, range: RangeInclusive<f32>) -> bool {
            self.shown.push(label.to_string());
            match self.floats.remove(label) {
                Some(v) => {
                    *value = v.clamp(*range.start(), *range.end());
                    true
                }
                None => false,
            }
        }

        fn slider_int(&mut self, label: &str, value: &mut u32, range: RangeInclusive<u32>) -> bool {
            self.shown.push(label.to_string());
            match self.ints.remove(label) {
                Some(v) => {
                    *value = v.clamp(*range.start(), *range.end());
                    true
                }
                None => false,
            }
        }

        fn slider2(&mut self, label: &str, value: &mut Vector2<f32>, range: RangeInclusive<f32>) -> bool {
            self.shown.push(label.to_string());
            match self.pairs.remove(label) {
                Some(v) => {
                    *value = v.map(|c| c.clamp(*range.start(), *range.end()));
                    true
                }
                None => false,
            }
        }

        fn slider3(&mut self, label: &str, value: &mut [f32; 3], range: RangeInclusive<f32>) -> bool {
            self.shown.push(label.to_string());
            match self.triples.remove(label) {
                Some(v) => {
                    *value = v.map(|c| c.clamp(*range.start(), *range.end()));
                    true
                }
                None => false,
            }
        }

        fn combo(&mut self, label: &str, current: &mut usize, items: &[&str]) -> bool {
            self.shown.push(label.to_string());
            match self.choices.remove(label) {
                Some(v) if v < items.len() => {
                    *current = v;
                    true
                }
                _ => false,
            }
        }
    }
}
