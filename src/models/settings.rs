use serde::{Deserialize, Serialize};

pub const MIN_ARROWS: u32 = 1;
pub const MAX_ARROWS: u32 = 20;
pub const MIN_STEP_ARROWS: u32 = 1;
pub const MAX_STEP_ARROWS: u32 = 50;
pub const MIN_DISPLAY_SECS: f32 = 0.5;
pub const MAX_DISPLAY_SECS: f32 = 10.0;
pub const DISPLAY_STEP_SECS: f32 = 0.5;
pub const DEFAULT_STEP_ARROWS: u32 = 3;

fn default_arrow_count() -> u32 {
    3
}
fn default_display_time() -> f32 {
    3.0
}
fn default_sequence() -> Vec<u32> {
    vec![3, 5, 7]
}

/// User-tunable game settings, stored as `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(default = "default_arrow_count")]
    pub standard_arrow_count: u32,
    #[serde(default = "default_display_time")]
    pub image_display_time: f32,
    #[serde(default)]
    pub advanced_sequence_enabled: bool,
    #[serde(default = "default_sequence")]
    pub advanced_sequence: Vec<u32>,
    #[serde(default)]
    pub current_sequence_index: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            standard_arrow_count: default_arrow_count(),
            image_display_time: default_display_time(),
            advanced_sequence_enabled: false,
            advanced_sequence: default_sequence(),
            current_sequence_index: 0,
        }
    }
}

impl GameSettings {
    fn sequence_active(&self) -> bool {
        self.advanced_sequence_enabled && !self.advanced_sequence.is_empty()
    }

    /// Arrows required before the next reward.
    pub fn current_arrow_count(&self) -> u32 {
        if self.sequence_active() {
            let idx = self.current_sequence_index % self.advanced_sequence.len();
            self.advanced_sequence[idx]
        } else {
            self.standard_arrow_count
        }
    }

    /// Move to the next sequence step, wrapping. Returns whether anything changed.
    pub fn advance_sequence(&mut self) -> bool {
        if !self.sequence_active() {
            return false;
        }
        self.current_sequence_index = (self.current_sequence_index + 1) % self.advanced_sequence.len();
        true
    }

    pub fn change_standard_arrow_count(&mut self, delta: i32) {
        let next = self.standard_arrow_count as i64 + delta as i64;
        self.standard_arrow_count = next.clamp(MIN_ARROWS as i64, MAX_ARROWS as i64) as u32;
    }

    pub fn set_standard_arrow_count(&mut self, count: u32) {
        self.standard_arrow_count = count.clamp(MIN_ARROWS, MAX_ARROWS);
    }

    pub fn change_display_time(&mut self, delta: f32) {
        self.set_display_time(self.image_display_time + delta);
    }

    pub fn set_display_time(&mut self, secs: f32) {
        // keep on the half-second grid
        let snapped = (secs / DISPLAY_STEP_SECS).round() * DISPLAY_STEP_SECS;
        self.image_display_time = snapped.clamp(MIN_DISPLAY_SECS, MAX_DISPLAY_SECS);
    }

    pub fn set_advanced(&mut self, enabled: bool) {
        self.advanced_sequence_enabled = enabled;
    }

    pub fn add_step(&mut self, arrows: u32) {
        self.advanced_sequence
            .push(arrows.clamp(MIN_STEP_ARROWS, MAX_STEP_ARROWS));
    }

    /// Remove a step. The last remaining step is never removed.
    pub fn remove_step(&mut self, index: usize) -> bool {
        if index >= self.advanced_sequence.len() || self.advanced_sequence.len() <= 1 {
            return false;
        }
        self.advanced_sequence.remove(index);
        if self.current_sequence_index >= self.advanced_sequence.len() {
            self.current_sequence_index = 0;
        }
        true
    }

    pub fn update_step(&mut self, index: usize, arrows: u32) -> bool {
        match self.advanced_sequence.get_mut(index) {
            Some(step) => {
                *step = arrows.clamp(MIN_STEP_ARROWS, MAX_STEP_ARROWS);
                true
            }
            None => false,
        }
    }

    /// Repair values that may have been hand-edited out of range.
    pub fn sanitize(&mut self) {
        self.set_standard_arrow_count(self.standard_arrow_count);
        if !self.image_display_time.is_finite() {
            self.image_display_time = default_display_time();
        }
        self.set_display_time(self.image_display_time);
        for step in &mut self.advanced_sequence {
            *step = (*step).clamp(MIN_STEP_ARROWS, MAX_STEP_ARROWS);
        }
        if self.current_sequence_index >= self.advanced_sequence.len() {
            self.current_sequence_index = 0;
        }
    }

    pub fn mode_label(&self) -> String {
        if self.sequence_active() {
            format!(
                "Step {}/{}",
                self.current_sequence_index % self.advanced_sequence.len() + 1,
                self.advanced_sequence.len()
            )
        } else {
            format!("Standard: {} arrows", self.standard_arrow_count)
        }
    }
}
