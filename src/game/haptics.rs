use log::warn;
use std::io::Write;

/// Tactile feedback. On a terminal the closest thing is the bell.
pub trait Haptics {
    fn pulse(&mut self);
}

pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Haptics for TerminalBell {
    fn pulse(&mut self) {
        if !self.enabled {
            return;
        }
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            warn!("Bell failed: {}", e);
        }
    }
}

#[cfg(test)]
pub struct CountingHaptics {
    pub pulses: std::rc::Rc<std::cell::Cell<u32>>,
}

#[cfg(test)]
impl Haptics for CountingHaptics {
    fn pulse(&mut self) {
        self.pulses.set(self.pulses.get() + 1);
    }
}
