//! Console display adapter.
//!
//! Stands in for the TM1637 4-digit module: each new frame or brightness
//! level is logged instead of clocked out to the segment driver.

use log::info;

use crate::app::ports::DisplayPort;
use crate::app::state::DisplayFrame;

#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    brightness: u8,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayPort for ConsoleDisplay {
    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
        info!("DISPLAY | brightness={}", level);
    }

    fn show(&mut self, frame: &DisplayFrame) {
        info!("DISPLAY | [{}] brightness={}", frame, self.brightness);
    }
}
