//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements      | Connects to                  |
//! |------------|-----------------|------------------------------|
//! | `console`  | Transport       | stdin / stdout               |
//! | `display`  | DisplayPort     | log output                   |
//! | `eeprom`   | StoragePort     | in-memory image, optional file |
//! | `log_sink` | EventSink       | log output                   |
//! | `time`     | MonotonicClock  | `std::time::Instant`         |
//! |            | RtcPort         | software RTC over a clock    |

pub mod console;
pub mod display;
pub mod eeprom;
pub mod log_sink;
pub mod time;
