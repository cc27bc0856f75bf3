//! Byte-addressed settings store.
//!
//! ```text
//!  addr  field               valid        default
//!  0x00  brightness          0..=7        5
//!  0x01  time format         0 | 1        0 (24h)
//!  0x02  timezone id         table id     0 (UTC)
//!  0x03  rules version tag   1..=254      RULES_VERSION
//!  0x04  schedule enabled    0 | 1        0
//!  0x05  dim hour            0..=23       22
//!  0x06  dim minute          0..=59       0
//!  0x07  bright hour         0..=23       7
//!  0x08  bright minute       0..=59       0
//!  0x09  dim brightness      0..=7        1
//!  0x0A  bright brightness   0..=7        5
//! ```
//!
//! A tag byte of 0x00 or 0xFF marks a store that has never been written.
//! Every other out-of-range byte is treated as corrupt and read back as the
//! field's default. Writes are skipped when the stored byte already matches.

use heapless::Vec;
use log::{debug, info, warn};

use crate::app::ports::{ConfigError, StoragePort};
use crate::config::{MAX_BRIGHTNESS, RULES_VERSION, ScheduleSettings, Settings, TimeFormat, TimeOfDay};
use crate::timezone;

/// Bytes used by the layout above.
pub const STORE_SIZE: usize = 11;

const BLANK_TAGS: [u8; 2] = [0x00, 0xFF];

// ───────────────────────────────────────────────────────────────
// Field map
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Brightness,
    TimeFormat,
    TimezoneId,
    RulesVersion,
    ScheduleEnabled,
    DimHour,
    DimMinute,
    BrightHour,
    BrightMinute,
    DimBrightness,
    BrightBrightness,
}

impl Field {
    pub const ALL: [Field; STORE_SIZE] = [
        Field::Brightness,
        Field::TimeFormat,
        Field::TimezoneId,
        Field::RulesVersion,
        Field::ScheduleEnabled,
        Field::DimHour,
        Field::DimMinute,
        Field::BrightHour,
        Field::BrightMinute,
        Field::DimBrightness,
        Field::BrightBrightness,
    ];

    pub fn addr(self) -> usize {
        match self {
            Self::Brightness => 0x00,
            Self::TimeFormat => 0x01,
            Self::TimezoneId => 0x02,
            Self::RulesVersion => 0x03,
            Self::ScheduleEnabled => 0x04,
            Self::DimHour => 0x05,
            Self::DimMinute => 0x06,
            Self::BrightHour => 0x07,
            Self::BrightMinute => 0x08,
            Self::DimBrightness => 0x09,
            Self::BrightBrightness => 0x0A,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::TimeFormat => "time_format",
            Self::TimezoneId => "timezone_id",
            Self::RulesVersion => "rules_version",
            Self::ScheduleEnabled => "schedule_enabled",
            Self::DimHour => "dim_hour",
            Self::DimMinute => "dim_minute",
            Self::BrightHour => "bright_hour",
            Self::BrightMinute => "bright_minute",
            Self::DimBrightness => "dim_brightness",
            Self::BrightBrightness => "bright_brightness",
        }
    }

    pub fn is_valid(self, value: u8) -> bool {
        match self {
            Self::Brightness | Self::DimBrightness | Self::BrightBrightness => value <= MAX_BRIGHTNESS,
            Self::TimeFormat | Self::ScheduleEnabled => value <= 1,
            Self::TimezoneId => timezone::lookup(value).is_some(),
            Self::RulesVersion => !BLANK_TAGS.contains(&value),
            Self::DimHour | Self::BrightHour => value < 24,
            Self::DimMinute | Self::BrightMinute => value < 60,
        }
    }

    pub fn default_value(self) -> u8 {
        self.value_in(&Settings::default())
    }

    /// The byte this field is stored as for `settings`.
    pub fn value_in(self, settings: &Settings) -> u8 {
        let s = &settings.schedule;
        match self {
            Self::Brightness => settings.brightness,
            Self::TimeFormat => settings.time_format.flag(),
            Self::TimezoneId => settings.timezone_id,
            Self::RulesVersion => settings.rules_version,
            Self::ScheduleEnabled => u8::from(s.enabled),
            Self::DimHour => s.dim_at.hour,
            Self::DimMinute => s.dim_at.minute,
            Self::BrightHour => s.bright_at.hour,
            Self::BrightMinute => s.bright_at.minute,
            Self::DimBrightness => s.dim_brightness,
            Self::BrightBrightness => s.bright_brightness,
        }
    }
}

/// Outcome of [`ConfigStore::version_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    Current,
    /// Never written; defaults were stamped.
    Blank,
    /// Written by a build with a different rule table.
    Mismatch { stored: u8, current: u8 },
}

// ───────────────────────────────────────────────────────────────
// ConfigStore
// ───────────────────────────────────────────────────────────────

pub struct ConfigStore<S: StoragePort> {
    storage: S,
}

impl<S: StoragePort> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        if storage.capacity() < STORE_SIZE {
            warn!(
                "STORE | capacity {} < {} bytes, trailing fields read as defaults",
                storage.capacity(),
                STORE_SIZE
            );
        }
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read every field, substituting defaults for corrupt bytes. Never fails.
    pub fn load(&self) -> Settings {
        if self.is_blank() {
            debug!("STORE | blank, using defaults");
            return Settings::default();
        }

        let get = |field: Field| self.read_or_default(field);
        let dim_at = TimeOfDay::from_checked(get(Field::DimHour), get(Field::DimMinute));
        let bright_at = TimeOfDay::from_checked(get(Field::BrightHour), get(Field::BrightMinute));

        Settings {
            brightness: get(Field::Brightness),
            time_format: TimeFormat::from_flag(get(Field::TimeFormat)).unwrap_or_default(),
            timezone_id: get(Field::TimezoneId),
            rules_version: get(Field::RulesVersion),
            schedule: ScheduleSettings {
                enabled: get(Field::ScheduleEnabled) == 1,
                dim_at,
                bright_at,
                dim_brightness: get(Field::DimBrightness),
                bright_brightness: get(Field::BrightBrightness),
            },
        }
    }

    /// Validate and persist one field.
    ///
    /// Returns `Ok(true)` if the byte was written, `Ok(false)` if it already
    /// held `value`.
    pub fn set(&mut self, field: Field, value: u8) -> Result<bool, ConfigError> {
        if !field.is_valid(value) {
            return Err(ConfigError::ValidationFailed(field.name()));
        }
        self.write_if_changed(field, value)
    }

    /// Validate every pair, then persist them as a batch.
    ///
    /// Nothing is written if any value is invalid or any prior byte is
    /// unreadable. If a write fails part way, the bytes already written are
    /// restored. Returns the number of bytes actually written.
    pub fn set_all(&mut self, fields: &[(Field, u8)]) -> Result<usize, ConfigError> {
        if let Some((field, _)) = fields.iter().find(|(f, v)| !f.is_valid(*v)) {
            return Err(ConfigError::ValidationFailed(field.name()));
        }

        let mut prior: Vec<(Field, u8), STORE_SIZE> = Vec::new();
        for &(field, _) in fields {
            let byte = self.storage.read(field.addr())?;
            prior
                .push((field, byte))
                .map_err(|_| ConfigError::ValidationFailed("batch"))?;
        }

        let mut written = 0;
        for (i, &(field, value)) in fields.iter().enumerate() {
            if prior[i].1 == value {
                continue;
            }
            if let Err(e) = self.storage.write(field.addr(), value) {
                self.restore(&prior[..i]);
                return Err(e.into());
            }
            written += 1;
        }
        Ok(written)
    }

    /// Compare the stored tag with [`RULES_VERSION`].
    ///
    /// A blank store gets every default plus the current tag. A mismatch is
    /// logged and the tag is restamped; other fields are left alone.
    pub fn version_check(&mut self) -> VersionStatus {
        if self.is_blank() {
            info!("STORE | blank, writing defaults (rules v{})", RULES_VERSION);
            let defaults = Settings::default();
            for field in Field::ALL {
                if let Err(e) = self.write_if_changed(field, field.value_in(&defaults)) {
                    warn!("STORE | init {} failed: {}", field.name(), e);
                }
            }
            return VersionStatus::Blank;
        }

        let stored = self.read_or_default(Field::RulesVersion);
        if stored == RULES_VERSION {
            return VersionStatus::Current;
        }

        warn!("STORE | rules version mismatch: stored={} current={}", stored, RULES_VERSION);
        if let Err(e) = self.write_if_changed(Field::RulesVersion, RULES_VERSION) {
            warn!("STORE | restamp failed: {}", e);
        }
        VersionStatus::Mismatch {
            stored,
            current: RULES_VERSION,
        }
    }

    // ── Internals ─────────────────────────────────────────────

    fn is_blank(&self) -> bool {
        match self.storage.read(Field::RulesVersion.addr()) {
            Ok(tag) => BLANK_TAGS.contains(&tag),
            Err(_) => true,
        }
    }

    fn read_or_default(&self, field: Field) -> u8 {
        match self.storage.read(field.addr()) {
            Ok(value) if field.is_valid(value) => value,
            Ok(value) => {
                debug!("STORE | {}=0x{:02X} out of range, using default", field.name(), value);
                field.default_value()
            }
            Err(e) => {
                debug!("STORE | {} unreadable ({}), using default", field.name(), e);
                field.default_value()
            }
        }
    }

    /// Put back bytes captured before a failed batch.
    fn restore(&mut self, prior: &[(Field, u8)]) {
        for &(field, byte) in prior.iter().rev() {
            if matches!(self.storage.read(field.addr()), Ok(current) if current == byte) {
                continue;
            }
            if let Err(e) = self.storage.write(field.addr(), byte) {
                warn!("STORE | rollback of {} failed: {}", field.name(), e);
            }
        }
    }

    fn write_if_changed(&mut self, field: Field, value: u8) -> Result<bool, ConfigError> {
        let addr = field.addr();
        if matches!(self.storage.read(addr), Ok(current) if current == value) {
            return Ok(false);
        }
        self.storage.write(addr, value)?;
        Ok(true)
    }
}
