//! EEPROM adapter.
//!
//! Implements [`StoragePort`] over an in-memory byte image that starts
//! erased (all 0xFF). When opened with a path, every write is flushed to
//! that file so settings survive a restart of the simulator.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{StorageError, StoragePort};

/// Size of the emulated part (ATmega328P EEPROM).
pub const EEPROM_SIZE: usize = 1024;

const ERASED: u8 = 0xFF;

pub struct EepromAdapter {
    bytes: Vec<u8>,
    path: Option<PathBuf>,
    writes: usize,
}

impl Default for EepromAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EepromAdapter {
    /// Erased, memory-only EEPROM.
    pub fn new() -> Self {
        Self {
            bytes: vec![ERASED; EEPROM_SIZE],
            path: None,
            writes: 0,
        }
    }

    /// Load an image from `path`, or start erased if the file is missing.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let mut bytes = match std::fs::read(path) {
            Ok(bytes) => {
                info!("EEPROM: loaded {} bytes from {}", bytes.len(), path.display());
                bytes
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("EEPROM: {} not found, starting erased", path.display());
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        bytes.resize(EEPROM_SIZE, ERASED);

        Ok(Self {
            bytes,
            path: Some(path.to_path_buf()),
            writes: 0,
        })
    }

    /// Writes performed since construction.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn flush(&self) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        std::fs::write(path, &self.bytes).map_err(|e| {
            warn!("EEPROM: flush to {} failed: {}", path.display(), e);
            StorageError::IoError
        })
    }
}

impl StoragePort for EepromAdapter {
    fn capacity(&self) -> usize {
        self.bytes.len()
    }

    fn read(&self, addr: usize) -> Result<u8, StorageError> {
        self.bytes.get(addr).copied().ok_or(StorageError::OutOfBounds(addr))
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<(), StorageError> {
        let slot = self.bytes.get_mut(addr).ok_or(StorageError::OutOfBounds(addr))?;
        *slot = value;
        self.writes += 1;
        self.flush()
    }
}
