//! Global storage operations
//!
//! Handles reads and telemetry updates of
//! ~/Library/Application Support/Cursor/User/globalStorage/storage.json

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::id_format::NOT_AVAILABLE;
use crate::error::{ResetError, Result};

/// The four telemetry slots Cursor keeps in storage.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelemetryField {
    MacMachineId,
    MachineId,
    DevDeviceId,
    SqmId,
}

impl TelemetryField {
    pub const ALL: [TelemetryField; 4] = [
        TelemetryField::MacMachineId,
        TelemetryField::MachineId,
        TelemetryField::DevDeviceId,
        TelemetryField::SqmId,
    ];

    /// Key inside storage.json
    pub fn key(self) -> &'static str {
        match self {
            TelemetryField::MacMachineId => "telemetry.macMachineId",
            TelemetryField::MachineId => "telemetry.machineId",
            TelemetryField::DevDeviceId => "telemetry.devDeviceId",
            TelemetryField::SqmId => "telemetry.sqmId",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TelemetryField::MacMachineId => "Mac Machine ID",
            TelemetryField::MachineId => "Machine ID",
            TelemetryField::DevDeviceId => "Device ID",
            TelemetryField::SqmId => "SQM ID",
        }
    }

    /// Whether the value is stored wrapped in `{...}`
    pub fn is_braced(self) -> bool {
        self == TelemetryField::SqmId
    }
}

/// Values of the four telemetry fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryIds {
    pub mac_machine_id: String,
    pub machine_id: String,
    pub dev_device_id: String,
    pub sqm_id: String,
}

impl TelemetryIds {
    pub fn get(&self, field: TelemetryField) -> &str {
        match field {
            TelemetryField::MacMachineId => &self.mac_machine_id,
            TelemetryField::MachineId => &self.machine_id,
            TelemetryField::DevDeviceId => &self.dev_device_id,
            TelemetryField::SqmId => &self.sqm_id,
        }
    }

    /// Build from a per-field function
    pub fn from_fn(mut f: impl FnMut(TelemetryField) -> String) -> Self {
        Self {
            mac_machine_id: f(TelemetryField::MacMachineId),
            machine_id: f(TelemetryField::MachineId),
            dev_device_id: f(TelemetryField::DevDeviceId),
            sqm_id: f(TelemetryField::SqmId),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TelemetryField, &str)> {
        TelemetryField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

/// A loaded storage.json document
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    /// File content exactly as read, written out as the backup
    raw: String,
    document: Map<String, Value>,
}

impl ConfigStore {
    /// Read and parse storage.json
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ResetError::unavailable(path, "file does not exist"));
        }

        let raw = fs::read_to_string(path).map_err(|e| ResetError::unavailable(path, e))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| ResetError::unavailable(path, format!("invalid JSON: {}", e)))?;

        let Value::Object(document) = value else {
            return Err(ResetError::unavailable(path, "top-level value is not an object"));
        };

        debug!(path = %path.display(), keys = document.len(), "loaded storage.json");

        Ok(Self {
            path: path.to_path_buf(),
            raw,
            document,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling `<name>.backup` path
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".backup");
        self.path.with_file_name(name)
    }

    /// Current telemetry values, `"N/A"` for absent or non-string fields
    pub fn ids(&self) -> TelemetryIds {
        TelemetryIds::from_fn(|field| {
            self.document
                .get(field.key())
                .and_then(|v| v.as_str())
                .unwrap_or(NOT_AVAILABLE)
                .to_string()
        })
    }

    /// Back up the file, then write the new telemetry values
    ///
    /// Only the four telemetry keys change; all other keys keep their
    /// value and position.
    pub fn write(&mut self, new_ids: &TelemetryIds) -> Result<()> {
        let backup_path = self.backup_path();
        fs::write(&backup_path, &self.raw)
            .map_err(|e| ResetError::write_failed(&backup_path, e))?;
        debug!(path = %backup_path.display(), "wrote backup");

        for (field, value) in new_ids.iter() {
            self.document
                .insert(field.key().to_string(), Value::String(value.to_string()));
        }

        let content = to_pretty_json(&self.document)
            .map_err(|e| ResetError::write_failed(&self.path, e.into()))?;
        fs::write(&self.path, &content).map_err(|e| ResetError::write_failed(&self.path, e))?;
        self.raw = content;

        Ok(())
    }
}

/// Serialize with four-space indentation
fn to_pretty_json(document: &Map<String, Value>) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
