//! Append-only snapshot archive
//!
//! One JSON object per line, one line per snapshot. Each snapshot is written
//! with a single `write_all` on a file opened in append mode, so a run that is
//! killed mid-way leaves only complete lines behind.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::engine::EngineError;
use super::states::{Body3, System3};

/// Full system state at one output time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub t: f64,
    pub bodies: Vec<Body3>,
}

impl From<&System3> for Snapshot {
    fn from(sys: &System3) -> Self {
        Self {
            t: sys.t,
            bodies: sys.bodies.clone(),
        }
    }
}

pub struct SnapshotArchive;

impl SnapshotArchive {
    /// Append one snapshot, creating the file if needed
    pub fn append(path: &Path, snapshot: &Snapshot) -> Result<(), EngineError> {
        let mut line = serde_json::to_vec(snapshot)?;
        line.push(b'\n');

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(&line)?;
        Ok(())
    }

    /// Read every snapshot in file order
    pub fn read_all(path: &Path) -> Result<Vec<Snapshot>, EngineError> {
        let reader = BufReader::new(File::open(path)?);
        let mut out = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            out.push(serde_json::from_str(&line)?);
        }
        Ok(out)
    }
}
