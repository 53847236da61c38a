//! JSONL (JSON Lines) and JSON array files.
//!
//! Each JSONL line is a valid JSON object representing one record. Reads are
//! strict: a session log that silently lost a game would shift every
//! position after it.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::StorageError;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write records, replacing the entire file.
    pub fn write_all(&self, records: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let mut count = 0;

        for record in records {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
            count += 1;
        }

        writer.flush()?;
        info!("Wrote {} records to {:?}", count, self.path);

        Ok(count)
    }
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all records in file order. Blank lines are skipped; a line that
    /// fails to parse is an error.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record = serde_json::from_str(&line).map_err(|source| StorageError::Line {
                path: self.path.clone(),
                line: index + 1,
                source,
            })?;
            records.push(record);
        }

        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

/// Read records from a `.json` file holding an array, or from JSONL
/// otherwise.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let is_json_array = path.extension().is_some_and(|ext| ext == "json");
    if !is_json_array {
        return JsonlReader::new(path.to_path_buf()).read_all();
    }

    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let records: Vec<T> = serde_json::from_reader(BufReader::new(file))?;
    debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
