//! Flat-file record collection: one JSON array per file.
//!
//! Every mutation reads the whole array, edits it and writes it back through a
//! temporary sibling file that is renamed over the original. A mutex per
//! collection serializes writers inside the process.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::domain::error::HedgefundError;
use crate::domain::records::Record;
use crate::ports::record_port::RecordPort;

pub const SIMULATIONS_FILE: &str = "simulations.json";
pub const AGENTS_FILE: &str = "agents.json";

pub struct JsonFileStore<R> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonFileStore<R> {
    /// Open `file_name` inside `data_dir`, creating the directory if needed.
    /// The file itself is created on first write.
    pub fn open(data_dir: &Path, file_name: &str) -> Result<Self, HedgefundError> {
        fs::create_dir_all(data_dir).map_err(|e| storage_error(data_dir, e))?;
        Ok(Self {
            path: data_dir.join(file_name),
            lock: Mutex::new(()),
            _record: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // Poisoning is ignored: the file is only ever replaced by rename.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<Vec<R>, HedgefundError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| storage_error(&self.path, e))
    }

    fn save(&self, records: &[R]) -> Result<(), HedgefundError> {
        let body = serde_json::to_string_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, body).map_err(|e| storage_error(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| storage_error(&self.path, e))?;
        Ok(())
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> HedgefundError {
    HedgefundError::Storage {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

impl<R: Record> RecordPort<R> for JsonFileStore<R> {
    fn list(&self) -> Result<Vec<R>, HedgefundError> {
        let _guard = self.guard();
        self.load()
    }

    fn get(&self, id: &str) -> Result<R, HedgefundError> {
        let _guard = self.guard();
        self.load()?
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| HedgefundError::not_found(R::KIND, id))
    }

    fn create(&self, record: R) -> Result<R, HedgefundError> {
        let _guard = self.guard();
        let mut records = self.load()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(HedgefundError::invalid(
                "id",
                format!("{} with ID {} already exists", R::KIND, record.id()),
            ));
        }
        records.push(record.clone());
        self.save(&records)?;
        tracing::info!(kind = R::KIND, id = record.id(), "record created");
        Ok(record)
    }

    fn update(&self, id: &str, edit: &mut dyn FnMut(&mut R)) -> Result<R, HedgefundError> {
        let _guard = self.guard();
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| HedgefundError::not_found(R::KIND, id))?;
        edit(record);
        let updated = record.clone();
        self.save(&records)?;
        tracing::info!(kind = R::KIND, id, "record updated");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<(), HedgefundError> {
        let _guard = self.guard();
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(HedgefundError::not_found(R::KIND, id));
        }
        self.save(&records)?;
        tracing::info!(kind = R::KIND, id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::{new_record_id, AgentRecord, CustomAgentRequest};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn agent(name: &str) -> AgentRecord {
        let now = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        AgentRecord::new(
            new_record_id(),
            CustomAgentRequest {
                name: name.into(),
                description: "d".into(),
                strategy: "s".into(),
                risk_tolerance: "low".into(),
                time_horizon: "long-term".into(),
                objectives: "o".into(),
            },
            now,
        )
    }

    fn store(dir: &TempDir) -> JsonFileStore<AgentRecord> {
        JsonFileStore::open(dir.path(), AGENTS_FILE).unwrap()
    }

    #[test]
    fn missing_file_lists_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).list().unwrap().is_empty());
    }

    #[test]
    fn open_creates_nested_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        JsonFileStore::<AgentRecord>::open(&nested, AGENTS_FILE).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn blank_file_lists_empty() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        fs::write(s.path(), "  \n").unwrap();
        assert!(s.list().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        fs::write(s.path(), "[{").unwrap();
        assert!(matches!(s.list(), Err(HedgefundError::Storage { .. })));
    }

    #[test]
    fn create_then_get() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let created = s.create(agent("Value")).unwrap();
        assert_eq!(s.get(&created.id).unwrap(), created);
    }

    #[test]
    fn duplicate_id_rejected() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let a = s.create(agent("Value")).unwrap();
        assert!(matches!(
            s.create(a),
            Err(HedgefundError::InvalidInput { .. })
        ));
        assert_eq!(s.list().unwrap().len(), 1);
    }

    #[test]
    fn update_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let err = s.update("nope", &mut |a| a.name.clear()).unwrap_err();
        assert!(matches!(err, HedgefundError::NotFound { .. }));
    }

    #[test]
    fn update_persists() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let a = s.create(agent("Old")).unwrap();
        s.update(&a.id, &mut |r| r.name = "New".into()).unwrap();
        assert_eq!(s.get(&a.id).unwrap().name, "New");
    }

    #[test]
    fn delete_removes_and_second_delete_is_not_found() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let a = s.create(agent("Gone")).unwrap();
        s.delete(&a.id).unwrap();
        assert!(matches!(s.get(&a.id), Err(HedgefundError::NotFound { .. })));
        assert!(matches!(s.delete(&a.id), Err(HedgefundError::NotFound { .. })));
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        s.create(agent("A")).unwrap();
        assert!(s.path().exists());
        assert!(!s.path().with_extension("json.tmp").exists());
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(s.path()).unwrap()).unwrap();
        assert!(parsed.is_array());
    }
}
