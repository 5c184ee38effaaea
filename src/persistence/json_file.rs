// ============================================================================
// JSON File Order Store
// Whole-book JSON document, replaced atomically on every save
// ============================================================================

use crate::domain::Order;
use crate::error::StoreError;
use crate::interfaces::OrderStore;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Stores the full order collection as a JSON array of camelCase records
/// with millisecond timestamps.
///
/// A missing file loads as an empty book.
#[derive(Debug, Clone)]
pub struct JsonFileOrderStore {
    path: PathBuf,
}

impl JsonFileOrderStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "orders.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl OrderStore for JsonFileOrderStore {
    fn load(&self) -> Result<Vec<Order>, StoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let orders: Vec<Order> = serde_json::from_slice(&data)?;
        tracing::debug!(path = %self.path.display(), orders = orders.len(), "Order book read");
        Ok(orders)
    }

    fn save(&self, orders: &[Order]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let data = serde_json::to_vec_pretty(orders)?;
        let tmp_path = self.tmp_path();

        // Write to tmp, fsync, rename
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}
