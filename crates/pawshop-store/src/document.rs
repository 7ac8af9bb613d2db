//! # Document Store
//!
//! Each collection lives in one named slot, stored as a pretty-printed
//! JSON file in the data directory. Reads and writes are whole-document:
//! the application layer holds collections in memory and saves a slot
//! after each mutation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StoreResult;

/// Slot names, one per collection.
pub mod slots {
    pub const PRODUCTS: &str = "products";
    pub const SUPPLIERS: &str = "suppliers";
    pub const CUSTOMERS: &str = "customers";
    pub const PURCHASES: &str = "purchases";
    pub const SALES: &str = "sales";
    pub const CUSTOMER_HISTORY: &str = "customer_history";
    pub const CART: &str = "cart";
    pub const ORDERS: &str = "orders";
    pub const COUNTERS: &str = "counters";
}

/// Whole-document JSON persistence rooted at one data directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    /// Opens a store at the given directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "document store opened");
        Ok(DocumentStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Loads a slot, falling back to `T::default()` when the file is
    /// missing or unreadable. Corruption in one slot never affects any
    /// other slot.
    pub fn load<T>(&self, slot: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.slot_path(slot);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(slot, "slot not found, using default");
                return T::default();
            }
            Err(err) => {
                warn!(slot, %err, "failed to read slot, using default");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(slot, %err, "corrupt slot, using default");
                T::default()
            }
        }
    }

    /// Saves a slot. Writes to a sibling temp file first, then renames
    /// over the slot, so a crash mid-write leaves the old document
    /// intact.
    pub fn save<T>(&self, slot: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let json = serde_json::to_string_pretty(value)?;
        let path = self.slot_path(slot);
        let tmp = self.dir.join(format!("{slot}.json.tmp"));

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        debug!(slot, "slot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Inventory {
        names: Vec<String>,
    }

    #[test]
    fn test_missing_slot_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let inventory: Inventory = store.load(slots::PRODUCTS);
        assert!(inventory.names.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let inventory = Inventory {
            names: vec!["Dog Food".to_string(), "Cat Litter".to_string()],
        };
        store.save(slots::PRODUCTS, &inventory).unwrap();

        let loaded: Inventory = store.load(slots::PRODUCTS);
        assert_eq!(loaded, inventory);
    }

    #[test]
    fn test_corrupt_slot_falls_back_and_stays_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        let good = Inventory {
            names: vec!["Aquarium".to_string()],
        };
        store.save(slots::SUPPLIERS, &good).unwrap();
        std::fs::write(dir.path().join("products.json"), "{not json").unwrap();

        let corrupt: Inventory = store.load(slots::PRODUCTS);
        assert!(corrupt.names.is_empty());

        // The neighboring slot is untouched.
        let intact: Inventory = store.load(slots::SUPPLIERS);
        assert_eq!(intact, good);
    }

    #[test]
    fn test_save_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        store
            .save(
                slots::SALES,
                &Inventory {
                    names: vec!["a".into(), "b".into()],
                },
            )
            .unwrap();
        store
            .save(
                slots::SALES,
                &Inventory {
                    names: vec!["c".into()],
                },
            )
            .unwrap();

        let loaded: Inventory = store.load(slots::SALES);
        assert_eq!(loaded.names, vec!["c".to_string()]);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(dir.path()).unwrap();

        store
            .save(slots::CART, &Inventory { names: vec![] })
            .unwrap();
        assert!(dir.path().join("cart.json").exists());
        assert!(!dir.path().join("cart.json.tmp").exists());
    }
}
