//! JSON Record Store - load/save một collection có key ra file phẳng.
//!
//! `load` trên file thiếu, rỗng hoặc parse lỗi trả về `T::default()`:
//! corruption đổi lấy availability, không bao giờ nổ lên caller.
//! `save` overwrite toàn bộ file; caller tự chịu trách nhiệm về
//! read-modify-write.

use crate::error::PersistenceResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Store một giá trị `T` (thường là map hoặc vec) tại một đường dẫn cố định.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Đọc collection từ file. Thiếu file / file rỗng / JSON hỏng
    /// đều trả về `T::default()`.
    pub fn load(&self) -> T {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return T::default(),
        };
        if content.trim().is_empty() {
            return T::default();
        }
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Ghi đè toàn bộ file bằng collection mới (pretty-printed JSON).
    /// Tạo thư mục cha nếu chưa có.
    pub fn save(&self, value: &T) -> PersistenceResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    type Map = BTreeMap<String, i64>;

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Map> = JsonStore::new(dir.path().join("missing.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_empty_file_returns_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "").unwrap();

        let store: JsonStore<Map> = JsonStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_returns_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        fs::write(&path, "{not valid json!").unwrap();

        let store: JsonStore<Map> = JsonStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_wrong_shape_returns_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wrong.json");
        // Hợp lệ JSON nhưng không phải map
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store: JsonStore<Map> = JsonStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Map> = JsonStore::new(dir.path().join("map.json"));

        let mut map = Map::new();
        map.insert("alice".to_string(), 500_000);
        map.insert("bob".to_string(), 1_000);

        store.save(&map).unwrap();
        assert_eq!(store.load(), map);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Map> = JsonStore::new(dir.path().join("map.json"));

        let mut map = Map::new();
        map.insert("alice".to_string(), 1);
        store.save(&map).unwrap();

        let replacement = Map::new();
        store.save(&replacement).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let store: JsonStore<Map> = JsonStore::new(dir.path().join("nested/deep/map.json"));
        store.save(&Map::new()).unwrap();
        assert!(store.path().exists());
    }
}
