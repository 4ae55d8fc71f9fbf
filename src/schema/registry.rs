//! Schema registry for loading named schemas from disk
//!
//! Schemas are stored one per file as `<name>.json` inside a configured
//! directory. Registered schemas are immutable: a name can be bound once.
//! The registry never validates data itself - callers fetch a `&Schema` and
//! construct a validator.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// In-memory registry of named schemas, backed by a directory of JSON files.
pub struct SchemaRegistry {
    /// Directory containing `<name>.json` schema files
    schema_dir: PathBuf,
    /// Loaded schemas indexed by name
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    /// Creates a registry rooted at the given directory.
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` schema file from the schema directory.
    ///
    /// A missing directory is created and treated as empty. Malformed files
    /// abort the load with an error naming the file.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::io(self.schema_dir.display().to_string(), e.to_string())
            })?;
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::io(self.schema_dir.display().to_string(), e.to_string())
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::io(self.schema_dir.display().to_string(), e.to_string())
            })?;
            let path = entry.path();

            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            self.load_file(&path)?;
        }

        Ok(())
    }

    /// Loads a single schema file; the file stem becomes the schema name.
    fn load_file(&mut self, path: &Path) -> SchemaResult<()> {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                SchemaError::malformed(path.display().to_string(), "file name is not valid UTF-8")
            })?
            .to_string();

        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::io(path.display().to_string(), e.to_string()))?;

        let schema: Schema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema.check_structure().map_err(|e| {
            SchemaError::malformed(path.display().to_string(), e.to_string())
        })?;

        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Registers a schema directly (for tests or programmatic creation).
    ///
    /// Re-registering an existing name is rejected.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> SchemaResult<()> {
        let name = name.into();

        schema
            .check_structure()
            .map_err(|e| SchemaError::malformed("<in-memory>", e.to_string()))?;

        if self.schemas.contains_key(&name) {
            return Err(SchemaError::Immutable(name));
        }

        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Checks whether a schema name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Returns the registered schema names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Saves a schema to disk at `<dir>/<name>.json`.
    ///
    /// An existing file is never overwritten.
    pub fn save(&self, name: &str, schema: &Schema) -> SchemaResult<PathBuf> {
        let path = self.schema_dir.join(format!("{}.json", name));

        if path.exists() {
            return Err(SchemaError::Immutable(name.to_string()));
        }

        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::io(self.schema_dir.display().to_string(), e.to_string())
            })?;
        }

        let content = serde_json::to_string_pretty(schema)
            .map_err(|e| SchemaError::io(path.display().to_string(), e.to_string()))?;

        fs::write(&path, content)
            .map_err(|e| SchemaError::io(path.display().to_string(), e.to_string()))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_schema() -> Schema {
        Schema::object()
            .with_property("name", Schema::string())
            .require("name")
    }

    #[test]
    fn test_register_and_get() {
        let tmp = TempDir::new().unwrap();
        let mut registry = SchemaRegistry::new(tmp.path());

        registry.register("users", sample_schema()).unwrap();

        let schema = registry.get("users").unwrap();
        assert_eq!(schema.required, vec!["name"]);
        assert!(registry.contains("users"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_twice_rejected() {
        let tmp = TempDir::new().unwrap();
        let mut registry = SchemaRegistry::new(tmp.path());

        registry.register("users", sample_schema()).unwrap();

        let result = registry.register("users", sample_schema());
        assert!(matches!(result, Err(SchemaError::Immutable(_))));
    }

    #[test]
    fn test_register_rejects_bad_pattern() {
        let tmp = TempDir::new().unwrap();
        let mut registry = SchemaRegistry::new(tmp.path());

        let schema =
            Schema::object().with_property("code", Schema::string().with_pattern("[oops"));
        let result = registry.register("codes", schema);
        assert!(matches!(result, Err(SchemaError::Malformed { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let registry = SchemaRegistry::new(tmp.path());
        registry.save("users", &sample_schema()).unwrap();

        let mut reloaded = SchemaRegistry::new(tmp.path());
        reloaded.load_all().unwrap();

        assert!(reloaded.contains("users"));
        assert_eq!(reloaded.get("users").unwrap().required, vec!["name"]);
    }

    #[test]
    fn test_save_twice_rejected() {
        let tmp = TempDir::new().unwrap();
        let registry = SchemaRegistry::new(tmp.path());

        registry.save("users", &sample_schema()).unwrap();
        let result = registry.save("users", &sample_schema());
        assert!(matches!(result, Err(SchemaError::Immutable(_))));
    }

    #[test]
    fn test_load_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let mut registry = SchemaRegistry::new(tmp.path().join("nonexistent"));

        registry.load_all().unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_malformed_file_names_it() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();

        let mut registry = SchemaRegistry::new(tmp.path());
        let result = registry.load_all();

        match result {
            Err(SchemaError::Malformed { source_name, .. }) => {
                assert!(source_name.contains("broken.json"));
            }
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_files_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignore me").unwrap();

        let mut registry = SchemaRegistry::new(tmp.path());
        registry.load_all().unwrap();
        assert!(registry.is_empty());
    }
}
