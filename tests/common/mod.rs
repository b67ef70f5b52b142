#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use jfw_codegen::config::{load_config_file, GeneratorConfig};
use jfw_codegen::schema::{import_schema, Schema};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixture files copied into every workspace
pub const FIXTURES: [&str; 3] = [
    "jfw-codegen.toml",
    "table-column-info.json",
    "procedure-parameter-info.json",
];

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A temporary directory holding the fixture config and raw exports
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        for name in FIXTURES {
            fs::copy(fixture_path(name), dir.path().join(name)).expect("copy fixture");
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Fixture configuration with every path made absolute
    pub fn config(&self) -> GeneratorConfig {
        let mut config = load_config_file(&self.join("jfw-codegen.toml"))
            .expect("parse fixture config")
            .expect("fixture config exists");
        config.fill_type_mapping();
        let root = self.path();
        config.paths.tables = root.join(&config.paths.tables);
        config.paths.column_info = root.join(&config.paths.column_info);
        config.paths.procedure_info = root.join(&config.paths.procedure_info);
        config.paths.output = root.join(&config.paths.output);
        config.paths.framework = root.join(&config.paths.framework);
        config
    }

    /// Schema built from the raw fixture exports
    pub fn import(&self, config: &GeneratorConfig) -> Schema {
        import_schema(config, &config.paths.column_info, &config.paths.procedure_info)
            .expect("import fixture records")
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative))
            .unwrap_or_else(|e| panic!("read {relative}: {e}"))
    }
}
