use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const ENV_PREFIX: &str = "SEO_TAGS";

/// Where page records live. Built once in `main` and passed down.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub db_path: PathBuf,
    pub table: String,
}

impl Settings {
    /// Defaults, then the optional config file, then `SEO_TAGS_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(file, ENV_PREFIX)
    }

    fn load_with_prefix(file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("db_path", "seo.db")?
            .set_default("table", "seo_scrape")?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix(env_prefix))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Command-line flags win over every other source.
    pub fn with_overrides(mut self, db_path: Option<PathBuf>, table: Option<String>) -> Self {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(table) = table {
            self.table = table;
        }
        self
    }
}
