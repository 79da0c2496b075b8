//! Builds the character service and config bundle used by front-ends.
use anyhow::{Context, Result};
use sheet_content::{Content, ContentFactory};
use sheet_runtime::{CharacterService, Repositories, SqliteStore};

use crate::config::AppConfig;

/// Builder that assembles content, storage and configuration for clients.
pub struct ServiceBuilder {
    config: AppConfig,
    content: Option<Content>,
}

impl ServiceBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            content: None,
        }
    }

    /// Provide already-loaded content instead of reading `data_dir`.
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    pub fn build(self) -> Result<ServiceSetup> {
        let content = match self.content {
            Some(content) => content,
            None => ContentFactory::new(&self.config.data_dir)
                .load_all()
                .with_context(|| {
                    format!("Failed to load content from {}", self.config.data_dir.display())
                })?,
        };

        let repos = if self.config.in_memory {
            tracing::info!("Using in-memory character store");
            Repositories::in_memory()
        } else {
            let path = self.config.database_path();
            let store = SqliteStore::open(&path)
                .with_context(|| format!("Failed to open database {}", path.display()))?;
            tracing::info!("Character database: {}", path.display());
            Repositories::sqlite(&store)
        };

        Ok(ServiceSetup {
            config: self.config,
            service: CharacterService::new(content, repos),
        })
    }
}

pub struct ServiceSetup {
    pub config: AppConfig,
    pub service: CharacterService,
}
