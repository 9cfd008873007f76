//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourcesConfig;
use crate::error::{Error, Result};
use crate::params::ListParams;
use crate::types::JsonValue;
use serde_json::json;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Sources => self.sources(),
            Commands::Validate => self.validate(),
            Commands::Fetch {
                key,
                page,
                limit,
                params,
            } => {
                self.fetch(key.as_deref(), *page, *limit, params)
                    .await
            }
        }
    }

    fn load(&self) -> Result<SourcesConfig> {
        SourcesConfig::from_file(&self.cli.sources)
    }

    fn sources(&self) -> Result<()> {
        let config = self.load()?;
        let active = config.initial_key()?;
        let keys: Vec<JsonValue> = config
            .sources
            .iter()
            .map(|s| json!({"key": s.key, "url": s.url, "active": s.key == active}))
            .collect();
        self.emit(&JsonValue::Array(keys))
    }

    fn validate(&self) -> Result<()> {
        let config = self.load()?;
        info!(
            "Sources file {} is valid ({} sources)",
            self.cli.sources.display(),
            config.sources.len()
        );
        self.emit(&json!({"valid": true, "sources": config.sources.len()}))
    }

    async fn fetch(
        &self,
        key: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
        params: &[String],
    ) -> Result<()> {
        let config = self.load()?;
        let switch = config.build_switch()?;

        if let Some(key) = key {
            let key = key.to_string();
            if switch.get(&key).is_none() {
                return Err(Error::unknown_key(&key));
            }
            switch.set_active(key);
        }

        let pagination = switch.pagination()?;
        if let Some(page) = page {
            pagination.set_page(page);
        }
        if let Some(limit) = limit {
            pagination.set_limit(limit);
        }

        let mut overrides = ListParams::new();
        for raw in params {
            let (name, value) = parse_param(raw)?;
            overrides.insert(name, value);
        }
        let overrides = (!overrides.is_empty()).then_some(overrides);

        switch.run(overrides, Vec::new()).await?;

        let snapshot = switch.snapshot()?;
        self.emit(&json!({
            "key": switch.active_key(),
            "total": snapshot.pagination.total,
            "pagination": snapshot.pagination,
            "list": snapshot.data,
        }))
    }

    fn emit(&self, value: &JsonValue) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Parse a `key=value` parameter; the value is JSON when it parses as JSON
pub fn parse_param(raw: &str) -> Result<(String, JsonValue)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| Error::params(format!("expected key=value, got '{raw}'")))?;
    if name.is_empty() {
        return Err(Error::params(format!("empty parameter name in '{raw}'")));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::from(value));
    Ok((name.to_string(), value))
}
