//! Application configuration.
//!
//! Configuration is layered: a YAML file (path from `--config`, default
//! `config.yaml`) is merged with `UPGATE_`-prefixed environment variables,
//! with `__` separating nested keys. The bare `BUCKET_NAME` and `AWS_REGION`
//! variables from the original deployment environment are also accepted and
//! folded into the storage section at load time.
//!
//! ```yaml
//! host: 0.0.0.0
//! port: 8080
//! theme: glass
//! storage:
//!   region: eu-west-1
//!   bucket: demo-bucket
//! ```
//!
//! ```bash
//! # Equivalent overrides
//! UPGATE_THEME=glass
//! UPGATE_STORAGE__BUCKET=demo-bucket
//! # Or the bare AWS-style names
//! BUCKET_NAME=demo-bucket
//! AWS_REGION=eu-west-1
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "UPGATE_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Which upload form page the gateway serves at `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Plain HTML form, server-rendered result page
    #[default]
    Classic,
    /// Glassmorphism page with a client-side progress bar
    Glass,
}

impl Theme {
    /// Name of the embedded asset backing this theme's form page
    pub fn page_asset(&self) -> &'static str {
        match self {
            Theme::Classic => "classic.html",
            Theme::Glass => "glass.html",
        }
    }
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment
/// variables. All fields have defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Upload form variant served at `/`
    pub theme: Theme,
    /// Maximum accepted request body size for `/upload`, in bytes
    pub max_upload_bytes: u64,
    /// Bare `BUCKET_NAME` environment variable; folded into `storage.bucket`
    /// by [`Config::load`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    /// Bare `AWS_REGION` environment variable; folded into `storage.region`
    /// by [`Config::load`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    /// Object-storage backend configuration
    pub storage: StorageConfig,
}

/// Object-storage backend settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// AWS region for the storage client
    pub region: String,
    /// Target bucket. Without one, every upload is rejected with 400 -
    /// a missing bucket is a per-request error, never a startup failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    /// Optional custom endpoint for S3-compatible stores (MinIO, Spaces)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            theme: Theme::default(),
            max_upload_bytes: 50 * 1024 * 1024,
            bucket_name: None,
            aws_region: None,
            storage: StorageConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            bucket: None,
            endpoint_url: None,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // Bare AWS-style variables override the storage section, preserving
        // the original deployment's environment contract
        if let Some(bucket) = config.bucket_name.take() {
            config.storage.bucket = Some(bucket);
        }
        if let Some(region) = config.aws_region.take() {
            config.storage.region = region;
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_upload_bytes == 0 {
            return Err(Error::Internal {
                operation: "Config validation: max_upload_bytes must be greater than zero".to_string(),
            });
        }

        if self.storage.bucket.is_none() {
            tracing::warn!("No storage bucket configured; every upload will be rejected until one is set");
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("UPGATE_").split("__"))
            // Bare BUCKET_NAME and AWS_REGION, as the original deployment set them
            .merge(Env::raw().only(&["BUCKET_NAME", "AWS_REGION"]))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args_for(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_without_config_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args_for("missing.yaml"))?;

            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 8080);
            assert_eq!(config.theme, Theme::Classic);
            assert_eq!(config.storage.region, "us-east-1");
            assert_eq!(config.storage.bucket, None);
            assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);

            Ok(())
        });
    }

    #[test]
    fn test_yaml_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
port: 9090
theme: glass
storage:
  region: eu-west-1
  bucket: demo-bucket
"#,
            )?;

            let config = Config::load(&args_for("test.yaml"))?;

            assert_eq!(config.port, 9090);
            assert_eq!(config.theme, Theme::Glass);
            assert_eq!(config.storage.region, "eu-west-1");
            assert_eq!(config.storage.bucket.as_deref(), Some("demo-bucket"));

            Ok(())
        });
    }

    #[test]
    fn test_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "port: 9090\n")?;

            jail.set_env("UPGATE_HOST", "127.0.0.1");
            jail.set_env("UPGATE_STORAGE__BUCKET", "env-bucket");

            let config = Config::load(&args_for("test.yaml"))?;

            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 9090);
            assert_eq!(config.storage.bucket.as_deref(), Some("env-bucket"));

            Ok(())
        });
    }

    #[test]
    fn test_bare_aws_variables_fold_into_storage() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
storage:
  bucket: file-bucket
"#,
            )?;

            jail.set_env("BUCKET_NAME", "env-bucket");
            jail.set_env("AWS_REGION", "ap-southeast-2");

            let config = Config::load(&args_for("test.yaml"))?;

            // Bare variables win over the file, and never leak out as
            // top-level fields after folding
            assert_eq!(config.storage.bucket.as_deref(), Some("env-bucket"));
            assert_eq!(config.storage.region, "ap-southeast-2");
            assert_eq!(config.bucket_name, None);
            assert_eq!(config.aws_region, None);

            Ok(())
        });
    }

    #[test]
    fn test_zero_upload_limit_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "max_upload_bytes: 0\n")?;

            let result = Config::load(&args_for("test.yaml"));
            assert!(result.is_err());

            Ok(())
        });
    }
}
