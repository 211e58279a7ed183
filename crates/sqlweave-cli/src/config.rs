use serde::Deserialize;
use sqlweave::Dialect;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "sqlweave.toml";

#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    pub config_path: Option<PathBuf>,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to parse config file {}: {e:#}",
                config_path.display()
            )
        })?;

        Ok(Self {
            config_path: Some(config_path),
            file,
        })
    }

    /// Load an explicit config, or the default one if it exists.
    pub fn discover(explicit: Option<PathBuf>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::load(PathBuf::from(DEFAULT_CONFIG)),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Dialect used when neither the command line nor the query file names one.
    pub dialect: Option<Dialect>,

    #[serde(default)]
    pub placeholders: PlaceholderStyle,

    /// Print SQL with arguments inlined instead of a separate argument list.
    #[serde(default)]
    pub inline: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// Portable `?`
    #[default]
    Question,
    /// `$1`, `:1`, `@p1` depending on the dialect
    Native,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = toml::from_str(raw)?;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(Dialect::Other(name)) = &self.dialect {
            if name.is_empty() {
                anyhow::bail!("dialect must not be empty");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let file = ConfigFile::parse(
            r#"
dialect = "Oracle"
placeholders = "native"
inline = true
"#,
        )
        .unwrap();
        assert_eq!(file.dialect, Some(Dialect::Oracle));
        assert_eq!(file.placeholders, PlaceholderStyle::Native);
        assert!(file.inline);
    }

    #[test]
    fn parse_defaults() {
        let file = ConfigFile::parse("").unwrap();
        assert_eq!(file.dialect, None);
        assert_eq!(file.placeholders, PlaceholderStyle::Question);
        assert!(!file.inline);
    }

    #[test]
    fn parse_rejects_bad_values() {
        assert!(ConfigFile::parse("dialect = \"  \"").is_err());
        assert!(ConfigFile::parse("placeholders = \"dollar\"").is_err());
        assert!(ConfigFile::parse("database = \"x\"").is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ProjectConfig::load(PathBuf::from("does/not/exist.toml")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file does/not/exist.toml"));
    }
}
