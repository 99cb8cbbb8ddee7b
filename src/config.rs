use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "covgate.toml";
pub const DEFAULT_REPORT: &str = "lcov.info";
pub const DEFAULT_PREFIX: &str = "src/";

/// Settings the gate runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Report location, relative paths resolve against `root`
    pub report: PathBuf,
    /// Directory record paths are made relative to
    pub root: PathBuf,
    /// Records whose relative path starts with this are gated
    pub prefix: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    gate: GateSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GateSection {
    #[serde(default)]
    report: Option<PathBuf>,
    #[serde(default)]
    root: Option<PathBuf>,
    #[serde(default)]
    prefix: Option<String>,
}

/// Values given on the command line
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub report: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub prefix: Option<String>,
}

impl GateConfig {
    /// Defaults for `root`, which is used as-is
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            report: PathBuf::from(DEFAULT_REPORT),
            root,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Build the configuration from defaults, the config file and CLI overrides.
    ///
    /// An explicit `config_path` must exist; otherwise `covgate.toml` in `cwd`
    /// is read when present.
    pub fn load(cwd: &Path, config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = Self::with_root(cwd.to_path_buf());

        let file_path = match config_path {
            Some(path) => Some(cwd.join(path)),
            None => Some(cwd.join(CONFIG_FILE)).filter(|p| p.is_file()),
        };

        if let Some(path) = file_path {
            config.merge_file(&path)?;
        }

        if let Some(report) = &overrides.report {
            config.report = cwd.join(report);
        }
        if let Some(root) = &overrides.root {
            config.root = cwd.join(root);
        }
        if let Some(prefix) = &overrides.prefix {
            config.prefix = prefix.clone();
        }

        config.root = fs::canonicalize(&config.root)
            .with_context(|| format!("Could not find root directory: {}", config.root.display()))?;

        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let section = file.gate;

        if let Some(root) = section.root {
            self.root = base_dir.join(root);
        }
        if let Some(report) = section.report {
            self.report = report;
        }
        if let Some(prefix) = section.prefix {
            self.prefix = prefix;
        }

        Ok(())
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join(&self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn canonical(dir: &TempDir) -> PathBuf {
        fs::canonicalize(dir.path()).unwrap()
    }

    #[test]
    fn test_defaults_without_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = canonical(&temp_dir);

        let config = GateConfig::load(&cwd, None, &Overrides::default()).unwrap();

        assert_eq!(config.root, cwd);
        assert_eq!(config.prefix, "src/");
        assert_eq!(config.report_path(), cwd.join("lcov.info"));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[gate]
report = "coverage/lcov.info"
prefix = "contracts/"
"#;

        let file: ConfigFile = toml::from_str(toml_content).unwrap();
        assert_eq!(file.gate.report, Some(PathBuf::from("coverage/lcov.info")));
        assert_eq!(file.gate.prefix.as_deref(), Some("contracts/"));
        assert_eq!(file.gate.root, None);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: std::result::Result<ConfigFile, _> = toml::from_str("[gate]\nthreshold = 90\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_file_in_cwd() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = canonical(&temp_dir);
        fs::create_dir_all(cwd.join("packages/core")).unwrap();
        fs::write(
            cwd.join(CONFIG_FILE),
            "[gate]\nroot = \"packages/core\"\nprefix = \"lib/\"\n",
        )
        .unwrap();

        let config = GateConfig::load(&cwd, None, &Overrides::default()).unwrap();

        assert_eq!(config.root, cwd.join("packages/core"));
        assert_eq!(config.prefix, "lib/");
        assert_eq!(config.report_path(), cwd.join("packages/core/lcov.info"));
    }

    #[test]
    fn test_overrides_win_over_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = canonical(&temp_dir);
        fs::write(cwd.join(CONFIG_FILE), "[gate]\nprefix = \"lib/\"\n").unwrap();

        let overrides = Overrides {
            report: Some(PathBuf::from("out/lcov.info")),
            prefix: Some("contracts/".to_string()),
            ..Default::default()
        };
        let config = GateConfig::load(&cwd, None, &overrides).unwrap();

        assert_eq!(config.prefix, "contracts/");
        assert_eq!(config.report_path(), cwd.join("out/lcov.info"));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = canonical(&temp_dir);

        let result = GateConfig::load(&cwd, Some(Path::new("missing.toml")), &Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = canonical(&temp_dir);

        let overrides = Overrides {
            root: Some(PathBuf::from("does-not-exist")),
            ..Default::default()
        };
        let err = GateConfig::load(&cwd, None, &overrides).unwrap_err();
        assert!(err.to_string().contains("Could not find root directory"));
    }
}
