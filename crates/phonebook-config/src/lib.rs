use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonebook";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BENCH_THREADS: usize = 100;
pub const DEFAULT_BENCH_CYCLES: usize = 500;
pub const MAX_BENCH_THREADS: usize = 1024;
pub const MAX_BENCH_CYCLES: usize = 100_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed_sample_contacts: bool,
    pub logging: LoggingConfig,
    pub bench: BenchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log method and path of every inbound request.
    pub requests: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub threads: usize,
    pub cycles: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_sample_contacts: true,
            logging: LoggingConfig { requests: true },
            bench: BenchConfig {
                threads: DEFAULT_BENCH_THREADS,
                cycles: DEFAULT_BENCH_CYCLES,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file is writable by other users: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid bench.threads value: {0} (expected 1..=1024)")]
    InvalidBenchThreads(usize),
    #[error("invalid bench.cycles value: {0} (expected 1..=100000)")]
    InvalidBenchCycles(usize),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    seed_sample_contacts: Option<bool>,
    logging: Option<LoggingFile>,
    bench: Option<BenchFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingFile {
    requests: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BenchFile {
    threads: Option<usize>,
    cycles: Option<usize>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

pub fn validate_bench(bench: BenchConfig) -> Result<BenchConfig> {
    if bench.threads == 0 || bench.threads > MAX_BENCH_THREADS {
        return Err(ConfigError::InvalidBenchThreads(bench.threads));
    }
    if bench.cycles == 0 || bench.cycles > MAX_BENCH_CYCLES {
        return Err(ConfigError::InvalidBenchCycles(bench.cycles));
    }
    Ok(bench)
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(seed) = parsed.seed_sample_contacts {
        config.seed_sample_contacts = seed;
    }

    if let Some(logging) = parsed.logging {
        if let Some(requests) = logging.requests {
            config.logging.requests = requests;
        }
    }

    if let Some(bench) = parsed.bench {
        let merged = BenchConfig {
            threads: bench.threads.unwrap_or(config.bench.threads),
            cycles: bench.cycles.unwrap_or(config.bench.cycles),
        };
        config.bench = validate_bench(merged)?;
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o002 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, validate_bench, AppConfig, BenchConfig, BenchFile,
        ConfigError, ConfigFile, LoggingFile,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            seed_sample_contacts: Some(false),
            logging: Some(LoggingFile {
                requests: Some(false),
            }),
            bench: Some(BenchFile {
                threads: Some(4),
                cycles: None,
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert!(!merged.seed_sample_contacts);
        assert!(!merged.logging.requests);
        assert_eq!(merged.bench.threads, 4);
        assert_eq!(merged.bench.cycles, AppConfig::default().bench.cycles);
    }

    #[test]
    fn merge_config_rejects_zero_threads() {
        let parsed = ConfigFile {
            seed_sample_contacts: None,
            logging: None,
            bench: Some(BenchFile {
                threads: Some(0),
                cycles: None,
            }),
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBenchThreads(0)));
    }

    #[test]
    fn validate_bench_bounds_cycles() {
        let err = validate_bench(BenchConfig {
            threads: 1,
            cycles: 0,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBenchCycles(0)));
        assert!(validate_bench(BenchConfig {
            threads: 1,
            cycles: 1
        })
        .is_ok());
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
    }

    #[test]
    fn load_at_path_skips_missing_optional_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        assert!(load_at_path(&missing, false).expect("load").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "seed_sample_contacts = false\n[logging]\nrequests = false\n[bench]\ncycles = 10\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert!(!config.seed_sample_contacts);
        assert!(!config.logging.requests);
        assert_eq!(config.bench.cycles, 10);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "listen = \"0.0.0.0:8000\"\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_accepts_default_umask_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "seed_sample_contacts = false\n").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert!(!config.seed_sample_contacts);
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_writable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "seed_sample_contacts = true\n").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o666)).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
