use std::path::PathBuf;

/// Diagnostic log rotates once it grows past this many bytes.
const DEFAULT_MAX_LOG_SIZE: u64 = 1024 * 1024;

pub trait ConfigManager: Sized + Clone + Send + Sync {
    fn get_log_path(&self) -> eyre::Result<String>;

    fn max_log_size(&self) -> u64 {
        DEFAULT_MAX_LOG_SIZE
    }
}

#[derive(Default, Clone, Debug)]
pub struct LocalConfigManager {}

impl LocalConfigManager {
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(not(target_os = "windows"))]
pub fn home_dir() -> eyre::Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| eyre::eyre!("$HOME not found"))?;
    Ok(PathBuf::from(home))
}

#[cfg(target_os = "windows")]
pub fn home_dir() -> eyre::Result<PathBuf> {
    let home = std::env::var("USERPROFILE").map_err(|_| eyre::eyre!("%userprofile% not found"))?;
    Ok(PathBuf::from(home))
}

pub fn data_dir() -> eyre::Result<PathBuf> {
    let data_dir = match std::env::var("XDG_DATA_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home_dir()?.join(".local").join("share"),
    };

    Ok(data_dir.join("conlog"))
}

impl ConfigManager for LocalConfigManager {
    fn get_log_path(&self) -> eyre::Result<String> {
        let mut log_path = data_dir()?;
        log_path.push("conlog.log");

        match log_path.to_str() {
            Some(path) => Ok(path.to_string()),
            None => Err(eyre::eyre!("Can't construct log path in data dir!")),
        }
    }
}
