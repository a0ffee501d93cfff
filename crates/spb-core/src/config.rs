use std::{
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{errors::Error, Result};

/// Typed runtime configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub steam_api_key: String,

    /// Fixed inter-tick delay of the polling loop. This is the only pacing
    /// control; there is no backoff.
    pub poll_interval: Duration,

    pub config_path: PathBuf,
}

/// On-disk credential file (`config.json` by default).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    telegram_token: String,
    #[serde(default)]
    steam_api_key: String,
}

impl Config {
    /// Load configuration: config file first, then environment (with a
    /// minimal `.env` loader), then an interactive stdin prompt for whichever
    /// credential is still missing. When a prompt was needed, the merged
    /// credentials are written back so the next run starts unattended.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let config_path = env_path("CONFIG_FILE").unwrap_or_else(|| PathBuf::from("config.json"));
        let file = read_config_file(&config_path);

        let mut telegram_bot_token = non_empty(file.telegram_token)
            .or_else(|| env_str("TELEGRAM_BOT_TOKEN").and_then(non_empty))
            .unwrap_or_default();
        let mut steam_api_key = non_empty(file.steam_api_key)
            .or_else(|| env_str("STEAM_API_KEY").and_then(non_empty))
            .unwrap_or_default();

        let prompted = telegram_bot_token.is_empty() || steam_api_key.is_empty();
        if telegram_bot_token.is_empty() {
            telegram_bot_token = prompt_line("Enter your Telegram Bot Token: ")?;
        }
        if steam_api_key.is_empty() {
            steam_api_key = prompt_line("Enter your Steam API Key: ")?;
        }

        if telegram_bot_token.is_empty() {
            return Err(Error::Config("Telegram bot token is required".to_string()));
        }
        if steam_api_key.is_empty() {
            return Err(Error::Config("Steam API key is required".to_string()));
        }

        if prompted {
            write_config_file(
                &config_path,
                &ConfigFile {
                    telegram_token: telegram_bot_token.clone(),
                    steam_api_key: steam_api_key.clone(),
                },
            )?;
        }

        let poll_interval = Duration::from_secs(env_u64("POLL_INTERVAL_SECS").unwrap_or(10));

        Ok(Self {
            telegram_bot_token,
            steam_api_key,
            poll_interval,
            config_path,
        })
    }
}

fn read_config_file(path: &Path) -> ConfigFile {
    let Ok(txt) = fs::read_to_string(path) else {
        return ConfigFile::default();
    };
    match serde_json::from_str(&txt) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error reading {}: {e}; requesting new data", path.display());
            ConfigFile::default()
        }
    }
}

fn write_config_file(path: &Path, file: &ConfigFile) -> Result<()> {
    let txt = serde_json::to_string_pretty(file)?;
    fs::write(path, txt)?;
    Ok(())
}

fn prompt_line(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_file(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_millis();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    #[test]
    fn config_file_round_trips() {
        let path = tmp_file("spb-config-test");
        let file = ConfigFile {
            telegram_token: "tok".to_string(),
            steam_api_key: "key".to_string(),
        };
        write_config_file(&path, &file).unwrap();

        let read = read_config_file(&path);
        assert_eq!(read.telegram_token, "tok");
        assert_eq!(read.steam_api_key, "key");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let read = read_config_file(Path::new("/tmp/spb-definitely-missing.json"));
        assert!(read.telegram_token.is_empty());
        assert!(read.steam_api_key.is_empty());
    }

    #[test]
    fn malformed_config_file_yields_defaults() {
        let path = tmp_file("spb-config-bad");
        fs::write(&path, "{not json").unwrap();

        let read = read_config_file(&path);
        assert!(read.telegram_token.is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_config_file_fills_missing_fields() {
        let path = tmp_file("spb-config-partial");
        fs::write(&path, r#"{"telegram_token": "tok"}"#).unwrap();

        let read = read_config_file(&path);
        assert_eq!(read.telegram_token, "tok");
        assert!(read.steam_api_key.is_empty());

        let _ = fs::remove_file(&path);
    }
}
