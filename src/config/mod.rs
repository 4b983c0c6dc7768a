/// Configuration loading and access helpers
///
/// RedeemBot is configured entirely through environment variables (a `.env`
/// file is honored via dotenv). The parsed configuration lives in a global
/// `OnceCell<RwLock<Config>>` and is read through `with_config()`; nothing
/// outside this module touches the environment after startup.
///
/// Mandatory variables: BOT_TOKEN, ADMIN_IDS, FORCE_JOIN_CHANNELS.
/// Missing or unparseable mandatory variables abort startup.
use crate::errors::ConfigError;
use once_cell::sync::OnceCell;
use std::sync::RwLock;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default HTTP port when PORT is unset
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Default HTTP bind host when HOST is unset; the status page is meant to
/// be reachable from outside the machine
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Telegram-side configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    pub bot_token: String,
    /// Admin allow-list; these users may mutate codes and always pass the gate
    pub admin_ids: Vec<u64>,
    /// Channels a user must have joined before redeeming, e.g. "@mychannel"
    pub force_join_channels: Vec<String>,
}

/// Webserver-side configuration
#[derive(Debug, Clone)]
pub struct WebserverConfig {
    /// Shared secret for the /restart and /open placeholder endpoints.
    /// Empty means those endpoints always answer 401.
    pub web_secret: String,
    /// Version string reported by /status
    pub version: String,
    /// HTTP bind host
    pub host: String,
    /// HTTP listen port
    pub port: u16,
}

/// Full application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub webserver: WebserverConfig,
}

impl Config {
    /// Build a Config from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = require_var("BOT_TOKEN")?;

        let admin_ids = parse_id_list(&require_var("ADMIN_IDS")?)
            .map_err(|reason| ConfigError::InvalidVar {
                name: "ADMIN_IDS",
                reason,
            })?;
        if admin_ids.is_empty() {
            return Err(ConfigError::MissingVar { name: "ADMIN_IDS" });
        }

        let force_join_channels = parse_channel_list(&require_var("FORCE_JOIN_CHANNELS")?);
        if force_join_channels.is_empty() {
            return Err(ConfigError::MissingVar {
                name: "FORCE_JOIN_CHANNELS",
            });
        }

        let port = match optional_var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_HTTP_PORT,
        };

        Ok(Self {
            telegram: TelegramConfig {
                bot_token,
                admin_ids,
                force_join_channels,
            },
            webserver: WebserverConfig {
                web_secret: optional_var("WEB_SECRET").unwrap_or_default(),
                version: optional_var("BOT_VERSION").unwrap_or_else(|| "v1.0".to_string()),
                host: optional_var("HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string()),
                port,
            },
        })
    }

    /// Whether a user id is on the admin allow-list
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.telegram.admin_ids.contains(&user_id)
    }
}

/// Read a mandatory environment variable, treating empty as missing
fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

/// Read an optional environment variable, treating empty as unset
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a comma-separated list of numeric user ids
///
/// Blank entries are skipped; a non-numeric entry is an error rather than
/// being silently dropped.
fn parse_id_list(raw: &str) -> Result<Vec<u64>, String> {
    let mut ids = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id = part
            .parse::<u64>()
            .map_err(|_| format!("'{}' is not a numeric user id", part))?;
        ids.push(id);
    }
    Ok(ids)
}

/// Parse a comma-separated list of channel identifiers
fn parse_channel_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// GLOBAL ACCESS HELPERS
// =============================================================================

/// Load configuration from the environment and initialize the global CONFIG
///
/// Call once at startup, after dotenv.
pub fn load_config() -> Result<(), String> {
    let config = Config::from_env().map_err(|e| e.to_string())?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    Ok(())
}

/// Initialize the global CONFIG from an already-built Config (tests)
pub fn set_config(config: Config) -> Result<(), String> {
    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())
}

/// Execute a function with read access to the configuration
///
/// This is the recommended way to read configuration values:
///
/// ```rust,ignore
/// let port = with_config(|cfg| cfg.webserver.port);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let config_lock = CONFIG
        .get()
        .expect("Config not initialized. Call load_config() first.");

    let config = config_lock
        .read()
        .expect("Failed to acquire config read lock");

    f(&config)
}

/// Get a clone of the entire configuration
///
/// Useful when values must be held across await points.
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 42 , ,7 ").unwrap(), vec![42, 7]);
        assert!(parse_id_list("42,abc").is_err());
        assert!(parse_id_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_channel_list() {
        assert_eq!(
            parse_channel_list("@alpha, @beta"),
            vec!["@alpha".to_string(), "@beta".to_string()]
        );
        assert!(parse_channel_list(" , ").is_empty());
    }

    #[test]
    fn test_is_admin() {
        let config = Config {
            telegram: TelegramConfig {
                bot_token: "token".to_string(),
                admin_ids: vec![1, 2],
                force_join_channels: vec!["@chan".to_string()],
            },
            webserver: WebserverConfig {
                web_secret: String::new(),
                version: "v1.0".to_string(),
                host: DEFAULT_HTTP_HOST.to_string(),
                port: DEFAULT_HTTP_PORT,
            },
        };
        assert!(config.is_admin(1));
        assert!(!config.is_admin(3));
    }

    #[test]
    fn test_default_host_is_externally_reachable() {
        assert_eq!(DEFAULT_HTTP_HOST, "0.0.0.0");
    }
}
