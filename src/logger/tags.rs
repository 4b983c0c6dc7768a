use crate::arguments;

/// Module tags for log filtering and display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Config,
    Store,
    Membership,
    Telegram,
    Webserver,
}

impl LogTag {
    /// Display name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Store => "STORE",
            LogTag::Membership => "MEMBERSHIP",
            LogTag::Telegram => "TELEGRAM",
            LogTag::Webserver => "WEBSERVER",
        }
    }

    /// Whether debug logging is enabled for this tag
    ///
    /// System and Config debug logs ride on --verbose only; the other
    /// modules have dedicated --debug-<module> flags.
    pub fn debug_enabled(&self) -> bool {
        if arguments::is_verbose_enabled() {
            return true;
        }
        match self {
            LogTag::Store => arguments::is_debug_store_enabled(),
            LogTag::Telegram => arguments::is_debug_telegram_enabled(),
            LogTag::Membership => arguments::is_debug_membership_enabled(),
            LogTag::Webserver => arguments::is_debug_webserver_enabled(),
            LogTag::System | LogTag::Config => false,
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
