/// Structured error handling for RedeemBot
///
/// Every variant here is recovered at a handler boundary and converted into a
/// user-facing reply; none of them terminate the process.

// =============================================================================
// REDEMPTION ERRORS
// =============================================================================

/// Errors produced by code operations and their surrounding gates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemError {
    /// A code with this identifier already exists
    DuplicateCode { identifier: String },

    /// No code with this identifier
    UnknownCode { identifier: String },

    /// The user already redeemed this code, or a single-use code is consumed
    AlreadyRedeemed { identifier: String },

    /// The multi-use redemption limit is exhausted
    LimitReached { identifier: String, limit: u32 },

    /// Caller is not on the admin allow-list
    Unauthorized { user_id: u64 },

    /// The membership lookup failed (fail-closed: treated as non-member)
    MembershipCheckFailed { channel: String, reason: String },

    /// Replied-to message carries a media kind the bot cannot attach
    MediaUnsupported,
}

impl std::fmt::Display for RedeemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedeemError::DuplicateCode { identifier } => {
                write!(f, "Code '{}' already exists", identifier)
            }
            RedeemError::UnknownCode { identifier } => {
                write!(f, "Unknown code '{}'", identifier)
            }
            RedeemError::AlreadyRedeemed { identifier } => {
                write!(f, "Code '{}' has already been redeemed", identifier)
            }
            RedeemError::LimitReached { identifier, limit } => {
                write!(f, "Code '{}' reached its limit of {}", identifier, limit)
            }
            RedeemError::Unauthorized { user_id } => {
                write!(f, "User {} is not an admin", user_id)
            }
            RedeemError::MembershipCheckFailed { channel, reason } => {
                write!(f, "Membership check for {} failed: {}", channel, reason)
            }
            RedeemError::MediaUnsupported => {
                write!(f, "Unsupported media type")
            }
        }
    }
}

impl std::error::Error for RedeemError {}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

/// Startup configuration errors; these DO abort the process in main
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A mandatory environment variable is missing or empty
    MissingVar { name: &'static str },

    /// An environment variable holds an unparseable value
    InvalidVar { name: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVar { name } => {
                write!(f, "Missing mandatory environment variable {}", name)
            }
            ConfigError::InvalidVar { name, reason } => {
                write!(f, "Invalid value for {}: {}", name, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redeem_error_display() {
        assert_eq!(
            RedeemError::Unauthorized { user_id: 42 }.to_string(),
            "User 42 is not an admin"
        );
        assert_eq!(
            RedeemError::MembershipCheckFailed {
                channel: "@chan".to_string(),
                reason: "bot is not a member".to_string(),
            }
            .to_string(),
            "Membership check for @chan failed: bot is not a member"
        );
        assert_eq!(
            RedeemError::LimitReached {
                identifier: "BONUS".to_string(),
                limit: 2,
            }
            .to_string(),
            "Code 'BONUS' reached its limit of 2"
        );
    }

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::MissingVar { name: "BOT_TOKEN" }.to_string(),
            "Missing mandatory environment variable BOT_TOKEN"
        );
    }
}
