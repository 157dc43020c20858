/// Default lifetime of an access token, in seconds
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 60 * 60 * 12;

/// Minimum accepted password length on registration
pub const MIN_PASSWORD_LENGTH: usize = 8;
