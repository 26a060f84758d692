use clap::Parser;
use once_cell::sync::Lazy;

/// Synthetic login addresses are derived as `{username}@LOGIN_DOMAIN`.
/// The identity layer requires an email-shaped identifier; existing
/// accounts were created under this domain, so it must not change.
pub const LOGIN_DOMAIN: &str = "mentorlink.local";

pub const SESSION_TTL_SECONDS: i64 = 86400i64;

/// Minimum password length enforced on registration and bulk import.
pub const MIN_PASSWORD_LEN: usize = 6;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env, default_value = "./uploads")]
    pub media_root: String,

    #[clap(long, env, default_value = "http://localhost:8080/media")]
    pub media_public_url: String,

    /// Setup secret gating first-admin registration.
    #[clap(long, env)]
    pub admin_setup_code: String,
}
