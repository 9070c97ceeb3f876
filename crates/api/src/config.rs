use vitrine_core::render::StylePalette;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret used to validate access tokens).
    pub jwt: JwtConfig,
    /// Translation service configuration.
    pub translate: TranslateConfig,
    /// Colors applied to publicly rendered pages.
    pub palette: StylePalette,
}

/// Connection settings for the translation collaborator.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Base URL of a LibreTranslate-compatible service, no trailing slash.
    pub base_url: String,
    /// Optional API key forwarded with each request.
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `TRANSLATE_URL`        | `http://localhost:5000`    |
    /// | `TRANSLATE_API_KEY`    | (unset)                    |
    /// | `PALETTE_PRIMARY` etc. | built-in palette           |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let translate = TranslateConfig {
            base_url: std::env::var("TRANSLATE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            api_key: std::env::var("TRANSLATE_API_KEY").ok(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            translate,
            palette: palette_from_env(),
        }
    }
}

/// Read palette overrides from `PALETTE_*` env vars, falling back to the
/// built-in defaults per color.
fn palette_from_env() -> StylePalette {
    let defaults = StylePalette::default();
    let read = |var: &str, default: String| std::env::var(var).unwrap_or(default);
    StylePalette {
        primary: read("PALETTE_PRIMARY", defaults.primary),
        accent: read("PALETTE_ACCENT", defaults.accent),
        background: read("PALETTE_BACKGROUND", defaults.background),
        surface: read("PALETTE_SURFACE", defaults.surface),
        text: read("PALETTE_TEXT", defaults.text),
    }
}
