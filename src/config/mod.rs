use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub session: SessionConfig,
    pub limits: LimitsConfig,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialScheme {
    Plaintext,
    Sha256,
}

impl std::str::FromStr for CredentialScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plaintext" | "plain" => Ok(CredentialScheme::Plaintext),
            "sha256" => Ok(CredentialScheme::Sha256),
            other => Err(format!("unknown credential scheme '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Shared secret accepted for any non-Root account
    pub override_secret: Option<String>,
    pub credential_scheme: CredentialScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_vote_count: u32,
    pub min_account_name_len: usize,
    pub min_booth_name_len: usize,
    pub passcode_digits: usize,
    pub enforce_formats: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Require mutation targets to lie inside the actor's scope
    pub enforce_scope: bool,
    pub enable_audit_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub snapshot_file: String,
}

impl StorageConfig {
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_vote_count: 10_000,
            min_account_name_len: 2,
            min_booth_name_len: 3,
            passcode_digits: 5,
            enforce_formats: true,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enforce_scope: true,
            enable_audit_logging: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            override_secret: None,
            credential_scheme: CredentialScheme::Plaintext,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Session overrides
        if let Ok(v) = env::var("BOOTH_OVERRIDE_SECRET") {
            self.session.override_secret = if v.is_empty() { None } else { Some(v) };
        }
        if let Ok(v) = env::var("BOOTH_CREDENTIAL_SCHEME") {
            self.session.credential_scheme = v.parse().unwrap_or(self.session.credential_scheme);
        }

        // Limit overrides
        if let Ok(v) = env::var("BOOTH_MAX_VOTE_COUNT") {
            self.limits.max_vote_count = v.parse().unwrap_or(self.limits.max_vote_count);
        }
        if let Ok(v) = env::var("BOOTH_ENFORCE_FORMATS") {
            self.limits.enforce_formats = v.parse().unwrap_or(self.limits.enforce_formats);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENFORCE_SCOPE") {
            self.security.enforce_scope = v.parse().unwrap_or(self.security.enforce_scope);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_AUDIT_LOGGING") {
            self.security.enable_audit_logging = v.parse().unwrap_or(self.security.enable_audit_logging);
        }

        // Storage overrides
        if let Ok(v) = env::var("BOOTH_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("BOOTH_SNAPSHOT_FILE") {
            self.storage.snapshot_file = v;
        }

        self
    }

    fn default_data_dir() -> PathBuf {
        match env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".config").join("boothverse"),
            Err(_) => PathBuf::from(".boothverse"),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            session: SessionConfig {
                override_secret: Some("91111".to_string()),
                credential_scheme: CredentialScheme::Plaintext,
            },
            limits: LimitsConfig::default(),
            security: SecurityConfig {
                enforce_scope: true,
                enable_audit_logging: false,
            },
            storage: StorageConfig {
                data_dir: Self::default_data_dir(),
                snapshot_file: "snapshot.json".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            session: SessionConfig {
                override_secret: Some("91111".to_string()),
                credential_scheme: CredentialScheme::Sha256,
            },
            limits: LimitsConfig::default(),
            security: SecurityConfig {
                enforce_scope: true,
                enable_audit_logging: true,
            },
            storage: StorageConfig {
                data_dir: Self::default_data_dir(),
                snapshot_file: "snapshot.json".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            session: SessionConfig {
                override_secret: None,
                credential_scheme: CredentialScheme::Sha256,
            },
            limits: LimitsConfig::default(),
            security: SecurityConfig {
                enforce_scope: true,
                enable_audit_logging: true,
            },
            storage: StorageConfig {
                data_dir: Self::default_data_dir(),
                snapshot_file: "snapshot.yaml".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup, read by the binary only
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
