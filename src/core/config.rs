use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub smtp: SmtpConfig,
    pub swagger: SwaggerConfig,
    pub users: UsersConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Which media backend to use for uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    Local,
    S3,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    pub local: LocalStorageConfig,
    pub s3: S3Config,
}

/// Local filesystem media backend; files are served statically under /uploads.
#[derive(Debug, Clone)]
pub struct LocalStorageConfig {
    /// Directory uploaded files are written to
    pub root: PathBuf,
    /// Base URL clients reach this server at, used to build public file URLs
    pub public_base_url: String,
}

/// S3-compatible media backend (MinIO, Cloudflare R2, AWS S3, ...)
#[derive(Debug, Clone)]
pub struct S3Config {
    /// S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for serving files (defaults to endpoint)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// RFC 5322 "From" address for outgoing mail
    pub from_address: String,
    /// Inbox contact-form inquiries are delivered to
    pub contact_inbox: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// What DELETE /api/users/{id} does. The upstream product never settled this,
/// so it is an explicit deployment choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDeletePolicy {
    /// Flip is_active to false, keep the row
    Deactivate,
    /// Remove the row permanently
    HardDelete,
}

#[derive(Debug, Clone)]
pub struct UsersConfig {
    pub delete_policy: UserDeletePolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            smtp: SmtpConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            users: UsersConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 25 * 1024 * 1024; // 25MB, quotation PDFs included

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "local" => StorageBackendKind::Local,
            "s3" => StorageBackendKind::S3,
            other => {
                return Err(format!(
                    "STORAGE_BACKEND must be 'local' or 's3', got '{}'",
                    other
                ))
            }
        };

        Ok(Self {
            backend,
            local: LocalStorageConfig::from_env()?,
            s3: S3Config::from_env()?,
        })
    }
}

impl LocalStorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let root = env::var("UPLOADS_DIR").unwrap_or_else(|_| "public/uploads".to_string());

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            root: PathBuf::from(root),
            public_base_url,
        })
    }
}

impl S3Config {
    pub fn from_env() -> Result<Self, String> {
        let endpoint = env::var("S3_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:9000".to_string())
            .trim_end_matches('/')
            .to_string();

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint = env::var("S3_PUBLIC_ENDPOINT")
            .unwrap_or_else(|_| endpoint.clone())
            .trim_end_matches('/')
            .to_string();

        let access_key = env::var("S3_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let secret_key = env::var("S3_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let bucket = env::var("S3_BUCKET").unwrap_or_else(|_| "vidrioarte-media".to_string());
        let region = env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            endpoint,
            public_endpoint,
            access_key,
            secret_key,
            bucket,
            region,
        })
    }
}

impl SmtpConfig {
    const DEFAULT_SMTP_PORT: u16 = 587;

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("SMTP_HOST").map_err(|_| "SMTP_HOST must be set".to_string())?;

        let port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_SMTP_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| "SMTP_PORT must be a valid number".to_string())?;

        let username = env::var("SMTP_USER").ok().filter(|s| !s.is_empty());
        let password = env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty());

        let from_address =
            env::var("SMTP_FROM").map_err(|_| "SMTP_FROM must be set".to_string())?;

        // Contact-form mail goes to the business itself by default
        let contact_inbox = env::var("CONTACT_INBOX").unwrap_or_else(|_| from_address.clone());

        Ok(Self {
            host,
            port,
            username,
            password,
            from_address,
            contact_inbox,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Vidrio al Arte API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Catalog, quotation and blog API for Vidrio al Arte".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl UsersConfig {
    pub fn from_env() -> Result<Self, String> {
        let delete_policy = match env::var("USER_DELETE_POLICY")
            .unwrap_or_else(|_| "deactivate".to_string())
            .to_lowercase()
            .as_str()
        {
            "deactivate" => UserDeletePolicy::Deactivate,
            "hard-delete" | "hard_delete" => UserDeletePolicy::HardDelete,
            other => {
                return Err(format!(
                    "USER_DELETE_POLICY must be 'deactivate' or 'hard-delete', got '{}'",
                    other
                ))
            }
        };

        Ok(Self { delete_policy })
    }
}
