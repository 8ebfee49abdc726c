// Server configuration from environment variables
//
// Variables (all optional except MONGODB_URI for the mongodb backend):
//   STORE_BACKEND    mongodb | memory            (default: mongodb)
//   MONGODB_URI      connection string
//   DATABASE_NAME    (default: myapp_db)
//   COLLECTION_NAME  (default: sections)
//   BIND_ADDR        (default: 0.0.0.0)
//   PORT             (default: 3000)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MONGODB_URI must be set when STORE_BACKEND=mongodb")]
    MissingMongoUri,

    #[error("unknown STORE_BACKEND '{0}' (expected 'mongodb' or 'memory')")]
    UnknownBackend(String),

    #[error("invalid {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo {
        uri: String,
        database: String,
        collection: String,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend: StoreBackend,
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the process environment (after `.env`, if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("mongodb") | Some("mongo") => StoreBackend::Mongo {
                uri: lookup("MONGODB_URI").ok_or(ConfigError::MissingMongoUri)?,
                database: lookup("DATABASE_NAME").unwrap_or_else(|| "myapp_db".to_string()),
                collection: lookup("COLLECTION_NAME").unwrap_or_else(|| "sections".to_string()),
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let ip: IpAddr = match lookup("BIND_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "BIND_ADDR", value })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port: u16 = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => 3000,
        };

        Ok(Self {
            backend,
            addr: SocketAddr::new(ip, port),
        })
    }
}
