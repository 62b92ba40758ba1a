use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

/// Which customer store the process runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend: {}", other)),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            store: StoreBackend::Postgres,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read HOST, PORT and CUSTOMERS_STORE over the defaults.
    ///
    /// A PORT or CUSTOMERS_STORE value that does not parse is an error, so a
    /// typo never silently lands on the default backend.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| format!("invalid PORT {:?}: {}", port, e))?;
        }
        if let Some(store) = lookup("CUSTOMERS_STORE") {
            config.store = store
                .parse()
                .map_err(|e| format!("invalid CUSTOMERS_STORE: {}", e))?;
        }

        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_store(mut self, store: StoreBackend) -> Self {
        self.store = store;
        self
    }

    /// Socket address to bind the listener on; host names are resolved
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address for host {}", self.host),
                )
            })
    }
}
