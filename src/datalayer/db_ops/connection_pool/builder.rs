use std::time::Duration;

use crate::datalayer::db_ops::constants;
use crate::datalayer::db_ops::constants::DbConfig;

/*
Default pool settings for the customers store.
- database_url: DATABASE_URL, falling back to constants::URL
- max_connections: 10
- min_connections: 2
- connection_timeout: 30 seconds
- idle_timeout: 10 minutes
- max_lifetime: 30 minutes
*/
impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| constants::URL.to_string()),
            max_connections: 10,
            min_connections: 2,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

// Builder setters, starting from the defaults
impl DbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = database_url.into();
        self
    }

    pub fn set_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn set_min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    pub fn set_connection_timeout(mut self, connection_timeout: Duration) -> Self {
        self.connection_timeout = connection_timeout;
        self
    }

    pub fn set_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn set_max_lifetime(mut self, max_lifetime: Duration) -> Self {
        self.max_lifetime = max_lifetime;
        self
    }
}
