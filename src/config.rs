//! Process configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8080` |
//! | `DATABASE_URL` | `sqlite://users.db?mode=rwc` |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//!
//! An empty variable counts as unset. `main` loads a `.env` file first when
//! one exists, so these can live there during development.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use crate::error::Error;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `var`, which returns a variable's value
    /// or `None` when it is not set.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let get = |key: &str| var(key).filter(|v| !v.is_empty());

        let host = match get("HOST") {
            Some(v) => v.parse::<IpAddr>().map_err(|_| Error::Config(format!("HOST `{v}` is not an IP address")))?,
            None => DEFAULT_HOST,
        };
        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| Error::Config(format!("PORT `{v}` is not a port number")))?,
            None => DEFAULT_PORT,
        };
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(Error::Config(format!("DATABASE_MAX_CONNECTIONS `{v}` must be a positive integer"))),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        Ok(Self { host, port, database_url, max_connections })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
