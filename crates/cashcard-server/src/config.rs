//! Server configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `CASHCARD_*` environment variables.

use std::net::SocketAddr;

use cashcard_core::Role;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage: StorageKind,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Users to seed the registry with.
    pub users: Vec<UserSpec>,
}

/// Supported storage backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// `PostgreSQL` persistent storage.
    Postgres { url: String },
}

/// One configured user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSpec {
    pub name: String,
    pub password: String,
    pub role: Role,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `CASHCARD_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `CASHCARD_STORAGE` — `memory` or `postgres` (default: `memory`)
    /// - `DATABASE_URL` — `PostgreSQL` connection string (required when `CASHCARD_STORAGE=postgres`)
    /// - `CASHCARD_LOG_LEVEL` — log filter (default: `info`)
    /// - `CASHCARD_USERS` — comma-separated `name:password[:role]` entries,
    ///   role `card-owner` (default) or `non-owner`
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = if let Ok(addr) = std::env::var("CASHCARD_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        };

        let storage = match std::env::var("CASHCARD_STORAGE")
            .unwrap_or_else(|_| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => {
                let url = std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/cashcard".to_owned());
                StorageKind::Postgres { url }
            }
            _ => StorageKind::Memory,
        };

        let log_level = std::env::var("CASHCARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let users = std::env::var("CASHCARD_USERS")
            .map(|raw| parse_users(&raw))
            .unwrap_or_default();

        Self {
            bind_addr,
            storage,
            log_level,
            users,
        }
    }
}

/// Parse the `CASHCARD_USERS` value: comma-separated `name:password[:role]`.
///
/// Entries with a missing name or password are skipped; an unrecognized
/// role falls back to `card-owner`.
#[must_use]
pub fn parse_users(raw: &str) -> Vec<UserSpec> {
    raw.split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }

            let mut parts = entry.splitn(3, ':');
            let name = parts.next()?.trim();
            let password = parts.next()?.trim();
            if name.is_empty() || password.is_empty() {
                return None;
            }

            let role = match parts.next().map(str::trim) {
                Some("non-owner") => Role::NonOwner,
                _ => Role::CardOwner,
            };

            Some(UserSpec {
                name: name.to_owned(),
                password: password.to_owned(),
                role,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_user_list() {
        let users = parse_users("LeudiX1:leo123,Sarah:sara123");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "LeudiX1");
        assert_eq!(users[0].password, "leo123");
        assert_eq!(users[0].role, Role::CardOwner);
    }

    #[test]
    fn parses_explicit_roles() {
        let users = parse_users("hank-owns-no-cards:qrs456:non-owner");
        assert_eq!(users[0].role, Role::NonOwner);
    }

    #[test]
    fn unknown_role_defaults_to_card_owner() {
        let users = parse_users("LeudiX1:leo123:superuser");
        assert_eq!(users[0].role, Role::CardOwner);
    }

    #[test]
    fn skips_malformed_entries() {
        let users = parse_users("LeudiX1:leo123,,bare-name,:no-name,Sarah:sara123");
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["LeudiX1", "Sarah"]);
    }

    #[test]
    fn empty_input_yields_no_users() {
        assert!(parse_users("").is_empty());
    }
}
