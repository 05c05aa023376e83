//! Server configuration.
//!
//! Command-line flags with environment variable fallbacks, resolved into a
//! `ServerConfig`.

use std::path::PathBuf;

use clap::Parser;

use crate::usecase::LeaveScope;

/// Origin of the frontend development server, always allowed by CORS
pub const LOCAL_FRONTEND_ORIGIN: &str = "http://localhost:3000";

#[derive(Parser, Debug, Clone)]
#[command(name = "huddle-server")]
#[command(about = "Room chat server with WebSocket broadcast", long_about = None)]
pub struct ServerArgs {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Deployed frontend origin to allow in addition to localhost:3000
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    /// Directory of a built frontend to serve for unmatched paths
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Who hears leave announcements: "global" (every client) or "room"
    #[arg(long, env = "LEAVE_SCOPE", default_value = "global")]
    pub leave_scope: LeaveScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS origins allowed for HTTP and WebSocket requests
    pub allowed_origins: Vec<String>,
    pub static_dir: Option<PathBuf>,
    pub leave_scope: LeaveScope,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: vec![LOCAL_FRONTEND_ORIGIN.to_string()],
            static_dir: None,
            leave_scope: LeaveScope::default(),
        }
    }
}

impl From<ServerArgs> for ServerConfig {
    fn from(args: ServerArgs) -> Self {
        let mut allowed_origins = vec![LOCAL_FRONTEND_ORIGIN.to_string()];
        if let Some(url) = args.frontend_url {
            let url = url.trim().trim_end_matches('/').to_string();
            if !url.is_empty() && !allowed_origins.contains(&url) {
                allowed_origins.push(url);
            }
        }

        Self {
            host: args.host,
            port: args.port,
            allowed_origins,
            static_dir: args.static_dir,
            leave_scope: args.leave_scope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServerConfig {
        let argv = std::iter::once("huddle-server").chain(args.iter().copied());
        ServerArgs::try_parse_from(argv).unwrap().into()
    }

    #[test]
    fn test_frontend_url_is_added_to_origins() {
        let config = parse(&["--frontend-url", "https://huddle.example.app/"]);
        assert_eq!(
            config.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://huddle.example.app".to_string()
            ]
        );
    }

    #[test]
    fn test_duplicate_frontend_url_is_ignored() {
        let config = parse(&["--frontend-url", "http://localhost:3000"]);
        assert_eq!(config.allowed_origins.len(), 1);
    }

    #[test]
    fn test_explicit_flags() {
        let config = parse(&[
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--leave-scope",
            "room",
            "--static-dir",
            "frontend/build",
        ]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.leave_scope, LeaveScope::Room);
        assert_eq!(config.static_dir, Some(PathBuf::from("frontend/build")));
    }

    #[test]
    fn test_invalid_leave_scope_is_rejected() {
        let result = ServerArgs::try_parse_from(["huddle-server", "--leave-scope", "nobody"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.leave_scope, LeaveScope::Global);
        assert_eq!(config.allowed_origins, vec![LOCAL_FRONTEND_ORIGIN.to_string()]);
    }
}
