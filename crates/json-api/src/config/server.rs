//! Listener settings for the Bazaar JSON API.

use clap::Args;

/// Where the HTTP listener binds.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind; IPv6 literals are accepted without brackets
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port`, bracketing bare IPv6 hosts.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> ServerRuntimeConfig {
        ServerRuntimeConfig {
            host: host.to_string(),
            port: 8698,
        }
    }

    #[test]
    fn ipv4_hosts_are_joined_as_is() {
        assert_eq!(config("0.0.0.0").socket_addr(), "0.0.0.0:8698");
    }

    #[test]
    fn bare_ipv6_hosts_are_bracketed() {
        assert_eq!(config("::").socket_addr(), "[::]:8698");
        assert_eq!(config("[::1]").socket_addr(), "[::1]:8698");
    }
}
