//! SocketTarget - where the socket-service writer connects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::ContractError;

/// Socket-service address, written as `tcp://host:port`, `udp://host:port`
/// or `unix:///path/to/socket`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SocketTarget {
    /// Stream connection, one line per write
    Tcp(String),
    /// Datagram per line, fire-and-forget
    Udp(String),
    /// Unix domain stream socket
    Unix(PathBuf),
}

impl SocketTarget {
    pub fn scheme(&self) -> &'static str {
        match self {
            SocketTarget::Tcp(_) => "tcp",
            SocketTarget::Udp(_) => "udp",
            SocketTarget::Unix(_) => "unix",
        }
    }
}

fn check_host_port(raw: &str, addr: &str) -> Result<(), ContractError> {
    let (host, port) = addr
        .rsplit_once(':')
        .ok_or_else(|| ContractError::invalid_target(raw, "expected host:port"))?;
    if host.is_empty() {
        return Err(ContractError::invalid_target(raw, "empty host"));
    }
    port.parse::<u16>()
        .map_err(|e| ContractError::invalid_target(raw, format!("bad port '{port}': {e}")))?;
    Ok(())
}

impl FromStr for SocketTarget {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, rest) = s
            .split_once("://")
            .ok_or_else(|| ContractError::invalid_target(s, "missing scheme"))?;

        match scheme {
            "tcp" => {
                check_host_port(s, rest)?;
                Ok(SocketTarget::Tcp(rest.to_string()))
            }
            "udp" => {
                check_host_port(s, rest)?;
                Ok(SocketTarget::Udp(rest.to_string()))
            }
            "unix" if !rest.is_empty() => Ok(SocketTarget::Unix(PathBuf::from(rest))),
            "unix" => Err(ContractError::invalid_target(s, "empty socket path")),
            other => Err(ContractError::invalid_target(
                s,
                format!("unknown scheme '{other}'"),
            )),
        }
    }
}

impl TryFrom<String> for SocketTarget {
    type Error = ContractError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SocketTarget> for String {
    fn from(target: SocketTarget) -> Self {
        target.to_string()
    }
}

impl fmt::Display for SocketTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketTarget::Tcp(addr) | SocketTarget::Udp(addr) => {
                write!(f, "{}://{}", self.scheme(), addr)
            }
            SocketTarget::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}
