//! SocketWriter - streams rendered lines to a log service over a socket

use contracts::{ContractError, InitArg, LogWriter, SocketTarget};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
#[cfg(unix)]
use std::os::unix::net::UnixStream;
use tracing::{debug, instrument, warn};

const WRITER: &str = "socket";

/// Largest payload a single UDP datagram can carry over IPv4
const MAX_DATAGRAM: usize = 65507;

enum Connection {
    Tcp(TcpStream),
    Udp(UdpSocket),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl Connection {
    fn open(target: &SocketTarget) -> io::Result<Self> {
        match target {
            SocketTarget::Tcp(addr) => Ok(Connection::Tcp(TcpStream::connect(addr.as_str())?)),
            SocketTarget::Udp(addr) => {
                let remote = resolve(addr)?;
                let local: SocketAddr = if remote.is_ipv4() {
                    ([0u8; 4], 0).into()
                } else {
                    ([0u16; 8], 0).into()
                };
                // Bind to any available port
                let socket = UdpSocket::bind(local)?;
                socket.connect(remote)?;
                Ok(Connection::Udp(socket))
            }
            #[cfg(unix)]
            SocketTarget::Unix(path) => Ok(Connection::Unix(UnixStream::connect(path)?)),
            #[cfg(not(unix))]
            SocketTarget::Unix(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "unix sockets are not available on this platform",
            )),
        }
    }

    fn send(&mut self, data: &[u8]) -> io::Result<()> {
        match self {
            Connection::Tcp(stream) => stream.write_all(data),
            Connection::Udp(_) if data.len() > MAX_DATAGRAM => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} byte line exceeds the {MAX_DATAGRAM} byte datagram limit", data.len()),
            )),
            Connection::Udp(socket) => socket.send(data).map(|_| ()),
            #[cfg(unix)]
            Connection::Unix(stream) => stream.write_all(data),
        }
    }

    fn close(self) {
        let result = match self {
            Connection::Tcp(stream) => stream.shutdown(Shutdown::Both),
            Connection::Udp(_) => Ok(()),
            #[cfg(unix)]
            Connection::Unix(stream) => stream.shutdown(Shutdown::Both),
        };
        if let Err(e) = result {
            // Peer may already be gone
            debug!(error = %e, "Socket shutdown failed");
        }
    }
}

fn resolve(addr: &str) -> io::Result<SocketAddr> {
    addr.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::AddrNotAvailable,
            format!("'{addr}' resolved to no address"),
        )
    })
}

/// Writer connected to a socket-based log service
///
/// TCP and unix targets get one stream per enable; UDP sends one datagram
/// per line and never blocks on a missing receiver. A line too long for one
/// datagram fails the write rather than going out cut short.
#[derive(Default)]
pub struct SocketWriter {
    conn: Mutex<Option<Connection>>,
}

impl SocketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.conn.lock().is_some()
    }
}

impl LogWriter for SocketWriter {
    #[instrument(name = "socket_writer_init", skip(self))]
    fn init(&self, arg: &InitArg) -> Result<(), ContractError> {
        let InitArg::Socket(target) = arg else {
            return Err(ContractError::writer_init(
                WRITER,
                format!("expected a socket target argument, got {arg:?}"),
            ));
        };
        let conn = Connection::open(target).map_err(|e| {
            warn!(addr = %target, error = %e, "SocketWriter connect failed");
            ContractError::writer_init(WRITER, format!("connect to {target} failed: {e}"))
        })?;

        if let Some(previous) = self.conn.lock().replace(conn) {
            previous.close();
        }
        debug!(addr = %target, "SocketWriter connected");
        Ok(())
    }

    fn destroy(&self) {
        if let Some(conn) = self.conn.lock().take() {
            conn.close();
            debug!("SocketWriter closed");
        }
    }

    fn write(&self, data: &[u8]) -> Result<(), ContractError> {
        let mut guard = self.conn.lock();
        let conn = guard
            .as_mut()
            .ok_or_else(|| ContractError::writer_write(WRITER, "socket not connected"))?;
        conn.send(data)
            .map_err(|e| ContractError::writer_write(WRITER, e.to_string()))
    }
}
