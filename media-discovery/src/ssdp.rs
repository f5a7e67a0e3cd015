//! SSDP (Simple Service Discovery Protocol) client.
//!
//! Sends a single M-SEARCH request to the SSDP multicast group and collects
//! unicast responses until an absolute deadline. The socket is ephemeral and
//! is never bound to port 1900; a control point only sends M-SEARCH and
//! receives direct replies.

use crate::error::{DiscoveryError, Result};
use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};
use tracing::debug;

/// Well-known SSDP multicast group and port.
pub const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// Search target matching every SSDP-capable device and service.
pub const SEARCH_TARGET_ALL: &str = "ssdp:all";

const USER_AGENT: &str = "dlna-browse/0.1 UPnP/1.0";

/// Parameters of one M-SEARCH round.
#[derive(Debug, Clone)]
pub struct SsdpConfig {
    /// Address the M-SEARCH datagram is sent to, also used as the HOST
    /// header. Overridable so tests can target a loopback responder.
    /// Default: `239.255.255.250:1900`
    pub target_addr: String,

    /// ST header: `ssdp:all` or a specific device/service URN
    pub search_target: String,

    /// MX header in seconds. Advisory only; servers may delay their
    /// response by up to roughly this long.
    /// Default: 2
    pub mx: u32,

    /// Absolute response-collection deadline, measured from the moment the
    /// M-SEARCH is sent.
    /// Default: 3 seconds
    pub timeout: Duration,
}

impl Default for SsdpConfig {
    fn default() -> Self {
        Self {
            target_addr: SSDP_MULTICAST_ADDR.to_string(),
            search_target: SEARCH_TARGET_ALL.to_string(),
            mx: 2,
            timeout: Duration::from_secs(3),
        }
    }
}

/// One response datagram, kept as raw header text plus its sender.
///
/// Responses are not deduplicated: a device answers once per matching
/// service, and every answer is surfaced in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct SsdpResponse {
    pub source: SocketAddr,
    pub text: String,
}

impl SsdpResponse {
    /// Case-insensitive header lookup over the raw response text.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.text.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }

    /// The LOCATION header: the device description URL.
    pub fn location(&self) -> Option<&str> {
        self.header("LOCATION")
    }
}

/// SSDP client owning the ephemeral search socket
pub struct SsdpClient {
    socket: UdpSocket,
}

impl SsdpClient {
    pub fn new() -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0").map_err(|e| {
            DiscoveryError::NetworkError(format!("failed to bind UDP socket: {}", e))
        })?;

        socket.set_multicast_loop_v4(true).map_err(|e| {
            DiscoveryError::NetworkError(format!("failed to set multicast loop: {}", e))
        })?;

        Ok(Self { socket })
    }

    /// Send one M-SEARCH (no retries) and return an iterator over the
    /// responses that arrive before the deadline.
    pub fn search(&self, config: &SsdpConfig) -> Result<SsdpResponses<'_>> {
        let request = build_search_request(config);

        self.socket
            .send_to(request.as_bytes(), &config.target_addr)
            .map_err(|e| {
                DiscoveryError::NetworkError(format!("failed to send M-SEARCH: {}", e))
            })?;
        debug!(
            addr = %config.target_addr,
            st = %config.search_target,
            "M-SEARCH sent"
        );

        Ok(SsdpResponses {
            socket: &self.socket,
            deadline: Instant::now() + config.timeout,
            buffer: [0; 2048],
            finished: false,
        })
    }
}

fn build_search_request(config: &SsdpConfig) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {host}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: {mx}\r\n\
         ST: {st}\r\n\
         USER-AGENT: {agent}\r\n\
         \r\n",
        host = config.target_addr,
        mx = config.mx,
        st = config.search_target,
        agent = USER_AGENT,
    )
}

/// Iterator over SSDP response datagrams.
///
/// Ends normally when a read runs past the deadline; yielding zero
/// responses first means no device answered, which is not an error. Any
/// other socket failure yields one final `Err` after whatever partial
/// responses were already delivered.
pub struct SsdpResponses<'a> {
    socket: &'a UdpSocket,
    deadline: Instant,
    buffer: [u8; 2048],
    finished: bool,
}

impl Iterator for SsdpResponses<'_> {
    type Item = Result<SsdpResponse>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let remaining = self.deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            self.finished = true;
            return None;
        }

        if let Err(e) = self.socket.set_read_timeout(Some(remaining)) {
            self.finished = true;
            return Some(Err(DiscoveryError::NetworkError(format!(
                "failed to set read timeout: {}",
                e
            ))));
        }

        match self.socket.recv_from(&mut self.buffer) {
            Ok((size, source)) => {
                let text = String::from_utf8_lossy(&self.buffer[..size]).into_owned();
                Some(Ok(SsdpResponse { source, text }))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) =>
            {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(DiscoveryError::NetworkError(format!(
                    "socket read failed: {}",
                    e
                ))))
            }
        }
    }
}
