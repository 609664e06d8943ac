//! Printer adapters for sending TSPL data
//!
//! Supports network printers and print servers accepting raw jobs over TCP
//! (port 9100). The payload is written as-is: no acknowledgement or status
//! response is read back.

use crate::error::{PrintError, PrintResult};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Trait for printer adapters
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send a raw TSPL payload to the printer
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    async fn is_online(&self) -> bool;
}

/// Network printer (raw TCP)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a new network printer
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(PrintError::InvalidConfig("Empty printer host".to_string()));
        }
        if port == 0 {
            return Err(PrintError::InvalidConfig(format!(
                "Invalid port for {}: 0",
                host
            )));
        }

        Ok(Self {
            host: host.to_string(),
            port,
            timeout: Duration::from_secs(5),
        })
    }

    /// Create from an address string (e.g., "192.168.1.100:9100" or "label-printer.local")
    ///
    /// The port defaults to [`DEFAULT_PORT`] when not specified.
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr = addr.trim();
        match addr.rsplit_once(':') {
            // Bare IPv6 addresses contain ':' too; only split "host:port" forms
            Some((host, port)) if !host.contains(':') || host.ends_with(']') => {
                let port: u16 = port
                    .parse()
                    .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;
                let host = host.trim_start_matches('[').trim_end_matches(']');
                Self::new(host, port)
            }
            _ => Self::new(addr, DEFAULT_PORT),
        }
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the printer port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get the printer address as "host:port"
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn connect(&self) -> PrintResult<TcpStream> {
        tokio::time::timeout(
            self.timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr())))?
        .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr(), e)))
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(self, data), fields(addr = %self.addr(), data_len = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        info!("Connecting to printer");

        let mut stream = self.connect().await?;

        info!("Connected, sending {} bytes", data.len());

        stream.write_all(data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write failed: {}", e),
            ))
        })?;

        stream.flush().await?;
        stream.shutdown().await?;

        info!("Print job sent successfully");
        Ok(())
    }

    #[instrument(skip(self), fields(addr = %self.addr()))]
    async fn is_online(&self) -> bool {
        let check_timeout = Duration::from_millis(500);

        match tokio::time::timeout(
            check_timeout,
            TcpStream::connect((self.host.as_str(), self.port)),
        )
        .await
        {
            Ok(Ok(_)) => {
                info!("Printer online");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Printer offline");
                false
            }
            Err(_) => {
                warn!("Printer check timeout");
                false
            }
        }
    }
}
