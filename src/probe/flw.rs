use std::time::Duration;

use anyhow::bail;
use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::probe::diagnostics::{DiagnosticTransport, NodeRole};

const CMD_RUOK: &[u8] = b"ruok";
const CMD_SRVR: &[u8] = b"srvr";

const RESPONSE_IMOK: &[u8] = b"imok";

/// upper bound on the diagnostic response size we are willing to buffer per node
const MAX_RESPONSE_SIZE: usize = 64 * 1024;

/// [DiagnosticTransport] implementation speaking the four-letter-word diagnostic protocol over
///  TCP: open a connection, write the command, read the response until the server closes the
///  connection. No session is established, each query is one short-lived connection.
///
/// Servers are queried sequentially; the timeout applies per server, covering connection
///  establishment and the full response.
pub struct FlwTransport;

#[async_trait]
impl DiagnosticTransport for FlwTransport {
    async fn liveness(&self, servers: &[String], timeout: Duration) -> Vec<bool> {
        let mut result = Vec::with_capacity(servers.len());
        for server in servers {
            let alive = match send_command(server, CMD_RUOK, timeout).await {
                Ok(response) => response.as_ref() == RESPONSE_IMOK,
                Err(e) => {
                    debug!("liveness probe of {} failed: {:#}", server, e);
                    false
                }
            };
            result.push(alive);
        }
        result
    }

    async fn roles(&self, servers: &[String], timeout: Duration) -> Vec<NodeRole> {
        let mut result = Vec::with_capacity(servers.len());
        for server in servers {
            let role = match send_command(server, CMD_SRVR, timeout).await {
                Ok(response) => parse_role(&response),
                Err(e) => {
                    debug!("role probe of {} failed: {:#}", server, e);
                    NodeRole::Unknown
                }
            };
            result.push(role);
        }
        result
    }
}

async fn send_command(server: &str, command: &[u8], limit: Duration) -> anyhow::Result<BytesMut> {
    match timeout(limit, do_send_command(server, command)).await {
        Ok(result) => result,
        Err(_) => bail!("diagnostic command to {} timed out after {:?}", server, limit),
    }
}

async fn do_send_command(server: &str, command: &[u8]) -> anyhow::Result<BytesMut> {
    let mut stream = TcpStream::connect(server).await?;
    stream.write_all(command).await?;

    let mut buf = BytesMut::with_capacity(1024);
    loop {
        if stream.read_buf(&mut buf).await? == 0 {
            break;
        }
        if buf.len() > MAX_RESPONSE_SIZE {
            bail!("diagnostic response from {} exceeds {} bytes", server, MAX_RESPONSE_SIZE);
        }
    }
    Ok(buf)
}

/// Extracts the self-reported role from a detailed (`srvr`) response. The response is a sequence
///  of `key: value` lines, the role being on the `Mode:` line.
fn parse_role(response: &[u8]) -> NodeRole {
    let text = String::from_utf8_lossy(response);
    for line in text.lines() {
        if let Some(mode) = line.strip_prefix("Mode:") {
            return match mode.trim() {
                "follower" => NodeRole::Follower,
                "leader" => NodeRole::Leader,
                "standalone" => NodeRole::Standalone,
                _ => NodeRole::Unknown,
            };
        }
    }
    NodeRole::Unknown
}
