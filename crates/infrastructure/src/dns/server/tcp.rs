use super::Dispatcher;
use crate::dns::transport::tcp::{read_with_length_prefix, write_with_length_prefix};
use netdns_domain::{DomainError, RequestContext};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

/// Accept loop: one task per connection, one request per connection.
pub(super) async fn serve_tcp(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    shutdown: CancellationToken,
    tracker: TaskTracker,
) {
    loop {
        let (stream, client) = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = listener.accept() => match result {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept error");
                    continue;
                }
            },
        };

        let dispatcher = dispatcher.clone();
        let shutdown = shutdown.clone();
        tracker.spawn(async move {
            handle_connection(stream, client, &dispatcher, &shutdown).await;
        });
    }

    debug!("TCP listener stopped");
}

async fn handle_connection(
    mut stream: TcpStream,
    client: SocketAddr,
    dispatcher: &Dispatcher,
    shutdown: &CancellationToken,
) {
    let ctx = RequestContext::tcp(client);
    let _ = stream.set_nodelay(true);

    let read = tokio::select! {
        _ = shutdown.cancelled() => return,
        read = tokio::time::timeout(dispatcher.read_timeout, read_with_length_prefix(&mut stream)) => read,
    };

    let raw = match read {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!(client = %client, "TCP client closed before a full message");
            return;
        }
        Ok(Err(e)) => {
            dispatcher.logger.log_error(&ctx, &read_error(client, e.to_string()));
            return;
        }
        Err(_) => {
            dispatcher
                .logger
                .log_error(&ctx, &read_error(client, "read timed out".to_string()));
            return;
        }
    };

    if let Some(reply) = dispatcher.dispatch(&raw, &ctx).await {
        let written = tokio::time::timeout(
            dispatcher.write_timeout,
            write_with_length_prefix(&mut stream, &reply),
        )
        .await;

        let failure = match written {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => Some("write timed out".to_string()),
        };

        match failure {
            None => dispatcher.logger.log_send(&ctx, &reply),
            Some(reason) => dispatcher.logger.log_error(
                &ctx,
                &DomainError::TransportWrite {
                    client: client.to_string(),
                    reason,
                },
            ),
        }
    }

    let _ = stream.shutdown().await;
}

fn read_error(client: SocketAddr, reason: String) -> DomainError {
    DomainError::TransportRead {
        client: client.to_string(),
        reason,
    }
}
