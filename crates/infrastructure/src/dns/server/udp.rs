use super::Dispatcher;
use netdns_domain::{DomainError, RequestContext};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

/// Largest datagram read from a client.
const MAX_UDP_MESSAGE_SIZE: usize = 8192;

/// Receive loop: one task per datagram, replies sent from the same socket.
pub(super) async fn serve_udp(
    socket: Arc<UdpSocket>,
    dispatcher: Arc<Dispatcher>,
    shutdown: CancellationToken,
    tracker: TaskTracker,
) {
    let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (len, client) = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) => {
                    // ICMP port unreachable from an earlier send surfaces here.
                    warn!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let raw = recv_buf[..len].to_vec();
        let socket = socket.clone();
        let dispatcher = dispatcher.clone();

        tracker.spawn(async move {
            let ctx = RequestContext::udp(client);
            if let Some(reply) = dispatcher.dispatch(&raw, &ctx).await {
                send_reply(&socket, &dispatcher, &reply, &ctx).await;
            }
        });
    }

    debug!("UDP listener stopped");
}

async fn send_reply(socket: &UdpSocket, dispatcher: &Dispatcher, reply: &[u8], ctx: &RequestContext) {
    let result = tokio::time::timeout(dispatcher.write_timeout, socket.send_to(reply, ctx.client)).await;

    let reason = match result {
        Ok(Ok(_)) => {
            dispatcher.logger.log_send(ctx, reply);
            return;
        }
        Ok(Err(e)) => e.to_string(),
        Err(_) => "write timed out".to_string(),
    };

    dispatcher.logger.log_error(
        ctx,
        &DomainError::TransportWrite {
            client: ctx.client.to_string(),
            reason,
        },
    );
}
