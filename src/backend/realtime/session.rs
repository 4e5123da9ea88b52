/**
 * WebSocket Connection Lifecycle
 *
 * This module owns every live-update connection from handshake to
 * teardown: `Connecting -> Registered -> Closing -> Closed`.
 *
 * # Handshake
 *
 * Each endpoint requires an identifying parameter (`thread_id` or
 * `board_id`); a missing or invalid value is rejected with 400 before
 * the upgrade, never silently defaulted. Registration only happens
 * once the handshake has succeeded, so a failed upgrade leaves no
 * state to clean up.
 *
 * # Session Task
 *
 * After the upgrade a single task per connection drives the session:
 * it forwards frames queued by the hub to the socket sink and watches
 * the inbound side purely as a disconnect detector - clients are not
 * expected to send application messages. Any of the following ends the
 * session: inbound close/error/EOF, a failed outbound send, or the hub
 * pruning the listener (its queue sender dropped). Every exit path
 * runs through unregister (idempotent) and closes the transport.
 */
use crate::backend::error::ApiError;
use crate::backend::realtime::hub::Hub;
use crate::backend::realtime::topic::Topic;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

/// Query parameters for `GET /ws/thread`.
#[derive(Debug, Deserialize)]
pub struct ThreadWsQuery {
    thread_id: Option<i64>,
}

/// Query parameters for `GET /ws/board`.
#[derive(Debug, Deserialize)]
pub struct BoardWsQuery {
    board_id: Option<String>,
}

/// `GET /ws/thread?thread_id={id}` - live updates for one thread.
pub async fn ws_thread(
    State(hub): State<Hub>,
    Query(query): Query<ThreadWsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let thread_id = query
        .thread_id
        .ok_or_else(|| ApiError::bad_request("thread_id required"))?;
    Ok(ws.on_upgrade(move |socket| run_session(hub, Topic::Thread(thread_id), socket)))
}

/// `GET /ws/board?board_id={id}` - live updates for one board.
pub async fn ws_board(
    State(hub): State<Hub>,
    Query(query): Query<BoardWsQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, ApiError> {
    let board_id = query
        .board_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("board_id required"))?;
    Ok(ws.on_upgrade(move |socket| run_session(hub, Topic::Board(board_id), socket)))
}

/// `GET /ws/home` - front-page updates (board creation).
pub async fn ws_home(State(hub): State<Hub>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_session(hub, Topic::Home, socket))
}

/// Drive one registered connection until it disconnects.
///
/// The hub holds the only sender half of the frame queue, so once this
/// session unregisters (or is pruned by the dispatcher) the queue
/// drains to `None` and the task winds down.
async fn run_session(hub: Hub, topic: Topic, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let id = hub.register(topic.clone(), tx);

    loop {
        tokio::select! {
            // Frames queued by Hub::publish, delivered in publish order.
            frame = rx.recv() => {
                match frame {
                    Some(frame) => {
                        if sink.send(frame).await.is_err() {
                            tracing::debug!("[Session] listener {} on {}: outbound send failed", id, topic);
                            break;
                        }
                    }
                    // Sender dropped: the dispatcher pruned this listener.
                    None => break,
                }
            }
            // Inbound side: liveness detection only, payloads ignored.
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!("[Session] listener {} on {}: client closed", id, topic);
                        break;
                    }
                    Some(Err(e)) => {
                        tracing::debug!("[Session] listener {} on {}: read error: {}", id, topic, e);
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    // Teardown: both steps run on every exit path. Unregister is
    // idempotent, so racing with a dispatcher prune is harmless.
    hub.unregister(&topic, id);
    let _ = sink.close().await;
}
