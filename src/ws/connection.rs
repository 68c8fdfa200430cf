//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching subscription commands and forwarding filtered
//! notifications.

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::{DomainEvent, EventoId};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads subscription commands from the client and applies them.
/// - Forwards matching notifications from the [`broadcast::Receiver`]
///   to the client.
pub async fn run_connection(socket: WebSocket, mut event_rx: broadcast::Receiver<DomainEvent>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs);
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            // Notification from EventBus
            event = event_rx.recv() => {
                match event {
                    Ok(domain_event) => {
                        if subs.matches(domain_event.evento_id()) {
                            let msg = WsMessage {
                                id: uuid::Uuid::new_v4().to_string(),
                                msg_type: WsMessageType::Event,
                                timestamp: chrono::Utc::now(),
                                payload: serde_json::to_value(&domain_event).unwrap_or_default(),
                            };
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Splits raw ID strings into parsed [`EventoId`]s plus a wildcard flag.
/// Unparseable entries are silently dropped.
fn parse_id_list(raw: &[String]) -> (Vec<EventoId>, bool) {
    let mut ids = Vec::with_capacity(raw.len());
    let mut wildcard = false;
    for s in raw {
        if s == "*" {
            wildcard = true;
        } else if let Ok(id) = s.parse::<EventoId>() {
            ids.push(id);
        }
    }
    (ids, wildcard)
}

/// Handles a text message from the client, returning an optional JSON response.
fn handle_text_message(text: &str, subs: &mut SubscriptionManager) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return error_response(String::new(), 400, "malformed JSON");
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload.clone()) else {
        return error_response(msg.id, 404, "unknown command");
    };

    let payload = match command {
        WsCommand::Subscribe { evento_ids } => {
            let (ids, wildcard) = parse_id_list(&evento_ids);
            subs.subscribe(&ids, wildcard);
            serde_json::json!({
                "subscribed": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                "count": subs.count(),
                "wildcard": subs.is_subscribed_all(),
            })
        }
        WsCommand::Unsubscribe { evento_ids } => {
            let (ids, _) = parse_id_list(&evento_ids);
            subs.unsubscribe(&ids);
            serde_json::json!({
                "unsubscribed": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
                "remaining_count": subs.count(),
            })
        }
    };

    let response = WsMessage {
        id: msg.id,
        msg_type: WsMessageType::Response,
        timestamp: chrono::Utc::now(),
        payload,
    };
    serde_json::to_string(&response).ok()
}

/// Builds a serialized error envelope.
fn error_response(id: String, code: u32, message: &str) -> Option<String> {
    let err = WsMessage {
        id,
        msg_type: WsMessageType::Error,
        timestamp: chrono::Utc::now(),
        payload: serde_json::json!({
            "code": code,
            "message": message,
        }),
    };
    serde_json::to_string(&err).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn command_json(command: &str, ids: &[&str]) -> String {
        serde_json::json!({
            "id": "req-1",
            "type": "command",
            "timestamp": chrono::Utc::now(),
            "payload": { "command": command, "evento_ids": ids },
        })
        .to_string()
    }

    #[test]
    fn malformed_json_yields_error_response() {
        let mut subs = SubscriptionManager::new();
        let resp = handle_text_message("not json", &mut subs);
        let Some(resp) = resp else {
            panic!("expected error response");
        };
        assert!(resp.contains("malformed JSON"));
    }

    #[test]
    fn subscribe_command_registers_ids() {
        let mut subs = SubscriptionManager::new();
        let id = EventoId::new();
        let text = command_json("subscribe", &[&id.to_string()]);
        let resp = handle_text_message(&text, &mut subs);
        assert!(resp.is_some());
        assert!(subs.matches(id));
    }

    #[test]
    fn wildcard_subscribe() {
        let mut subs = SubscriptionManager::new();
        let text = command_json("subscribe", &["*"]);
        let _ = handle_text_message(&text, &mut subs);
        assert!(subs.is_subscribed_all());
    }

    #[test]
    fn unparseable_ids_are_dropped() {
        let mut subs = SubscriptionManager::new();
        let text = command_json("subscribe", &["garbage", "*"]);
        let _ = handle_text_message(&text, &mut subs);
        assert_eq!(subs.count(), 0);
        assert!(subs.is_subscribed_all());
    }

    #[test]
    fn unsubscribe_command_removes_ids() {
        let mut subs = SubscriptionManager::new();
        let id = EventoId::new();
        subs.subscribe(&[id], false);

        let text = command_json("unsubscribe", &[&id.to_string()]);
        let _ = handle_text_message(&text, &mut subs);
        assert!(!subs.matches(id));
    }

    #[test]
    fn unknown_command_yields_error() {
        let mut subs = SubscriptionManager::new();
        let text = command_json("swap", &[]);
        let resp = handle_text_message(&text, &mut subs);
        let Some(resp) = resp else {
            panic!("expected error response");
        };
        assert!(resp.contains("unknown command"));
    }
}
