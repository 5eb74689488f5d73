// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live grid streaming support for rendering surfaces.
//!
//! This module provides read-only, non-authoritative grid change
//! notifications via WebSocket connections. Events represent facts about
//! what changed in the grid, not directives or domain logic.
//!
//! # Architecture
//!
//! - Events are broadcast to all connected clients
//! - Events are informational only and never authoritative
//! - No commands are executed over WebSocket connections
//! - Clients must still read the grid via the HTTP routes for
//!   authoritative data

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live grid event types.
///
/// These events describe changes to the grid and are purely informational.
/// They are derived from completed controller operations, not the source
/// of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    /// A month became the active month.
    MonthLoaded {
        /// The month key (`YYYY-MM`).
        month: String,
    },
    /// The active month moved one step.
    MonthChanged {
        /// The new active month (`YYYY-MM`).
        month: String,
    },
    /// Every shift of a month was deleted.
    MonthCleared {
        /// The cleared month (`YYYY-MM`).
        month: String,
    },
    /// One cell was edited.
    CellEdited {
        /// The employee the cell belongs to.
        employee_id: i64,
        /// The cell's date (ISO `YYYY-MM-DD`).
        date: String,
        /// The new cell value.
        value: String,
    },
    /// A flush pushed queued changes to the backing store.
    ChangesSaved {
        /// Changes successfully persisted.
        saved: usize,
        /// Changes that failed and remain queued.
        failed: usize,
    },
    /// The employee roster changed.
    RosterChanged {
        /// Employees now on the roster.
        count: usize,
    },
    /// The shift-type catalog changed.
    CatalogChanged {
        /// Shift types now in the catalog.
        count: usize,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

/// Broadcaster for live grid events.
///
/// This is a lightweight wrapper around `tokio::sync::broadcast` that allows
/// multiple WebSocket clients to receive grid change notifications.
#[derive(Clone)]
pub struct GridEventBroadcaster {
    /// The broadcast channel sender.
    tx: broadcast::Sender<GridEvent>,
}

impl GridEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is silently dropped.
    /// This is non-blocking and will not wait for clients to receive the event.
    pub fn broadcast(&self, event: &GridEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast grid event");
            }
            Err(_) => {
                // No receivers, which is fine
                debug!(?event, "No receivers for grid event");
            }
        }
    }

    /// Subscribes to the event stream.
    ///
    /// Returns a receiver that will receive all future events.
    /// Events sent before subscription are not received.
    fn subscribe(&self) -> broadcast::Receiver<GridEvent> {
        self.tx.subscribe()
    }
}

impl Default for GridEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles WebSocket upgrade requests for live event streaming.
///
/// Accepts the upgrade, sends a connection confirmation event, then
/// streams all future grid events to the client until it disconnects.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state.events))
}

/// Handles an individual WebSocket connection.
///
/// Sends a connection confirmation, then streams all grid events until
/// the client disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<GridEventBroadcaster>) {
    info!("Client connected to live grid stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<GridEvent> = broadcaster.subscribe();

    // Send connection confirmation
    let connected_event = GridEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    // Task for sending events to the client
    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        // Client disconnected
                        break;
                    }
                }
                Err(e) => {
                    error!(?e, "Failed to serialize grid event");
                }
            }
        }
    });

    // Task for receiving messages from the client (though we don't expect any)
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    // Commands are not accepted over the stream
                    warn!("Ignoring unexpected client message");
                }
                Ok(Message::Close(_)) => {
                    debug!("Close frame received");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Ping/pong handled automatically by Axum
                }
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            debug!("Event forwarding ended");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Client receive loop ended");
            send_task.abort();
        }
    }

    info!("Client disconnected from live grid stream");
}
