//! Inbound side of the event channel.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::state::GlobalStore;

use super::error::EventError;
use super::message::ServerEvent;

/// Reads server events and dispatches them to the global store in arrival order.
pub struct EventListener<R> {
    reader: BufReader<R>,
    store: GlobalStore,
}

impl<R> EventListener<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R, store: GlobalStore) -> Self {
        Self {
            reader: BufReader::new(reader),
            store,
        }
    }

    /// Run until the server closes the stream.
    ///
    /// Lines that do not decode are logged and skipped; a read error ends
    /// the listener with that error.
    pub async fn run(self) -> Result<(), EventError> {
        let mut lines = self.reader.lines();
        let mut received = 0u64;

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let event = match serde_json::from_str::<ServerEvent>(&line) {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping undecodable server event");
                    continue;
                }
            };
            received += 1;

            let current_game_id = self.store.state().current_game.as_ref().map(|g| g.id.clone());
            match event.to_action(current_game_id.as_deref()) {
                Some(action) => self.store.dispatch(action),
                None => tracing::debug!(?event, "Server event ignored"),
            }
        }

        tracing::info!(received, "Event channel closed by server");
        Ok(())
    }
}
