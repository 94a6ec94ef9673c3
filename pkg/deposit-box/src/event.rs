use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};

use crate::Element;

/// A notification about an accepted transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VerifierEvent {
    /// An identity was added to the allow-list
    AddressAdmitted {
        /// The number of admitted identities after this one
        admitted_count: u64,
        /// The new allow-list root
        root: Element,
    },

    /// A message was appended to the log
    MessageDeposited {
        /// The slot the message was written to
        slot: u64,
    },
}

/// Fan-out of [`VerifierEvent`]s to any number of subscribers
///
/// Publishing never blocks. Subscribers that fall more than `capacity` events behind miss the
/// oldest ones.
#[derive(Debug, Clone)]
pub(crate) struct EventBus {
    sender: broadcast::Sender<VerifierEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: VerifierEvent) {
        // an error only means nobody is listening
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            tracing::trace!(?event, "no subscribers for event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<VerifierEvent> {
        self.sender.subscribe()
    }

    pub fn stream(&self) -> impl Stream<Item = VerifierEvent> + Send + 'static {
        BroadcastStream::new(self.subscribe()).filter_map(|event| match event {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(missed)) => {
                tracing::warn!(missed, "event stream lagged");
                None
            }
        })
    }
}
