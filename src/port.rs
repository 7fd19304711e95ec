// src/port.rs
//! Fire-and-forget message port.
//!
//! The port is a pass-through: it packages a (receiver, name, payload) triple
//! into an [`Envelope`] and hands it to the host's dispatch subsystem behind
//! the [`Dispatch`] seam. No delivery guarantee, no acknowledgment, no result.
//! Routing, validation, and failure reporting all belong to the host.

use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// The exact triple handed across the dispatch boundary. The payload is an
/// opaque byte sequence; this core never inspects its structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub receiver: String,
    pub name: String,
    pub payload: Bytes,
}

/// The host's dispatch subsystem, seen from this core.
///
/// Implementations must not block the caller; anything past the handoff
/// (routing, delivery, errors) is the host's concern.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, envelope: Envelope);
}

/// Sending half of the engine-integration contract.
#[derive(Clone)]
pub struct MessagePort {
    dispatch: Arc<dyn Dispatch>,
}

impl MessagePort {
    pub fn new(dispatch: Arc<dyn Dispatch>) -> Self {
        Self { dispatch }
    }

    /// Post a message to `receiver` and return immediately.
    ///
    /// Fire-and-forget: no success or failure is observable here. The payload
    /// bytes are copied into the envelope, so the caller's buffer can be
    /// reused right away.
    pub fn send(&self, receiver: &str, name: &str, payload: &[u8]) {
        tracing::trace!(receiver, name, len = payload.len(), "post message");
        self.dispatch.dispatch(Envelope {
            receiver: receiver.to_owned(),
            name: name.to_owned(),
            payload: Bytes::copy_from_slice(payload),
        });
    }
}

/// Dispatch half of an in-process envelope channel.
#[derive(Clone)]
pub struct ChannelDispatch {
    tx: mpsc::UnboundedSender<Envelope>,
    /// Count of envelopes currently queued.
    counter: Arc<AtomicUsize>,
}

/// Receiving half of an in-process envelope channel.
pub struct DispatchReceiver {
    rx: mpsc::UnboundedReceiver<Envelope>,
    counter: Arc<AtomicUsize>,
}

/// Create an in-process dispatch channel (dispatcher, receiver).
///
/// Hosts drain envelopes from the receiver in their own loop; tests use it to
/// observe exactly what crossed the boundary.
pub fn channel() -> (ChannelDispatch, DispatchReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let counter = Arc::new(AtomicUsize::new(0));
    (
        ChannelDispatch {
            tx,
            counter: counter.clone(),
        },
        DispatchReceiver { rx, counter },
    )
}

impl Dispatch for ChannelDispatch {
    /// Queue the envelope. If the receiving half is gone the envelope is
    /// silently dropped; a missing receiver is a host lifecycle event, not an
    /// error this core reports.
    fn dispatch(&self, envelope: Envelope) {
        self.counter.fetch_add(1, Ordering::SeqCst);
        if self.tx.send(envelope).is_err() {
            self.counter.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl ChannelDispatch {
    /// Number of envelopes currently queued.
    pub fn len(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DispatchReceiver {
    /// Await the next envelope. Returns `None` once every dispatcher handle
    /// has been dropped.
    pub async fn recv(&mut self) -> Option<Envelope> {
        let env = self.rx.recv().await;
        if env.is_some() {
            self.counter.fetch_sub(1, Ordering::SeqCst);
        }
        env
    }

    /// Take an envelope without awaiting, if one is queued.
    pub fn try_recv(&mut self) -> Option<Envelope> {
        let env = self.rx.try_recv().ok();
        if env.is_some() {
            self.counter.fetch_sub(1, Ordering::SeqCst);
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_and_recv() {
        let (dispatch, mut rx) = channel();
        let port = MessagePort::new(Arc::new(dispatch));

        port.send("main:/hud#gui", "update_score", b"{\"score\":128}");

        let env = rx.recv().await.expect("should receive");
        assert_eq!(env.receiver, "main:/hud#gui");
        assert_eq!(env.name, "update_score");
        assert_eq!(env.payload.as_ref(), b"{\"score\":128}");
    }

    #[tokio::test]
    async fn payload_bytes_cross_unmodified() {
        let (dispatch, mut rx) = channel();
        let port = MessagePort::new(Arc::new(dispatch));

        // Opaque payload, not valid UTF-8 and not valid JSON.
        let raw = [0x00, 0xff, 0x80, 0x7f];
        port.send("view#42", "blob", &raw);

        let env = rx.recv().await.expect("should receive");
        assert_eq!(env.payload.as_ref(), &raw);
    }

    #[tokio::test]
    async fn send_preserves_order_per_sender() {
        let (dispatch, mut rx) = channel();
        let port = MessagePort::new(Arc::new(dispatch));

        port.send("a", "first", b"1");
        port.send("a", "second", b"2");

        assert_eq!(rx.recv().await.unwrap().name, "first");
        assert_eq!(rx.recv().await.unwrap().name, "second");
    }

    #[tokio::test]
    async fn send_after_receiver_dropped_is_silent() {
        let (dispatch, rx) = channel();
        let port = MessagePort::new(Arc::new(dispatch.clone()));
        drop(rx);

        // No panic, no observable failure, nothing left queued.
        port.send("gone#receiver", "ping", b"");
        assert_eq!(dispatch.len(), 0);
    }

    #[tokio::test]
    async fn queued_counter_tracks_depth() {
        let (dispatch, mut rx) = channel();
        let port = MessagePort::new(Arc::new(dispatch.clone()));

        port.send("a", "m1", b"x");
        port.send("a", "m2", b"y");
        assert_eq!(dispatch.len(), 2);

        rx.try_recv().expect("m1 queued");
        assert_eq!(dispatch.len(), 1);
        rx.try_recv().expect("m2 queued");
        assert!(dispatch.is_empty());
        assert!(rx.try_recv().is_none());
    }
}
