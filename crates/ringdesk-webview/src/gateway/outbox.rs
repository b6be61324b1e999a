use ringdesk_common::SurfaceKey;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use crate::ipc::{js_dispatch_envelope, ResponseEnvelope};

/// Something to run in a surface, in the order it was queued.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Envelope {
        surface: SurfaceKey,
        envelope: ResponseEnvelope,
    },
    Script {
        surface: SurfaceKey,
        script: String,
    },
}

impl Delivery {
    pub fn surface(&self) -> SurfaceKey {
        match self {
            Self::Envelope { surface, .. } | Self::Script { surface, .. } => *surface,
        }
    }

    pub fn to_script(&self) -> String {
        match self {
            Self::Envelope { envelope, .. } => js_dispatch_envelope(envelope),
            Self::Script { script, .. } => script.clone(),
        }
    }
}

/// Sending half of the delivery queue. Cheap to clone into async tasks.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl Outbox {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, delivery: Delivery) {
        if self.tx.send(delivery).is_err() {
            debug!("delivery dropped: outbox closed");
        }
    }

    pub fn script(&self, surface: SurfaceKey, script: String) {
        self.send(Delivery::Script { surface, script });
    }
}

/// A request that has not been acknowledged yet.
///
/// The only way forward is [`Reply::acknowledge`], and the only way out of
/// the acknowledged state is [`PendingReply::respond`], which consumes it.
/// Each request therefore sees exactly one RECEIVED and at most one
/// RESPONSE, in that order.
pub struct Reply {
    outbox: Outbox,
    surface: SurfaceKey,
    event: String,
    id: u64,
}

impl Reply {
    pub fn new(outbox: Outbox, surface: SurfaceKey, event: String, id: u64) -> Self {
        Self {
            outbox,
            surface,
            event,
            id,
        }
    }

    #[must_use]
    pub fn acknowledge(self) -> PendingReply {
        self.outbox.send(Delivery::Envelope {
            surface: self.surface,
            envelope: ResponseEnvelope::received(&self.event, self.id),
        });
        PendingReply {
            outbox: self.outbox,
            surface: self.surface,
            event: self.event,
            id: self.id,
        }
    }
}

/// An acknowledged request waiting for its RESPONSE.
#[must_use = "every acknowledged request must be answered"]
pub struct PendingReply {
    outbox: Outbox,
    surface: SurfaceKey,
    event: String,
    id: u64,
}

impl PendingReply {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn respond(self, body: Option<Value>) {
        self.outbox.send(Delivery::Envelope {
            surface: self.surface,
            envelope: ResponseEnvelope::response(&self.event, self.id, body),
        });
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ipc::ResponseKind;

    #[test]
    fn acknowledge_then_respond() {
        let (outbox, mut rx) = Outbox::channel();
        let pending = Reply::new(outbox, SurfaceKey(1), "CHECK_COMPATIBILITY".into(), 4).acknowledge();

        let first = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());
        pending.respond(Some(json!(true)));
        let second = rx.try_recv().unwrap();

        match (first, second) {
            (
                Delivery::Envelope { envelope: a, .. },
                Delivery::Envelope { envelope: b, .. },
            ) => {
                assert_eq!(a.kind(), ResponseKind::Received);
                assert_eq!(b.kind(), ResponseKind::Response);
                assert_eq!((a.id(), b.id()), (4, 4));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn closed_outbox_does_not_panic() {
        let (outbox, rx) = Outbox::channel();
        drop(rx);
        outbox.script(SurfaceKey(1), "1;".into());
    }

    #[test]
    fn script_delivery_is_verbatim() {
        let d = Delivery::Script {
            surface: SurfaceKey(3),
            script: "alert(1);".into(),
        };
        assert_eq!(d.surface(), SurfaceKey(3));
        assert_eq!(d.to_script(), "alert(1);");
    }
}
