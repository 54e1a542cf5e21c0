//! Backend bridge: the frontend's only doorway to the native process.
//!
//! The bridge is the boundary contract with the external backend that owns
//! capture, persistence, content-addressed storage, and shell execution.
//! Outbound traffic is [`BridgeCall`] values handed to a [`Bridge`]
//! implementation; inbound traffic is push-event payloads ([`events`]) the
//! host feeds back into the application event handler.
//!
//! The trait seam exists for the same reason the storage trait does in any
//! layered app: the host shim plugs in the real transport, tests plug in a
//! recording fake.

pub mod calls;
pub mod events;

pub use calls::{BridgeCall, Settings, ThemeMode};
pub use events::{ContentPayload, PipeStatus};

/// Fire-and-forget invocation channel into the backend.
///
/// `invoke` must not block: implementations queue the call onto the transport
/// and return. Failures are the host's to log; the frontend observes them
/// only as missing follow-up push events (degraded state, not an error).
pub trait Bridge {
    fn invoke(&self, call: &BridgeCall);
}

/// Bridge that drops every call.
///
/// Useful as a placeholder during host bring-up and in tests that don't care
/// about outbound traffic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBridge;

impl Bridge for NullBridge {
    fn invoke(&self, call: &BridgeCall) {
        tracing::trace!(method = call.method(), "dropping bridge call (null bridge)");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{Bridge, BridgeCall};
    use std::cell::RefCell;

    /// Records every invocation for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingBridge {
        pub calls: RefCell<Vec<BridgeCall>>,
    }

    impl RecordingBridge {
        pub fn count_of(&self, method: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|call| call.method() == method)
                .count()
        }
    }

    impl Bridge for RecordingBridge {
        fn invoke(&self, call: &BridgeCall) {
            self.calls.borrow_mut().push(call.clone());
        }
    }
}
