#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use wayland_session_lock::wire::Message;
use wayland_session_lock::{Context, ExtSessionLockManagerV1, GlobalBinder, Transport, TransportError};

/// A transport recording every submitted message, able to simulate send
/// failures.
pub struct MockTransport {
    sent: Mutex<Vec<Message>>,
    failing: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Arc<MockTransport> {
        Arc::new(MockTransport {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        })
    }

    /// Make every subsequent send fail with `TransportError::Closed`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All messages sent so far, in order
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }

    /// Drain the recorded messages
    pub fn take(&self) -> Vec<Message> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    /// The last sent message, panicking if none was sent
    pub fn last(&self) -> Message {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no message was sent")
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, msg: &Message) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        self.sent.lock().unwrap().push(msg.clone());
        Ok(())
    }
}

/// A registry recording the binds it was asked to perform.
pub struct MockRegistry {
    pub binds: Mutex<Vec<(u32, &'static str, u32, u32)>>,
    failing: AtomicBool,
}

impl MockRegistry {
    pub fn new() -> MockRegistry {
        MockRegistry {
            binds: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl GlobalBinder for MockRegistry {
    fn bind(
        &self,
        name: u32,
        interface: &'static str,
        version: u32,
        new_id: u32,
    ) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        self.binds.lock().unwrap().push((name, interface, version, new_id));
        Ok(())
    }
}

/// The name under which the tests advertise the session lock manager global
pub const MANAGER_GLOBAL: u32 = 13;

/// A context over a fresh mock transport, with the manager global bound
pub fn bound_manager() -> (Arc<MockTransport>, Arc<Context>, ExtSessionLockManagerV1) {
    let transport = MockTransport::new();
    let ctx = Context::new(transport.clone());
    let registry = MockRegistry::new();
    let manager = ExtSessionLockManagerV1::bind(&registry, &ctx, MANAGER_GLOBAL, 1)
        .expect("binding the manager global failed");
    (transport, ctx, manager)
}
