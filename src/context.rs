//! The wire context: object registry and connection boundary
//!
//! The [`Context`] is the seam between the proxy layer and the actual
//! connection. It owns the id → object registry, hands outbound messages to
//! a caller-supplied [`Transport`], and routes inbound events to the
//! matching object's dispatch entry point. Socket I/O, buffering and
//! byte-level marshalling all live on the other side of the [`Transport`]
//! trait and are of no concern here.

use std::sync::{Arc, Mutex};

use crate::map::ObjectMap;
use crate::proxy::{ProxyCore, ProxyObject};
use crate::wire::{Argument, ArgumentType, Message, MessageGroup, Payload, PayloadError};

/// Error reported by the underlying connection
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// An I/O error occurred on the connection
    #[error("connection i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The connection has been closed
    #[error("the connection is closed")]
    Closed,
}

/// Error reported when issuing a request
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The underlying send failed; local proxy state is unaffected
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The proxy the request was issued on is destroyed or its connection
    /// is gone
    #[error("request on a defunct {interface} object")]
    Defunct {
        /// Interface of the defunct proxy
        interface: &'static str,
    },
    /// An object passed as argument has already been destroyed
    #[error("request references a defunct {interface} argument")]
    DefunctArgument {
        /// Interface of the defunct argument
        interface: &'static str,
    },
}

/// Error reported when binding a global
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// The requested version is outside what this binding supports
    #[error("version {requested} of {interface} is not supported (max {supported})")]
    UnsupportedVersion {
        /// Interface of the global
        interface: &'static str,
        /// Version the caller asked for
        requested: u32,
        /// Maximum version known to this binding
        supported: u32,
    },
    /// The underlying bind request could not be sent
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Error reported when delivering an inbound event
///
/// Stray events (unknown or already destroyed ids) and unknown opcodes are
/// not errors; they are tolerated and logged. Only a payload that does not
/// match the protocol-defined layout of a known event is reported.
#[derive(Debug, thiserror::Error)]
#[error("malformed payload for event {interface}.{event}: {source}")]
pub struct DispatchError {
    /// Interface on which the event arrived
    pub interface: &'static str,
    /// Name of the event whose payload was malformed
    pub event: &'static str,
    /// The underlying decoding failure
    #[source]
    pub source: PayloadError,
}

/// The outbound half of the connection
///
/// Implementations serialize the message into the connection's wire format
/// and submit it. A send may block; it must not be silently retried.
pub trait Transport: Send + Sync {
    /// Submit one request message
    fn send(&self, msg: &Message) -> Result<(), TransportError>;
}

/// Access to the `wl_registry` bind request, supplied by the bootstrap code
pub trait GlobalBinder {
    /// Bind the global `name` at `version`, giving it the fresh id `new_id`
    fn bind(
        &self,
        name: u32,
        interface: &'static str,
        version: u32,
        new_id: u32,
    ) -> Result<(), TransportError>;
}

/// Object registry and outbound connection handle
///
/// One `Context` corresponds to one connection. All proxies created through
/// it keep a weak back-reference; dropping the `Context` makes every
/// outstanding proxy defunct.
pub struct Context {
    map: Mutex<ObjectMap>,
    transport: Arc<dyn Transport>,
    // serializes id allocation with wire order, like holding the connection
    // lock across a constructor send
    send_lock: Mutex<()>,
}

impl Context {
    /// Create a context over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Arc<Context> {
        Arc::new(Context {
            map: Mutex::new(ObjectMap::new()),
            transport,
            send_lock: Mutex::new(()),
        })
    }

    /// Register a proxy object, assigning it a fresh id
    ///
    /// The id is unique among currently registered objects; it may be
    /// reused after the object is destroyed.
    pub fn register(&self, proxy: Arc<dyn ProxyObject>) -> u32 {
        let id = self.map.lock().unwrap().insert_new(proxy.clone());
        proxy.core().attach(id);
        id
    }

    /// Find the registered object with the given id
    pub fn find(&self, id: u32) -> Option<Arc<dyn ProxyObject>> {
        self.map.lock().unwrap().find(id)
    }

    /// Issue a plain request on `sender`
    pub(crate) fn send<R: MessageGroup>(
        &self,
        sender: &ProxyCore,
        request: R,
    ) -> Result<(), RequestError> {
        let _guard = self.send_lock.lock().unwrap();
        if !sender.is_alive() {
            log::warn!("request {} on defunct {} object", request.name(), sender.interface);
            return Err(RequestError::Defunct {
                interface: sender.interface,
            });
        }
        let destructor = request.is_destructor();
        let name = request.name();
        let msg = request.into_raw(sender.raw_id());
        log::debug!(" -> {}@{}: {} {:?}", sender.interface, msg.sender_id, name, msg.args);
        self.transport.send(&msg)?;
        if destructor {
            sender.kill();
            self.map.lock().unwrap().remove(msg.sender_id);
        }
        Ok(())
    }

    /// Issue a request creating a new object
    ///
    /// The child proxy is registered before the message is produced, so an
    /// event addressed to the new id can be routed even if it arrives
    /// before the request's round-trip completes. If the send fails the
    /// child is unregistered again and marked dead, and only the error is
    /// returned to the caller.
    pub(crate) fn send_constructor<R: MessageGroup>(
        &self,
        sender: &ProxyCore,
        request: R,
        child: Arc<dyn ProxyObject>,
    ) -> Result<u32, RequestError> {
        let _guard = self.send_lock.lock().unwrap();
        if !sender.is_alive() {
            log::warn!("request {} on defunct {} object", request.name(), sender.interface);
            return Err(RequestError::Defunct {
                interface: sender.interface,
            });
        }
        let name = request.name();
        let mut msg = request.into_raw(sender.raw_id());

        let new_id = self.map.lock().unwrap().insert_new(child.clone());
        child.core().attach(new_id);
        let slot = msg
            .args
            .iter_mut()
            .find(|a| a.get_type() == ArgumentType::NewId)
            .expect("send_constructor used with a message not creating any object");
        *slot = Argument::NewId(new_id);

        log::debug!(" -> {}@{}: {} {:?}", sender.interface, msg.sender_id, name, msg.args);
        match self.transport.send(&msg) {
            Ok(()) => Ok(new_id),
            Err(e) => {
                self.map.lock().unwrap().remove(new_id);
                child.core().kill();
                Err(e.into())
            }
        }
    }

    /// Register `proxy` and bind it to the global `name` at `version`
    pub(crate) fn bind_global(
        &self,
        registry: &dyn GlobalBinder,
        name: u32,
        version: u32,
        proxy: Arc<dyn ProxyObject>,
    ) -> Result<u32, BindError> {
        let _guard = self.send_lock.lock().unwrap();
        let id = self.map.lock().unwrap().insert_new(proxy.clone());
        proxy.core().attach(id);
        log::debug!(
            " -> binding global {} as {}@{} (version {})",
            name,
            proxy.interface_name(),
            id,
            version
        );
        match registry.bind(name, proxy.interface_name(), version, id) {
            Ok(()) => Ok(id),
            Err(e) => {
                self.map.lock().unwrap().remove(id);
                proxy.core().kill();
                Err(e.into())
            }
        }
    }

    /// Deliver one inbound event to the object it is addressed to
    ///
    /// Events addressed to an unknown or already destroyed object are
    /// silently dropped: the server may legitimately emit events that race
    /// with a destructor request. Payloads that do not match the layout of
    /// a known event are reported as an error.
    pub fn deliver(
        &self,
        object_id: u32,
        opcode: u16,
        payload: &[u32],
    ) -> Result<(), DispatchError> {
        let target = self.map.lock().unwrap().find(object_id);
        match target {
            Some(proxy) => {
                if !proxy.is_alive() {
                    log::debug!(
                        "ignoring event opcode {} for dead object {}@{}",
                        opcode,
                        proxy.interface_name(),
                        object_id
                    );
                    return Ok(());
                }
                proxy.dispatch(opcode, Payload::new(payload))
            }
            None => {
                log::debug!("ignoring event opcode {} for unknown object id {}", opcode, object_id);
                Ok(())
            }
        }
    }
}
