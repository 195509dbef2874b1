//! Protocol object model
//!
//! Every protocol object is a local proxy for a remote object identified by
//! an integer id. The concrete proxy types live in [`protocol`](crate::protocol);
//! this module provides the pieces they share: the [`ProxyObject`] trait the
//! object map stores them behind, and the [`ProxyCore`] state they embed.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use downcast_rs::{impl_downcast, Downcast};

use crate::context::{Context, DispatchError, RequestError};
use crate::wire::Payload;

/// The description of a protocol interface
pub trait Interface: 'static {
    /// The protocol name of this interface
    const NAME: &'static str;
    /// The maximum version of this interface supported by the binding
    const VERSION: u32;
}

/// A registered protocol object, as seen by the object map
///
/// Inbound events are routed by object id to the matching entry's
/// [`dispatch`](ProxyObject::dispatch) method.
pub trait ProxyObject: Downcast + Send + Sync {
    /// Access the shared proxy state
    fn core(&self) -> &ProxyCore;

    /// Decode an inbound event and fan it out to the registered listeners
    ///
    /// Unknown opcodes are ignored, for forward compatibility with protocol
    /// versions this binding does not know about.
    fn dispatch(&self, opcode: u16, payload: Payload<'_>) -> Result<(), DispatchError>;

    /// The protocol name of this object's interface
    fn interface_name(&self) -> &'static str {
        self.core().interface
    }

    /// The version this object was created with
    fn version(&self) -> u32 {
        self.core().version
    }

    /// The id of this object on the connection
    ///
    /// Returns 0 if the object is no longer alive.
    fn id(&self) -> u32 {
        self.core().id()
    }

    /// Whether this object is still alive
    ///
    /// An object stops being alive once a destructor request has been sent
    /// for it, or once its context has been dropped.
    fn is_alive(&self) -> bool {
        self.core().is_alive()
    }
}

impl_downcast!(ProxyObject);

/// State shared by every proxy object
pub struct ProxyCore {
    pub(crate) interface: &'static str,
    pub(crate) version: u32,
    id: AtomicU32,
    alive: AtomicBool,
    context: Weak<Context>,
}

impl ProxyCore {
    /// Create the core state for an object of interface `I`
    pub(crate) fn new<I: Interface>(context: Weak<Context>, version: u32) -> ProxyCore {
        ProxyCore {
            interface: I::NAME,
            version,
            id: AtomicU32::new(0),
            alive: AtomicBool::new(true),
            context,
        }
    }

    /// Core state with an interface name only known at runtime
    pub(crate) fn anonymous(interface: &'static str, version: u32, context: Weak<Context>) -> ProxyCore {
        ProxyCore {
            interface,
            version,
            id: AtomicU32::new(0),
            alive: AtomicBool::new(true),
            context,
        }
    }

    /// The id of this object, or 0 if it is dead
    pub fn id(&self) -> u32 {
        if self.is_alive() {
            self.id.load(Ordering::Acquire)
        } else {
            0
        }
    }

    /// Whether the object is still alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    // the id regardless of liveness, for registry bookkeeping
    pub(crate) fn raw_id(&self) -> u32 {
        self.id.load(Ordering::Acquire)
    }

    pub(crate) fn attach(&self, id: u32) {
        self.id.store(id, Ordering::Release);
    }

    pub(crate) fn kill(&self) {
        self.alive.store(false, Ordering::Release);
    }

    /// Access the wire context, failing if the connection is gone
    pub(crate) fn context(&self) -> Result<Arc<Context>, RequestError> {
        self.context.upgrade().ok_or(RequestError::Defunct {
            interface: self.interface,
        })
    }
}

/// A proxy for an object outside this protocol family
///
/// `ext_session_lock_v1.get_lock_surface` references a `wl_surface` and a
/// `wl_output` owned by the bootstrap code. Registering them as anonymous
/// objects lets them be passed as request arguments without this crate
/// knowing their interfaces; any event addressed to them is ignored.
pub struct AnonymousObject {
    pub(crate) core: ProxyCore,
}

impl AnonymousObject {
    /// Register an anonymous stand-in for an externally managed object
    pub fn register(ctx: &Arc<Context>, interface: &'static str, version: u32) -> Arc<AnonymousObject> {
        let proxy = Arc::new(AnonymousObject {
            core: ProxyCore::anonymous(interface, version, Arc::downgrade(ctx)),
        });
        ctx.register(proxy.clone());
        proxy
    }
}

impl ProxyObject for AnonymousObject {
    fn core(&self) -> &ProxyCore {
        &self.core
    }

    fn dispatch(&self, opcode: u16, _payload: Payload<'_>) -> Result<(), DispatchError> {
        log::debug!(
            "ignoring event opcode {} on anonymous object {}@{}",
            opcode,
            self.core.interface,
            self.core.raw_id()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_is_dead_without_id_once_killed() {
        let core = ProxyCore::anonymous("wl_surface", 1, Weak::new());
        core.attach(4);
        assert!(core.is_alive());
        assert_eq!(core.id(), 4);
        core.kill();
        assert!(!core.is_alive());
        assert_eq!(core.id(), 0);
        assert_eq!(core.raw_id(), 4);
    }

    #[test]
    fn core_without_context_reports_defunct() {
        let core = ProxyCore::anonymous("wl_output", 1, Weak::new());
        assert!(matches!(
            core.context(),
            Err(RequestError::Defunct { interface: "wl_output" })
        ));
    }
}
