//! The `ext-session-lock-v1` protocol family
//!
//! This protocol allows for a privileged client to lock the session and
//! display arbitrary graphics while the session is locked. Three interfaces
//! are involved: the [`ext_session_lock_manager_v1`] global, the
//! [`ext_session_lock_v1`] object representing one lock attempt, and one
//! [`ext_session_lock_surface_v1`] per output being covered while locked.
//!
//! The compositor-side semantics (blanking outputs, withholding input) are
//! naturally out of the picture here; these are the client-side proxies
//! only.

pub use self::ext_session_lock_manager_v1::ExtSessionLockManagerV1;
pub use self::ext_session_lock_surface_v1::ExtSessionLockSurfaceV1;
pub use self::ext_session_lock_v1::ExtSessionLockV1;

/// The session lock manager global
pub mod ext_session_lock_manager_v1 {
    use std::sync::Arc;

    use smallvec::smallvec;

    use crate::context::{BindError, Context, DispatchError, GlobalBinder, RequestError};
    use crate::proxy::{Interface, ProxyCore, ProxyObject};
    use crate::wire::{Argument, ArgumentType, Message, MessageDesc, MessageGroup, Payload};

    /// The requests of `ext_session_lock_manager_v1`
    #[non_exhaustive]
    pub enum Request {
        /// Destroy the session lock manager object
        Destroy,
        /// Attempt to lock the session
        Lock,
    }

    impl MessageGroup for Request {
        const MESSAGES: &'static [MessageDesc] = &[
            MessageDesc {
                name: "destroy",
                since: 1,
                signature: &[],
                destructor: true,
            },
            MessageDesc {
                name: "lock",
                since: 1,
                signature: &[ArgumentType::NewId],
                destructor: false,
            },
        ];

        fn opcode(&self) -> u16 {
            match *self {
                Request::Destroy => 0,
                Request::Lock => 1,
            }
        }

        fn into_raw(self, sender_id: u32) -> Message {
            match self {
                Request::Destroy => Message {
                    sender_id,
                    opcode: 0,
                    args: smallvec![],
                },
                Request::Lock => Message {
                    sender_id,
                    opcode: 1,
                    args: smallvec![Argument::NewId(0)],
                },
            }
        }
    }

    struct ManagerInner {
        core: ProxyCore,
    }

    impl ProxyObject for ManagerInner {
        fn core(&self) -> &ProxyCore {
            &self.core
        }

        fn dispatch(&self, opcode: u16, _payload: Payload<'_>) -> Result<(), DispatchError> {
            // this interface defines no event
            log::debug!(
                "ignoring unknown opcode {} on {}@{}",
                opcode,
                self.core.interface,
                self.core.raw_id()
            );
            Ok(())
        }
    }

    /// The `ext_session_lock_manager_v1` proxy
    #[derive(Clone)]
    pub struct ExtSessionLockManagerV1 {
        inner: Arc<ManagerInner>,
    }

    impl Interface for ExtSessionLockManagerV1 {
        const NAME: &'static str = "ext_session_lock_manager_v1";
        const VERSION: u32 = 1;
    }

    impl ExtSessionLockManagerV1 {
        /// Bind the advertised global `name` at `version` on this context
        ///
        /// The caller is responsible for having checked that the global is
        /// actually advertised under this name with a compatible version;
        /// requesting a version this binding does not know is rejected
        /// here, before anything is sent.
        pub fn bind(
            registry: &dyn GlobalBinder,
            ctx: &Arc<Context>,
            name: u32,
            version: u32,
        ) -> Result<ExtSessionLockManagerV1, BindError> {
            if version == 0 || version > Self::VERSION {
                return Err(BindError::UnsupportedVersion {
                    interface: Self::NAME,
                    requested: version,
                    supported: Self::VERSION,
                });
            }
            let inner = Arc::new(ManagerInner {
                core: ProxyCore::new::<Self>(Arc::downgrade(ctx), version),
            });
            ctx.bind_global(registry, name, version, inner.clone())?;
            Ok(ExtSessionLockManagerV1 { inner })
        }

        /// Destroy the manager
        ///
        /// This does not affect locks or lock surfaces created through it.
        pub fn destroy(&self) -> Result<(), RequestError> {
            let ctx = self.inner.core.context()?;
            ctx.send(&self.inner.core, Request::Destroy)
        }

        /// Attempt to lock the session
        ///
        /// The returned [`ExtSessionLockV1`](super::ExtSessionLockV1) is
        /// registered before the request is sent; it is only returned if
        /// the send succeeded, so a returned proxy is always live from the
        /// binding's point of view. Whether the compositor grants the lock
        /// is reported later through the `locked` or `finished` event.
        pub fn lock(&self) -> Result<super::ExtSessionLockV1, RequestError> {
            let ctx = self.inner.core.context()?;
            let lock = super::ExtSessionLockV1::unregistered(
                Arc::downgrade(&ctx),
                self.inner.core.version,
            );
            ctx.send_constructor(&self.inner.core, Request::Lock, lock.as_dispatch_target())?;
            Ok(lock)
        }

        /// The id of this object, or 0 once destroyed
        pub fn id(&self) -> u32 {
            self.inner.core.id()
        }

        /// The version this global was bound at
        pub fn version(&self) -> u32 {
            self.inner.core.version
        }

        /// Whether this object has not been destroyed yet
        pub fn is_alive(&self) -> bool {
            self.inner.core.is_alive()
        }
    }
}

/// A created session lock
pub mod ext_session_lock_v1 {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Weak};

    use smallvec::smallvec;

    use crate::context::{Context, DispatchError, RequestError};
    use crate::handlers::HandlerList;
    use crate::proxy::{Interface, ProxyCore, ProxyObject};
    use crate::wire::{Argument, ArgumentType, Message, MessageDesc, MessageGroup, Payload};

    /// Protocol error codes reported by the compositor for this interface
    ///
    /// These arrive through the connection's fatal error machinery, not
    /// through this object's events; they are defined so callers can branch
    /// on the code.
    #[repr(u32)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[non_exhaustive]
    pub enum Error {
        /// Attempted to destroy session lock while locked
        InvalidDestroy = 0,
        /// Unlock requested but locked event was never sent
        InvalidUnlock = 1,
        /// Given wl_surface already has a role
        Role = 2,
        /// Given output already has a lock surface
        DuplicateOutput = 3,
        /// Given wl_surface has a buffer attached or committed
        AlreadyConstructed = 4,
    }

    impl Error {
        /// Interpret a raw error code
        pub fn from_raw(n: u32) -> Option<Error> {
            match n {
                0 => Some(Error::InvalidDestroy),
                1 => Some(Error::InvalidUnlock),
                2 => Some(Error::Role),
                3 => Some(Error::DuplicateOutput),
                4 => Some(Error::AlreadyConstructed),
                _ => None,
            }
        }

        /// The raw wire value of this error code
        pub fn to_raw(self) -> u32 {
            self as u32
        }
    }

    /// The requests of `ext_session_lock_v1`
    #[non_exhaustive]
    pub enum Request {
        /// Destroy the session lock object
        Destroy,
        /// Create a lock surface for a given output
        GetLockSurface {
            /// id of the surface to use
            surface: u32,
            /// id of the output the surface covers
            output: u32,
        },
        /// Unlock the session and destroy the object
        UnlockAndDestroy,
    }

    impl MessageGroup for Request {
        const MESSAGES: &'static [MessageDesc] = &[
            MessageDesc {
                name: "destroy",
                since: 1,
                signature: &[],
                destructor: true,
            },
            MessageDesc {
                name: "get_lock_surface",
                since: 1,
                signature: &[ArgumentType::NewId, ArgumentType::Object, ArgumentType::Object],
                destructor: false,
            },
            MessageDesc {
                name: "unlock_and_destroy",
                since: 1,
                signature: &[],
                destructor: true,
            },
        ];

        fn opcode(&self) -> u16 {
            match *self {
                Request::Destroy => 0,
                Request::GetLockSurface { .. } => 1,
                Request::UnlockAndDestroy => 2,
            }
        }

        fn into_raw(self, sender_id: u32) -> Message {
            match self {
                Request::Destroy => Message {
                    sender_id,
                    opcode: 0,
                    args: smallvec![],
                },
                Request::GetLockSurface { surface, output } => Message {
                    sender_id,
                    opcode: 1,
                    args: smallvec![
                        Argument::NewId(0),
                        Argument::Object(surface),
                        Argument::Object(output),
                    ],
                },
                Request::UnlockAndDestroy => Message {
                    sender_id,
                    opcode: 2,
                    args: smallvec![],
                },
            }
        }
    }

    /// Wire metadata of the events of this interface, indexed by opcode
    pub const EVENTS: &[MessageDesc] = &[
        MessageDesc {
            name: "locked",
            since: 1,
            signature: &[],
            destructor: false,
        },
        MessageDesc {
            name: "finished",
            since: 1,
            signature: &[],
            destructor: false,
        },
    ];

    /// The `locked` event: the session is now locked
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct LockedEvent;

    /// The `finished` event: the compositor gave up on this lock
    ///
    /// Either the lock was denied, or the session was unlocked by some
    /// other mean. The client should destroy the object.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct FinishedEvent;

    /// Listener for the `locked` event
    pub trait LockedHandler: Send + Sync {
        /// The session is now locked
        fn handle_locked(&self, event: LockedEvent);
    }

    impl<F> LockedHandler for F
    where
        F: Fn(LockedEvent) + Send + Sync,
    {
        fn handle_locked(&self, event: LockedEvent) {
            (self)(event)
        }
    }

    /// Listener for the `finished` event
    pub trait FinishedHandler: Send + Sync {
        /// The compositor has given up on this lock
        fn handle_finished(&self, event: FinishedEvent);
    }

    impl<F> FinishedHandler for F
    where
        F: Fn(FinishedEvent) + Send + Sync,
    {
        fn handle_finished(&self, event: FinishedEvent) {
            (self)(event)
        }
    }

    struct LockInner {
        core: ProxyCore,
        // set once `finished` is received; constructor requests are then
        // invalid, while the destructor requests remain legal
        finished: AtomicBool,
        locked_handlers: HandlerList<dyn LockedHandler>,
        finished_handlers: HandlerList<dyn FinishedHandler>,
    }

    impl ProxyObject for LockInner {
        fn core(&self) -> &ProxyCore {
            &self.core
        }

        fn dispatch(&self, opcode: u16, _payload: Payload<'_>) -> Result<(), DispatchError> {
            match opcode {
                0 => {
                    log::debug!(" <- {}@{}: locked", self.core.interface, self.core.raw_id());
                    self.locked_handlers.notify(|h| h.handle_locked(LockedEvent));
                    Ok(())
                }
                1 => {
                    log::debug!(" <- {}@{}: finished", self.core.interface, self.core.raw_id());
                    self.finished.store(true, Ordering::Release);
                    self.finished_handlers.notify(|h| h.handle_finished(FinishedEvent));
                    Ok(())
                }
                _ => {
                    log::debug!(
                        "ignoring unknown opcode {} on {}@{}",
                        opcode,
                        self.core.interface,
                        self.core.raw_id()
                    );
                    Ok(())
                }
            }
        }
    }

    /// The `ext_session_lock_v1` proxy
    #[derive(Clone)]
    pub struct ExtSessionLockV1 {
        inner: Arc<LockInner>,
    }

    impl Interface for ExtSessionLockV1 {
        const NAME: &'static str = "ext_session_lock_v1";
        const VERSION: u32 = 1;
    }

    impl ExtSessionLockV1 {
        pub(super) fn unregistered(context: Weak<Context>, version: u32) -> ExtSessionLockV1 {
            ExtSessionLockV1 {
                inner: Arc::new(LockInner {
                    core: ProxyCore::new::<Self>(context, version),
                    finished: AtomicBool::new(false),
                    locked_handlers: HandlerList::new(),
                    finished_handlers: HandlerList::new(),
                }),
            }
        }

        pub(super) fn as_dispatch_target(&self) -> Arc<dyn ProxyObject> {
            self.inner.clone()
        }

        /// Destroy the session lock
        ///
        /// This should only be sent after the `finished` event was
        /// received; destroying a lock that is still in place is a
        /// protocol error ([`Error::InvalidDestroy`]).
        pub fn destroy(&self) -> Result<(), RequestError> {
            let ctx = self.inner.core.context()?;
            ctx.send(&self.inner.core, Request::Destroy)
        }

        /// Create a lock surface for the given output
        ///
        /// One lock surface per output; enforcing that policy (and tearing
        /// surfaces down when outputs disappear) is the caller's business.
        /// `surface` and `output` are the registered proxies for the
        /// `wl_surface` and `wl_output` involved.
        pub fn get_lock_surface(
            &self,
            surface: &dyn ProxyObject,
            output: &dyn ProxyObject,
        ) -> Result<super::ExtSessionLockSurfaceV1, RequestError> {
            let ctx = self.inner.core.context()?;
            if self.inner.finished.load(Ordering::Acquire) {
                log::warn!("get_lock_surface on a finished {} object", self.inner.core.interface);
                return Err(RequestError::Defunct {
                    interface: self.inner.core.interface,
                });
            }
            if !surface.is_alive() {
                return Err(RequestError::DefunctArgument {
                    interface: surface.interface_name(),
                });
            }
            if !output.is_alive() {
                return Err(RequestError::DefunctArgument {
                    interface: output.interface_name(),
                });
            }
            let lock_surface = super::ExtSessionLockSurfaceV1::unregistered(
                Arc::downgrade(&ctx),
                self.inner.core.version,
            );
            ctx.send_constructor(
                &self.inner.core,
                Request::GetLockSurface {
                    surface: surface.id(),
                    output: output.id(),
                },
                lock_surface.as_dispatch_target(),
            )?;
            Ok(lock_surface)
        }

        /// Unlock the session, then destroy the object
        ///
        /// Only valid once the `locked` event has been received; otherwise
        /// the compositor reports [`Error::InvalidUnlock`].
        pub fn unlock_and_destroy(&self) -> Result<(), RequestError> {
            let ctx = self.inner.core.context()?;
            ctx.send(&self.inner.core, Request::UnlockAndDestroy)
        }

        /// Register a listener for the `locked` event
        pub fn add_locked_handler(&self, handler: Arc<dyn LockedHandler>) {
            self.inner.locked_handlers.add(handler);
        }

        /// Remove a previously registered `locked` listener
        pub fn remove_locked_handler(&self, handler: &Arc<dyn LockedHandler>) {
            self.inner.locked_handlers.remove(handler);
        }

        /// Register a listener for the `finished` event
        pub fn add_finished_handler(&self, handler: Arc<dyn FinishedHandler>) {
            self.inner.finished_handlers.add(handler);
        }

        /// Remove a previously registered `finished` listener
        pub fn remove_finished_handler(&self, handler: &Arc<dyn FinishedHandler>) {
            self.inner.finished_handlers.remove(handler);
        }

        /// The id of this object, or 0 once destroyed
        pub fn id(&self) -> u32 {
            self.inner.core.id()
        }

        /// The version this object was created with
        pub fn version(&self) -> u32 {
            self.inner.core.version
        }

        /// Whether this object has not been destroyed yet
        pub fn is_alive(&self) -> bool {
            self.inner.core.is_alive()
        }

        /// Whether the `finished` event has been received
        pub fn is_finished(&self) -> bool {
            self.inner.finished.load(Ordering::Acquire)
        }
    }
}

/// A surface displayed while the session is locked
pub mod ext_session_lock_surface_v1 {
    use std::sync::{Arc, Weak};

    use smallvec::smallvec;

    use crate::context::{Context, DispatchError, RequestError};
    use crate::handlers::HandlerList;
    use crate::proxy::{Interface, ProxyCore, ProxyObject};
    use crate::wire::{Argument, ArgumentType, Message, MessageDesc, MessageGroup, Payload};

    /// Protocol error codes reported by the compositor for this interface
    #[repr(u32)]
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[non_exhaustive]
    pub enum Error {
        /// Surface committed before first ack_configure request
        CommitBeforeFirstAck = 0,
        /// Surface committed with a null buffer
        NullBuffer = 1,
        /// Failed to match the surface size to the output size
        DimensionsMismatch = 2,
        /// Serial provided in ack_configure is invalid
        InvalidSerial = 3,
    }

    impl Error {
        /// Interpret a raw error code
        pub fn from_raw(n: u32) -> Option<Error> {
            match n {
                0 => Some(Error::CommitBeforeFirstAck),
                1 => Some(Error::NullBuffer),
                2 => Some(Error::DimensionsMismatch),
                3 => Some(Error::InvalidSerial),
                _ => None,
            }
        }

        /// The raw wire value of this error code
        pub fn to_raw(self) -> u32 {
            self as u32
        }
    }

    /// The requests of `ext_session_lock_surface_v1`
    #[non_exhaustive]
    pub enum Request {
        /// Destroy the lock surface object
        Destroy,
        /// Acknowledge a configure event
        AckConfigure {
            /// serial of the configure being acknowledged
            serial: u32,
        },
    }

    impl MessageGroup for Request {
        const MESSAGES: &'static [MessageDesc] = &[
            MessageDesc {
                name: "destroy",
                since: 1,
                signature: &[],
                destructor: true,
            },
            MessageDesc {
                name: "ack_configure",
                since: 1,
                signature: &[ArgumentType::Uint],
                destructor: false,
            },
        ];

        fn opcode(&self) -> u16 {
            match *self {
                Request::Destroy => 0,
                Request::AckConfigure { .. } => 1,
            }
        }

        fn into_raw(self, sender_id: u32) -> Message {
            match self {
                Request::Destroy => Message {
                    sender_id,
                    opcode: 0,
                    args: smallvec![],
                },
                Request::AckConfigure { serial } => Message {
                    sender_id,
                    opcode: 1,
                    args: smallvec![Argument::Uint(serial)],
                },
            }
        }
    }

    /// Wire metadata of the events of this interface, indexed by opcode
    pub const EVENTS: &[MessageDesc] = &[MessageDesc {
        name: "configure",
        since: 1,
        signature: &[ArgumentType::Uint, ArgumentType::Uint, ArgumentType::Uint],
        destructor: false,
    }];

    /// The `configure` event: the size the surface should assume
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ConfigureEvent {
        /// serial to use in `ack_configure`
        pub serial: u32,
        /// width the surface should be, in surface-local coordinates
        pub width: u32,
        /// height the surface should be, in surface-local coordinates
        pub height: u32,
    }

    /// Listener for the `configure` event
    pub trait ConfigureHandler: Send + Sync {
        /// The compositor requests the surface to assume this size
        fn handle_configure(&self, event: ConfigureEvent);
    }

    impl<F> ConfigureHandler for F
    where
        F: Fn(ConfigureEvent) + Send + Sync,
    {
        fn handle_configure(&self, event: ConfigureEvent) {
            (self)(event)
        }
    }

    struct LockSurfaceInner {
        core: ProxyCore,
        configure_handlers: HandlerList<dyn ConfigureHandler>,
    }

    impl ProxyObject for LockSurfaceInner {
        fn core(&self) -> &ProxyCore {
            &self.core
        }

        fn dispatch(&self, opcode: u16, mut payload: Payload<'_>) -> Result<(), DispatchError> {
            match opcode {
                0 => {
                    let malformed = |source| DispatchError {
                        interface: self.core.interface,
                        event: "configure",
                        source,
                    };
                    // fixed field order: serial, width, height
                    let serial = payload.uint().map_err(malformed)?;
                    let width = payload.uint().map_err(malformed)?;
                    let height = payload.uint().map_err(malformed)?;
                    log::debug!(
                        " <- {}@{}: configure serial {} size {}x{}",
                        self.core.interface,
                        self.core.raw_id(),
                        serial,
                        width,
                        height
                    );
                    let event = ConfigureEvent { serial, width, height };
                    self.configure_handlers.notify(|h| h.handle_configure(event));
                    Ok(())
                }
                _ => {
                    log::debug!(
                        "ignoring unknown opcode {} on {}@{}",
                        opcode,
                        self.core.interface,
                        self.core.raw_id()
                    );
                    Ok(())
                }
            }
        }
    }

    /// The `ext_session_lock_surface_v1` proxy
    #[derive(Clone)]
    pub struct ExtSessionLockSurfaceV1 {
        inner: Arc<LockSurfaceInner>,
    }

    impl Interface for ExtSessionLockSurfaceV1 {
        const NAME: &'static str = "ext_session_lock_surface_v1";
        const VERSION: u32 = 1;
    }

    impl ExtSessionLockSurfaceV1 {
        pub(super) fn unregistered(context: Weak<Context>, version: u32) -> ExtSessionLockSurfaceV1 {
            ExtSessionLockSurfaceV1 {
                inner: Arc::new(LockSurfaceInner {
                    core: ProxyCore::new::<Self>(context, version),
                    configure_handlers: HandlerList::new(),
                }),
            }
        }

        pub(super) fn as_dispatch_target(&self) -> Arc<dyn ProxyObject> {
            self.inner.clone()
        }

        /// Destroy the lock surface object
        pub fn destroy(&self) -> Result<(), RequestError> {
            let ctx = self.inner.core.context()?;
            ctx.send(&self.inner.core, Request::Destroy)
        }

        /// Acknowledge a configure event
        pub fn ack_configure(&self, serial: u32) -> Result<(), RequestError> {
            let ctx = self.inner.core.context()?;
            ctx.send(&self.inner.core, Request::AckConfigure { serial })
        }

        /// Register a listener for the `configure` event
        pub fn add_configure_handler(&self, handler: Arc<dyn ConfigureHandler>) {
            self.inner.configure_handlers.add(handler);
        }

        /// Remove a previously registered `configure` listener
        pub fn remove_configure_handler(&self, handler: &Arc<dyn ConfigureHandler>) {
            self.inner.configure_handlers.remove(handler);
        }

        /// The id of this object, or 0 once destroyed
        pub fn id(&self) -> u32 {
            self.inner.core.id()
        }

        /// The version this object was created with
        pub fn version(&self) -> u32 {
            self.inner.core.version
        }

        /// Whether this object has not been destroyed yet
        pub fn is_alive(&self) -> bool {
            self.inner.core.is_alive()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::context::{Context, GlobalBinder, RequestError, Transport, TransportError};
    use crate::proxy::AnonymousObject;
    use crate::wire::{Message, MessageGroup};

    use super::*;

    struct NullTransport;

    impl Transport for NullTransport {
        fn send(&self, _msg: &Message) -> Result<(), TransportError> {
            Ok(())
        }
    }

    struct NullRegistry;

    impl GlobalBinder for NullRegistry {
        fn bind(
            &self,
            _name: u32,
            _interface: &'static str,
            _version: u32,
            _new_id: u32,
        ) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn signature_matches<R: MessageGroup>(request: R) {
        let opcode = request.opcode();
        let desc = R::MESSAGES[opcode as usize];
        let msg = request.into_raw(1);
        assert_eq!(msg.opcode, opcode);
        let types: Vec<_> = msg.args.iter().map(|a| a.get_type()).collect();
        assert_eq!(types.as_slice(), desc.signature, "args of {} out of order", desc.name);
    }

    #[test]
    fn request_args_match_their_declared_signatures() {
        signature_matches(ext_session_lock_manager_v1::Request::Destroy);
        signature_matches(ext_session_lock_manager_v1::Request::Lock);
        signature_matches(ext_session_lock_v1::Request::Destroy);
        signature_matches(ext_session_lock_v1::Request::GetLockSurface { surface: 2, output: 3 });
        signature_matches(ext_session_lock_v1::Request::UnlockAndDestroy);
        signature_matches(ext_session_lock_surface_v1::Request::Destroy);
        signature_matches(ext_session_lock_surface_v1::Request::AckConfigure { serial: 7 });
    }

    #[test]
    fn destructor_requests_are_flagged_as_such() {
        assert!(ext_session_lock_manager_v1::Request::Destroy.is_destructor());
        assert!(!ext_session_lock_manager_v1::Request::Lock.is_destructor());
        assert!(ext_session_lock_v1::Request::Destroy.is_destructor());
        assert!(ext_session_lock_v1::Request::UnlockAndDestroy.is_destructor());
        assert!(ext_session_lock_surface_v1::Request::Destroy.is_destructor());
        assert!(!ext_session_lock_surface_v1::Request::AckConfigure { serial: 0 }.is_destructor());
    }

    #[test]
    fn lock_error_codes_round_trip() {
        use ext_session_lock_v1::Error;
        for raw in 0..5 {
            assert_eq!(Error::from_raw(raw).unwrap().to_raw(), raw);
        }
        assert_eq!(Error::from_raw(2), Some(Error::Role));
        assert_eq!(Error::from_raw(5), None);
    }

    #[test]
    fn lock_surface_error_codes_round_trip() {
        use ext_session_lock_surface_v1::Error;
        for raw in 0..4 {
            assert_eq!(Error::from_raw(raw).unwrap().to_raw(), raw);
        }
        assert_eq!(Error::from_raw(0), Some(Error::CommitBeforeFirstAck));
        assert_eq!(Error::from_raw(4), None);
    }

    #[test]
    fn dead_argument_objects_are_rejected_before_sending() {
        let ctx = Context::new(Arc::new(NullTransport));
        let manager = ExtSessionLockManagerV1::bind(&NullRegistry, &ctx, 1, 1).unwrap();
        let lock = manager.lock().unwrap();
        let surface = AnonymousObject::register(&ctx, "wl_surface", 6);
        let output = AnonymousObject::register(&ctx, "wl_output", 4);

        surface.core.kill();

        match lock.get_lock_surface(&*surface, &*output) {
            Err(RequestError::DefunctArgument { interface: "wl_surface" }) => {}
            _ => panic!("a dead surface argument must be rejected"),
        }
    }
}
