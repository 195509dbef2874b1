//! Hand-written client-side bindings to the `ext-session-lock-v1` wayland
//! protocol.
//!
//! This crate provides typed proxies for the three interfaces of the
//! session-lock family: [`ExtSessionLockManagerV1`], [`ExtSessionLockV1`]
//! and [`ExtSessionLockSurfaceV1`]. Method calls on a proxy serialize
//! requests onto the outgoing connection; inbound events are demultiplexed
//! by object id and opcode and fanned out to the listeners registered on
//! the matching proxy.
//!
//! The actual connection is not provided here. The bootstrap code supplies
//! it through two narrow traits: [`Transport`] for the outbound wire, and
//! [`GlobalBinder`] for the `wl_registry` bind request. Inbound traffic is
//! injected with [`Context::deliver`].
//!
//! ## Overview
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use wayland_session_lock::*;
//! use wayland_session_lock::protocol::ext_session_lock_surface_v1::ConfigureEvent;
//! use wayland_session_lock::protocol::ext_session_lock_v1::LockedEvent;
//!
//! # fn example(
//! #     transport: Arc<dyn Transport>,
//! #     registry: &dyn GlobalBinder,
//! #     global_name: u32,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = Context::new(transport);
//!
//! // the registry advertised the global under `global_name`
//! let manager = ExtSessionLockManagerV1::bind(registry, &ctx, global_name, 1)?;
//! let lock = manager.lock()?;
//! lock.add_locked_handler(Arc::new(|_: LockedEvent| {
//!     // the session is locked, time to draw the lock screens
//! }));
//!
//! // per output: a wl_surface and wl_output obtained from the bootstrap,
//! // registered as anonymous objects
//! let surface = AnonymousObject::register(&ctx, "wl_surface", 6);
//! let output = AnonymousObject::register(&ctx, "wl_output", 4);
//! let lock_surface = lock.get_lock_surface(&*surface, &*output)?;
//! lock_surface.add_configure_handler(Arc::new(|event: ConfigureEvent| {
//!     // resize the buffer to event.width x event.height, then ack
//!     let _ = event.serial;
//! }));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod handlers;
pub mod map;
pub mod protocol;
pub mod proxy;
pub mod wire;

pub use crate::context::{
    BindError, Context, DispatchError, GlobalBinder, RequestError, Transport, TransportError,
};
pub use crate::protocol::{ExtSessionLockManagerV1, ExtSessionLockSurfaceV1, ExtSessionLockV1};
pub use crate::proxy::{AnonymousObject, Interface, ProxyObject};
