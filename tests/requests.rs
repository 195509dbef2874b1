mod helpers;

use helpers::{bound_manager, MockRegistry, MockTransport, MANAGER_GLOBAL};

use wayland_session_lock::wire::Argument;
use wayland_session_lock::{
    AnonymousObject, BindError, Context, ExtSessionLockManagerV1, ProxyObject,
};

#[test]
fn bind_registers_the_manager_and_binds_the_global() {
    let transport = MockTransport::new();
    let ctx = Context::new(transport.clone());
    let registry = MockRegistry::new();

    let manager = ExtSessionLockManagerV1::bind(&registry, &ctx, MANAGER_GLOBAL, 1).unwrap();

    assert_eq!(manager.id(), 1);
    assert_eq!(manager.version(), 1);
    assert!(manager.is_alive());
    assert_eq!(
        registry.binds.lock().unwrap().as_slice(),
        &[(MANAGER_GLOBAL, "ext_session_lock_manager_v1", 1, 1)]
    );
    // binding goes through the registry, not the request path
    assert_eq!(transport.sent_count(), 0);
}

#[test]
fn bind_rejects_unsupported_versions() {
    let transport = MockTransport::new();
    let ctx = Context::new(transport);
    let registry = MockRegistry::new();

    for version in [0u32, 2, 42] {
        match ExtSessionLockManagerV1::bind(&registry, &ctx, MANAGER_GLOBAL, version) {
            Err(BindError::UnsupportedVersion {
                interface,
                requested,
                supported,
            }) => {
                assert_eq!(interface, "ext_session_lock_manager_v1");
                assert_eq!(requested, version);
                assert_eq!(supported, 1);
            }
            _ => panic!("bind at version {} should have been rejected", version),
        }
    }
    assert!(registry.binds.lock().unwrap().is_empty());
    // nothing was registered either
    assert!(ctx.find(1).is_none());
}

#[test]
fn failed_bind_rolls_the_registration_back() {
    let transport = MockTransport::new();
    let ctx = Context::new(transport);
    let registry = MockRegistry::new();
    registry.set_failing(true);

    match ExtSessionLockManagerV1::bind(&registry, &ctx, MANAGER_GLOBAL, 1) {
        Err(BindError::Transport(_)) => {}
        _ => panic!("bind should have propagated the transport error"),
    }
    assert!(ctx.find(1).is_none());
    // the freed id is available again
    let anon = AnonymousObject::register(&ctx, "wl_surface", 6);
    assert_eq!(anon.id(), 1);
}

#[test]
fn manager_requests_use_the_protocol_opcodes() {
    let (transport, _ctx, manager) = bound_manager();
    let manager_id = manager.id();

    let lock = manager.lock().unwrap();
    manager.destroy().unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].sender_id, manager_id);
    assert_eq!(sent[0].opcode, 1);
    assert_eq!(sent[0].args.as_slice(), &[Argument::NewId(lock.id())]);
    assert_eq!(sent[1].sender_id, manager_id);
    assert_eq!(sent[1].opcode, 0);
    assert!(sent[1].args.is_empty());
}

#[test]
fn lock_requests_use_the_protocol_opcodes_and_argument_order() {
    let (transport, ctx, manager) = bound_manager();
    let lock = manager.lock().unwrap();
    let surface = AnonymousObject::register(&ctx, "wl_surface", 6);
    let output = AnonymousObject::register(&ctx, "wl_output", 4);
    transport.take();

    let lock_surface = lock.get_lock_surface(&*surface, &*output).unwrap();
    let msg = transport.last();
    assert_eq!(msg.sender_id, lock.id());
    assert_eq!(msg.opcode, 1);
    // new id first, then surface, then output
    assert_eq!(
        msg.args.as_slice(),
        &[
            Argument::NewId(lock_surface.id()),
            Argument::Object(surface.id()),
            Argument::Object(output.id()),
        ]
    );

    lock.unlock_and_destroy().unwrap();
    let msg = transport.last();
    assert_eq!(msg.opcode, 2);
    assert!(msg.args.is_empty());
}

#[test]
fn lock_surface_requests_use_the_protocol_opcodes() {
    let (transport, ctx, manager) = bound_manager();
    let lock = manager.lock().unwrap();
    let surface = AnonymousObject::register(&ctx, "wl_surface", 6);
    let output = AnonymousObject::register(&ctx, "wl_output", 4);
    let lock_surface = lock.get_lock_surface(&*surface, &*output).unwrap();
    transport.take();

    lock_surface.ack_configure(7).unwrap();
    let msg = transport.last();
    assert_eq!(msg.sender_id, lock_surface.id());
    assert_eq!(msg.opcode, 1);
    assert_eq!(msg.args.as_slice(), &[Argument::Uint(7)]);

    let id = lock_surface.id();
    lock_surface.destroy().unwrap();
    let msg = transport.last();
    assert_eq!(msg.sender_id, id);
    assert_eq!(msg.opcode, 0);
    assert!(msg.args.is_empty());
}

#[test]
fn created_proxies_get_distinct_fresh_ids() {
    let (_transport, ctx, manager) = bound_manager();
    let lock = manager.lock().unwrap();
    let surface_a = AnonymousObject::register(&ctx, "wl_surface", 6);
    let output_a = AnonymousObject::register(&ctx, "wl_output", 4);
    let surface_b = AnonymousObject::register(&ctx, "wl_surface", 6);
    let output_b = AnonymousObject::register(&ctx, "wl_output", 4);

    let ls_a = lock.get_lock_surface(&*surface_a, &*output_a).unwrap();
    let ls_b = lock.get_lock_surface(&*surface_b, &*output_b).unwrap();

    let mut ids = vec![
        manager.id(),
        lock.id(),
        surface_a.id(),
        output_a.id(),
        surface_b.id(),
        output_b.id(),
        ls_a.id(),
        ls_b.id(),
    ];
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8, "all live objects must have distinct ids");
}
