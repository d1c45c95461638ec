//! Message bus integration tests.
//!
//! Covers delivery, covariant dispatch, unsubscribe identity, the close
//! lifecycle and argument validation through the public `Bus` contract.

mod messages;

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use messages::{AnotherFakeMessage, FakeMessage, Header, OrderEvent, OrderPlaced, OrderShipped};
use typed_bus::{Bus, BusError, Handler, Message, MessageBus};

fn flag() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

fn set(flag: &Arc<AtomicBool>) -> impl Fn() + Send + Sync + 'static {
    let flag = Arc::clone(flag);
    move || flag.store(true, Ordering::SeqCst)
}

fn was_set(flag: &Arc<AtomicBool>) -> bool {
    flag.load(Ordering::SeqCst)
}

#[test]
fn should_call_handler_on_registered_message() {
    let bus = MessageBus::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    bus.subscribe::<FakeMessage>(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    bus.send(FakeMessage).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn should_not_call_handler_when_message_is_not_registered() {
    let bus = MessageBus::new();
    let called = flag();
    bus.subscribe::<AnotherFakeMessage>(set(&called));

    bus.send(FakeMessage).unwrap();

    assert!(!was_set(&called));
}

#[test]
fn should_pass_in_the_message() {
    let bus = MessageBus::new();
    let id = Arc::new(AtomicI32::new(0));
    let seen = Arc::clone(&id);
    bus.subscribe_with::<AnotherFakeMessage>(move |message| seen.store(message.id, Ordering::SeqCst));

    bus.send(AnotherFakeMessage { id: 3 }).unwrap();

    assert_eq!(id.load(Ordering::SeqCst), 3);
}

#[test]
fn should_be_covariant() {
    let bus = MessageBus::new();
    let base_called = flag();
    let sub_called = flag();
    bus.subscribe::<dyn Message>(set(&base_called));
    bus.subscribe::<AnotherFakeMessage>(set(&sub_called));

    bus.send(FakeMessage).unwrap();

    assert!(was_set(&base_called));
    assert!(!was_set(&sub_called));
}

#[test]
fn should_close_message_bus_and_stay_closed() {
    let bus = MessageBus::new();
    let called = flag();
    let subscribed_after_close = flag();
    bus.subscribe::<FakeMessage>(set(&called));
    bus.close();
    bus.subscribe::<FakeMessage>(set(&subscribed_after_close));

    bus.send(FakeMessage).unwrap();

    assert!(!was_set(&called));
    assert!(!was_set(&subscribed_after_close));
}

#[test]
fn should_fail_when_sending_no_message() {
    let bus = MessageBus::new();

    let err = bus.try_send::<FakeMessage>(None).unwrap_err();

    assert_eq!(err, BusError::NullMessage { parameter: "message" });
    assert_eq!(err.parameter(), Some("message"));
}

#[test]
fn null_message_is_rejected_even_when_closed() {
    let bus = MessageBus::new();
    bus.close();

    assert!(matches!(
        bus.try_send::<FakeMessage>(None),
        Err(BusError::NullMessage { .. })
    ));
    assert!(bus.try_send(Some(FakeMessage)).is_ok());
}

#[test]
fn should_fail_when_unsubscribing_no_handler() {
    let bus = MessageBus::new();

    let err = bus.try_unsubscribe::<FakeMessage>(None).unwrap_err();

    assert_eq!(err, BusError::NullHandler { parameter: "handler" });
}

#[test]
fn unsubscribed_handler_is_not_called() {
    let bus = MessageBus::new();
    let called = flag();
    let handler = bus.subscribe::<FakeMessage>(set(&called));

    bus.try_unsubscribe(Some(&handler)).unwrap();
    bus.send(FakeMessage).unwrap();

    assert!(!was_set(&called));
}

#[test]
fn unsubscribing_a_never_subscribed_handler_does_not_fail() {
    let bus = MessageBus::new();
    let stranger = Handler::<FakeMessage>::with_message(|_| {});

    bus.unsubscribe(&stranger);
    assert!(bus.try_unsubscribe(Some(&stranger)).is_ok());
}

#[test]
fn unsubscribe_matches_the_declared_type() {
    let bus = MessageBus::new();
    let called = flag();
    let handler = Handler::<dyn Message>::new(set(&called));
    bus.subscribe_handler(&handler);

    // A handler declared for another type removes nothing.
    bus.unsubscribe(&Handler::<FakeMessage>::new(set(&called)));
    bus.send(FakeMessage).unwrap();
    assert!(was_set(&called));

    bus.unsubscribe(&handler);
    assert!(bus.is_empty());
}

#[test]
fn trait_handlers_receive_every_implementor() {
    let bus = MessageBus::new();
    let ids = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&ids);
    bus.subscribe_with::<dyn OrderEvent>(move |event| sink.lock().unwrap().push(event.order_id()));

    bus.send(OrderPlaced { order_id: 1 }).unwrap();
    bus.send(OrderShipped {
        order_id: 2,
        header: Header {
            correlation_id: "c-2",
        },
    })
    .unwrap();
    bus.send(FakeMessage).unwrap();

    assert_eq!(*ids.lock().unwrap(), vec![1, 2]);
}

#[test]
fn subtype_handlers_do_not_receive_sibling_messages() {
    let bus = MessageBus::new();
    let shipped_called = flag();
    bus.subscribe::<OrderShipped>(set(&shipped_called));

    bus.send(OrderPlaced { order_id: 1 }).unwrap();

    assert!(!was_set(&shipped_called));
}

#[test]
fn embedded_supertypes_receive_their_view() {
    let bus = MessageBus::new();
    let correlation = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&correlation);
    bus.subscribe_with::<Header>(move |header| *sink.lock().unwrap() = Some(header.correlation_id));

    bus.send(OrderShipped {
        order_id: 7,
        header: Header {
            correlation_id: "c-7",
        },
    })
    .unwrap();

    assert_eq!(*correlation.lock().unwrap(), Some("c-7"));
}

#[test]
fn delivery_runs_from_most_specific_to_root() {
    let bus = MessageBus::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    let record = |label: &'static str| {
        let order = Arc::clone(&order);
        move || order.lock().unwrap().push(label)
    };

    bus.subscribe::<dyn Message>(record("message"));
    bus.subscribe::<dyn OrderEvent>(record("order-1"));
    bus.subscribe::<OrderPlaced>(record("placed"));
    bus.subscribe::<dyn OrderEvent>(record("order-2"));

    bus.send(OrderPlaced { order_id: 1 }).unwrap();

    assert_eq!(
        *order.lock().unwrap(),
        vec!["placed", "order-1", "order-2", "message"]
    );
}

#[test]
fn root_handlers_can_inspect_the_concrete_message() {
    let bus = MessageBus::new();
    let ids = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&ids);
    bus.subscribe_with::<dyn Message>(move |message| {
        if let Some(another) = message.downcast_ref::<AnotherFakeMessage>() {
            sink.lock().unwrap().push(another.id);
        }
    });

    bus.send(FakeMessage).unwrap();
    bus.send(AnotherFakeMessage { id: 5 }).unwrap();

    assert_eq!(*ids.lock().unwrap(), vec![5]);
}

#[test]
fn handler_unsubscribing_itself_still_completes_the_send() {
    let bus = Arc::new(MessageBus::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<Handler<FakeMessage>>>> = Arc::new(Mutex::new(None));

    let handler = {
        let (bus, calls, slot) = (Arc::clone(&bus), Arc::clone(&calls), Arc::clone(&slot));
        Handler::<FakeMessage>::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            if let Some(me) = slot.lock().unwrap().take() {
                bus.unsubscribe(&me);
            }
        })
    };
    *slot.lock().unwrap() = Some(handler.clone());
    bus.subscribe_handler(&handler);
    bus.subscribe_handler(&handler);

    // Both registrations were matched before the first one removed itself.
    bus.send(FakeMessage).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(bus.handler_count::<FakeMessage>(), 1);

    bus.send(FakeMessage).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn close_from_a_handler_spares_the_message_in_flight() {
    let bus = Arc::new(MessageBus::new());
    let second_called = flag();

    let closer = Arc::clone(&bus);
    bus.subscribe::<FakeMessage>(move || closer.close());
    bus.subscribe::<FakeMessage>(set(&second_called));

    bus.send(FakeMessage).unwrap();

    assert!(was_set(&second_called));
    assert!(bus.is_closed());
    assert!(bus.is_empty());
}

#[test]
fn bus_can_be_shared_across_threads() {
    let bus = Arc::new(MessageBus::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    bus.subscribe::<FakeMessage>(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let senders: Vec<_> = (0..4)
        .map(|_| {
            let bus = Arc::clone(&bus);
            std::thread::spawn(move || {
                for _ in 0..25 {
                    bus.send(FakeMessage).unwrap();
                }
            })
        })
        .collect();
    for sender in senders {
        sender.join().unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 100);
}
