use typed_bus::{message, Message, Supertype};

pub struct FakeMessage;

pub struct AnotherFakeMessage {
    pub id: i32,
}

/// Capability shared by the order messages.
pub trait OrderEvent: Message {
    fn order_id(&self) -> u64;
}

pub struct OrderPlaced {
    pub order_id: u64,
}

pub struct OrderShipped {
    pub order_id: u64,
    pub header: Header,
}

/// Envelope data embedded in some messages.
pub struct Header {
    pub correlation_id: &'static str,
}

impl OrderEvent for OrderPlaced {
    fn order_id(&self) -> u64 {
        self.order_id
    }
}

impl OrderEvent for OrderShipped {
    fn order_id(&self) -> u64 {
        self.order_id
    }
}

message!(FakeMessage, AnotherFakeMessage);
message!(OrderPlaced: dyn OrderEvent);

impl Message for OrderShipped {
    fn supertypes() -> Vec<Supertype> {
        vec![
            Supertype::of::<OrderShipped, dyn OrderEvent>(|shipped| shipped),
            Supertype::of::<OrderShipped, Header>(|shipped| &shipped.header),
        ]
    }
}
