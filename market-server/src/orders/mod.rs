//! Orders - the order engine, status transitions, delivery assignment and
//! money helpers

pub mod assignment;
pub mod engine;
pub mod money;
pub mod transitions;

pub use assignment::DeliveryAssigner;
pub use engine::{
    CreateOrderRequest, CreatedOrder, OrderEngine, OrderItemRequest, ProcessOrderRequest,
};
