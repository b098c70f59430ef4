//! Observable primitives shared by every process-wide store.
//!
//! # Responsibility
//! - Provide a subscriber registry with synchronous, ordered fan-out.
//! - Provide a value cell that notifies subscribers on every mutation.
//!
//! # Invariants
//! - Delivery order equals registration order.
//! - A notify pass only covers listeners registered before the pass started.
//! - One faulty listener never starves the remaining listeners.

pub mod cell;
pub mod dispatch;

pub use cell::ObservableCell;
pub use dispatch::{Dispatcher, Listener, Subscription};
