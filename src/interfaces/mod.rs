// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod clock;
mod event_handler;
mod order_store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use event_handler::{
    EventHandler, ExchangeEvent, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
};
pub use order_store::{InMemoryOrderStore, OrderStore};
