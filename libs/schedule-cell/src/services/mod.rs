pub mod calendar;
pub mod slot_store;
pub mod matcher;
pub mod propagation;
pub mod summary;

pub use matcher::{BookingSelection, ProviderDirectory};
pub use slot_store::{SlotDraft, SlotStore};
