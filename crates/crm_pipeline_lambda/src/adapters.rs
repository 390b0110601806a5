pub mod blocking;
pub mod lookup;
pub mod notifier;
pub mod object_store;
pub mod queue;
