pub mod event;
pub mod events_builder;
pub mod token;
