// Module exports for models

pub mod error;
pub mod event;
pub mod recurrence;
pub mod settings;
pub mod view;
