// Service module exports

pub mod bucket;
pub mod calendar_view;
pub mod database;
pub mod event;
pub mod navigation;
pub mod range;
pub mod recurrence;
pub mod settings;
