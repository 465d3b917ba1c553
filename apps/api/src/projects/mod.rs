//! Project and time tracking CRUD.

pub mod handlers;
