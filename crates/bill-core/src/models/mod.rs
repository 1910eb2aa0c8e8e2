//! Data models shared by both entry paths and the renderers.

pub mod config;
pub mod invoice;
