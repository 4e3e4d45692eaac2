pub mod config;
pub mod logging;

pub mod batch;
pub mod cache;
pub mod classify;
pub mod control;
pub mod fetch;
pub mod filename;
pub mod mapping;
pub mod page;
pub mod pipeline;
pub mod politeness;
pub mod record;
pub mod strategy;

#[cfg(test)]
pub(crate) mod testing;
