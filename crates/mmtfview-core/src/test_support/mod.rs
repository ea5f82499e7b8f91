//! Builders for encoded columns and synthetic containers used across unit tests.

pub(crate) mod columns;
pub(crate) mod counting;
pub(crate) mod fixtures;
pub(crate) mod msgpack;
