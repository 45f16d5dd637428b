//! Shared helpers for update check integration tests

#![allow(dead_code)]

mod server;

pub use server::*;
