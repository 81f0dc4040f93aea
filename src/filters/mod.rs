//! Address filtering
//!
//! Allow-lists for tracked wallets and swap routers, compiled in as
//! defaults and overridable from the CLI/env at startup.
//!
//! Created: 2026-10-19

pub mod address_list;

pub use address_list::{is_known_address, AddressList, DEFAULT_ROUTER, DEFAULT_TRACKED};
