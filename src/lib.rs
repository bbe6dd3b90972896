//! Admin and dashboard client for the vport door access-control server.
//!
//! The library holds the user-list, password, tag and door flows behind
//! small view and API traits; the `vport` binary drives them from a
//! terminal.

pub mod config;
pub mod controller;
pub mod net;
pub mod state;
pub mod terminal;
pub mod view;
