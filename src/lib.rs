//! Server-side primary selection (middle-click paste) broker for Wayland
//! compositors.
//!
//! This crate implements the object lifecycle and state machine of the
//! `zwp_primary_selection_device_manager_v1` protocol family: sources,
//! devices, offers, and the controller that holds the single current
//! selection. The host runtime owns the transport; it dispatches requests to
//! the objects created here and drains the per-client event queues.

#[macro_use]
mod macros;

pub mod client;
pub mod globals;
pub mod ifs;
pub mod object;
pub mod state;
pub mod utils;
pub mod wire;
