//! Domain types for the departure dashboard.
//!
//! These are plain immutable values shared by every layer: the
//! configuration chain produces a [`Location`], the transit client turns
//! board entries into [`Connection`]s, and the dashboard renders them.

mod connection;
mod location;

pub use connection::Connection;
pub use location::Location;
