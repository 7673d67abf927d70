//! Live departure board for the terminal.
//!
//! Shows the next public-transport departures from the station nearest
//! to a configured (or detected) location, refreshed in the background
//! and redrawn once a second.
//!
//! The pipeline is: [`config`] resolves a location, a
//! [`locator::LocationProvider`] hands it to the [`buffer`], which uses a
//! [`transport::TransitLookup`] to fetch departures. The [`scheduler`]
//! keeps the buffer fresh while [`ui`] renders it.

pub mod buffer;
pub mod config;
pub mod domain;
pub mod locator;
pub mod scheduler;
pub mod transport;
pub mod ui;
