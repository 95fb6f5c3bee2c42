//! Transfer server for collaborative transit maps.
//!
//! Answers: "which lines stop at each station of this map?" Stations
//! served by two or more lines are where riders can change.

pub mod cache;
pub mod config;
pub mod domain;
pub mod store;
pub mod transfers;
pub mod web;
