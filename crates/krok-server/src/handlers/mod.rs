//! HTTP handler modules for the Krok API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire a
//! store, run one repository call, and return JSON responses.

pub mod flows;
pub mod graph;
pub mod health;
pub mod nodes;
pub mod openapi;
