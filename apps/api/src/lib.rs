//! Line-clamp text truncation: fits content into a fixed number of lines of a
//! given width, ending the last line with an ellipsis when content is cut.
//!
//! The `layout` module is the in-process engine. `routes` exposes it over HTTP.

pub mod config;
pub mod errors;
pub mod layout;
pub mod routes;
pub mod state;
