//! # restmount
//!
//! Mounts a small REST-resource abstraction into an [`axum`] routing table.
//!
//! A *resource* is a user-defined value implementing some subset of the
//! capability traits in [`resource`] (`Lister`, `Detailer`, `Creator`,
//! `Updater`, `Deleter`, plus the collection-level bulk variants). A
//! [`mount::ResourceMount`] wires each implemented capability to its HTTP
//! verb and produces a router exposing only those verbs — capabilities the
//! resource does not implement are never registered, so the framework
//! answers them with 405/404 on its own.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── axum Router (mount)
//!     │       collection route: GET POST PUT DELETE
//!     │       item route:       GET PUT DELETE
//!     │
//!     ├── Dispatch (mount)
//!     │       RequestContext (context)
//!     │       auth check, verb tables (verb)
//!     │
//!     ├── Capability traits (resource)
//!     │       user-defined resource value
//!     │
//!     └── JSON shaping (response), errors (error)
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod mount;
pub mod resource;
pub mod response;
pub mod verb;
