//! # post-gateway
//!
//! REST backend for the post lifecycle of a small content-management
//! system. Authors submit, edit, publish, and delete short-form posts;
//! readers retrieve published posts.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── PostService (service/)       validation, state machine, error mapping
//!     │
//!     ├── PostStore (persistence/)     single owner of the `posts` relation
//!     │     ├── PostgresPostStore (sqlx::PgPool)
//!     │     └── InMemoryPostStore
//!     │
//!     └── PostgreSQL
//! ```
//!
//! A post is created either as a draft or directly as published. A draft
//! becomes published through a one-way transition, and a post in either
//! state can be deleted permanently.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
