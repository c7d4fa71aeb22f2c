//! HTTP shell over `qna_core`.
//!
//! # Responsibility
//! - Map REST endpoints to domain service operations.
//! - Translate domain outcomes into status codes and JSON bodies.

pub mod handlers;
pub mod rejections;
pub mod routes;

pub use handlers::Db;
