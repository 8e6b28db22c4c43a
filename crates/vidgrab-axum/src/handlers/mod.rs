//! HTTP handlers.
//!
//! Handlers are thin: they extract the request, call into `vidgrab-core`
//! and map errors through [`HttpError`](crate::error::HttpError).

pub mod download;
