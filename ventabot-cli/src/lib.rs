//! Interactive Q&A bot over a fixed product-sales catalog.
//!
//! The catalog is materialized into documents and indexed at startup; each
//! question is then answered either by a local extremum rule or by the
//! retrieval chain. The `ventabot` binary drives [`chat::ChatSession`] from
//! a rustyline read loop.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod rules;
