//! FIFA World Cup analyst service.
//!
//! Two read-only capabilities over immutable reference data loaded at
//! startup: retrieval-grounded question answering (`/ask`) and match
//! outcome prediction (`/predict`). The two subsystems fail independently;
//! a missing prediction model never affects retrieval.

pub mod config;
pub mod embedder;
pub mod error;
pub mod generator;
pub mod index;
pub mod predict;
pub mod rag;
pub mod routes_ask;
pub mod routes_meta;
pub mod routes_predict;
pub mod state;
