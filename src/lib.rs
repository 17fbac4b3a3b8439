//! Lead Intake Client Library
//!
//! This library provides the core of a session-resident lead-intake client:
//! the in-progress draft and its validation, the consent gate, the
//! single-flight submission state machine, and the ordered collection of
//! scored leads with its one-shot startup load. Scoring itself is an opaque
//! remote HTTP service.
//!
//! # Modules
//!
//! - `collection`: Append-only scored-lead collection and display rows.
//! - `config`: Configuration management.
//! - `consent`: Consent gate.
//! - `draft`: In-progress lead draft and field validation.
//! - `errors`: Error handling types.
//! - `models`: Core data models and wire types.
//! - `scoring_client`: Scoring service HTTP client.
//! - `session`: Submission state machine and session orchestration.

pub mod collection;
pub mod config;
pub mod consent;
pub mod draft;
pub mod errors;
pub mod models;
pub mod scoring_client;
pub mod session;
