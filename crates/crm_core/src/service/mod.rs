//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep host/UI layers decoupled from store and export details.

pub mod crm_service;
