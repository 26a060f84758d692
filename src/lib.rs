//! Domain and data-access layer for a role-based mentorship programme:
//! identity and sessions, role-shaped users, mentor/mentee management,
//! assignments and submissions, meetings, messaging, points, progress
//! records, feedback, meeting-cadence warnings and bulk CSV import.
//!
//! [`service::DomainService`] is the single entry point for callers;
//! everything below it (repositories, entities, the identity adapter)
//! is public mainly for tests and for embedding in a transport layer.

pub mod config;
pub mod entities;
pub mod error;
pub mod identity;
pub mod import;
pub mod media;
pub mod repositories;
pub mod resolver;
pub mod service;
pub mod static_service;
pub mod utils;
pub mod warnings;

pub use error::{ServiceError, ServiceResult};
pub use resolver::AppUser;
pub use service::DomainService;
