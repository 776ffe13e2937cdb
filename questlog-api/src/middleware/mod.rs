/// Middleware modules for the API server
///
/// This module contains custom middleware for:
/// - Session validation (cookie-backed authentication)

pub mod session;
