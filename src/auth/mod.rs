//! Authentication module for the Triplan user service
//!
//! This module handles credential validation, password hashing,
//! token issuance, and session recording.

pub mod handlers;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

pub use models::{AuthResponse, LoginRequest, SignupRequest, UserResponse};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{AccessClaims, RefreshClaims, TokenIssuer};
