//! Users Domain
//!
//! Accounts, password authentication and role management.
//!
//! - [`auth_handlers`]: `POST /auth/register`, `POST /auth/login` (public, return a JWT)
//! - [`handlers`]: `GET /users` (admin), `GET /users/profile`, `PATCH /users/{id}/role` (admin)
//!
//! Passwords are stored as Argon2 hashes only. Self-registration always
//! creates customers; the first admin comes from [`AdminSeed`].

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod seed;
pub mod service;

pub use auth_handlers::AuthApiDoc;
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{AuthResponse, LoginRequest, RegisterRequest, UpdateRole, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use seed::AdminSeed;
pub use service::UserService;
