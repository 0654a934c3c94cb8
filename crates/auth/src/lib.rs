//! Credentials and the identity coordinator: token signing, password
//! hashing, code generation, outbound email and [`AuthCoordinator`].

pub mod codes;
pub mod config;
pub mod jwt;
pub mod notify;
pub mod password;
pub mod service;
pub mod templates;

pub use config::AuthConfig;
pub use jwt::{JwtConfig, TokenIssuer};
pub use service::{AuthCoordinator, AuthDeps, SignInInput, SignUpInput};
