pub mod access_jwt;
pub mod credential;
pub mod error;
pub mod factory;
pub mod principal;
pub mod service;

#[cfg(test)]
pub mod test_support;

pub use error::AuthError;
pub use factory::build_auth_service;
pub use principal::{Principal, Role};
pub use service::AuthService;
