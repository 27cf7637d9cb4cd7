pub mod registration;
pub mod resolver;

pub use registration::RegistrationService;
pub use resolver::{IdentityProvider, IdentityResolver};
