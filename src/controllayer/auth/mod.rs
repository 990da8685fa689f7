pub mod credentials;
pub mod sessions;

pub use credentials::register;
pub use sessions::{authenticate, bearer_token, resolve};
