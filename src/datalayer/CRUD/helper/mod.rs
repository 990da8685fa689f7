pub mod password;
pub mod token_generator;
