pub mod crypto;
pub mod extract;
pub mod time;
pub mod token;
pub mod validation;
