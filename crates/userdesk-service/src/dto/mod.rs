//! Data Transfer Objects (DTOs).

mod token_dto;
mod user_dto;

pub use token_dto::*;
pub use user_dto::*;
