pub mod auth_dto;
pub mod photo_dto;
