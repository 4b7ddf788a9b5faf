pub mod config_dto;
pub mod response;
