pub mod auth_dto;
pub mod candidate_dto;
pub mod profile_dto;
pub mod rating_dto;
pub mod request_dto;
pub mod session_dto;
