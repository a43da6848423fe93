pub mod auth_service;
pub mod matcher_service;
pub mod profile_service;
pub mod rating_service;
pub mod request_service;
pub mod session_service;
