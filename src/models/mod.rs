pub mod candidate;
pub mod rating;
pub mod request;
pub mod session;
pub mod supporter;
pub mod user;
