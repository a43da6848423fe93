pub mod extract;
pub mod scheduler;
pub mod time;
pub mod token;
pub mod validation;
