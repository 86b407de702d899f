pub mod auth;
pub mod comment;
pub mod requests;
pub mod roadmap;
