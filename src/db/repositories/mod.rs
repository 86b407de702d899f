pub mod auth;
pub mod comments;
pub mod roadmap_items;
pub mod upvotes;
