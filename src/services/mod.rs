pub mod comment_tree;
pub mod comments_service;
pub mod context;
pub mod roadmap_service;
pub mod upvotes_service;
