// Sub-modules organized by functional domain
pub mod api;
pub mod auth;
pub mod comment;
pub mod roadmap;
pub mod upvote;

pub use api::*;
pub use auth::*;
pub use comment::*;
pub use roadmap::*;
pub use upvote::*;
