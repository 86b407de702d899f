// Depth-bounded serialization exercised through the public API

use chrono::Utc;
use roadmap_backend::db::models::auth::User;
use roadmap_backend::db::models::comment::Comment;
use roadmap_backend::services::comment_tree::{
    MAX_REPLY_DEPTH, build_forest, nesting_level, serialize_one,
};
use uuid::Uuid;

fn user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{}@example.com", name),
        password_hash: "x".to_string(),
        created_at: Utc::now(),
    }
}

fn comment(author: &User, item: Uuid, parent: Option<Uuid>, content: &str) -> Comment {
    let ts = Utc::now();
    Comment {
        id: Uuid::new_v4(),
        roadmap_item_id: item,
        user_id: author.id,
        content: content.to_string(),
        parent_id: parent,
        created_at: ts,
        updated_at: ts,
    }
}

#[test]
fn reply_chain_serializes_to_the_depth_limit() {
    let author = user("alice");
    let item = Uuid::new_v4();

    // chain one longer than the serialization depth
    let c0 = comment(&author, item, None, "c0");
    let c1 = comment(&author, item, Some(c0.id), "c1");
    let c2 = comment(&author, item, Some(c1.id), "c2");
    let c3 = comment(&author, item, Some(c2.id), "c3");

    assert_eq!(nesting_level(
        &[
            (c0.clone(), author.clone()),
            (c1.clone(), author.clone()),
            (c2.clone(), author.clone()),
            (c3.clone(), author.clone()),
        ],
        c2.id,
    ), MAX_REPLY_DEPTH);

    let rows = vec![
        (c0.clone(), author.clone()),
        (c1.clone(), author.clone()),
        (c2.clone(), author.clone()),
        (c3, author.clone()),
    ];

    let forest = build_forest(&rows, Some(author.id));
    assert_eq!(forest.len(), 1);
    let level1 = &forest[0].replies[0];
    let level2 = &level1.replies[0];
    assert_eq!(level2.content, "c2");
    assert_eq!(level2.nesting_level, 2);
    // c3 exists in storage but never serializes
    assert!(level2.replies.is_empty());
}

#[test]
fn serialize_one_keeps_item_scoped_depth() {
    let alice = user("alice");
    let bob = user("bob");
    let item = Uuid::new_v4();

    let root = comment(&alice, item, None, "root");
    let reply = comment(&bob, item, Some(root.id), "reply");
    let rows = vec![(root, alice.clone()), (reply.clone(), bob.clone())];

    let node = serialize_one(&rows, Some(bob.id), reply.id).unwrap();
    assert_eq!(node.nesting_level, 1);
    assert_eq!(node.roadmap_item, item);
    assert!(node.can_edit);

    let as_alice = serialize_one(&rows, Some(alice.id), reply.id).unwrap();
    assert!(!as_alice.can_edit);
}
