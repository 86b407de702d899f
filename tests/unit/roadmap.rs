// Sort selection and the derived orderings

use chrono::{Duration, Utc};
use roadmap_backend::db::enums::RoadmapStatus;
use roadmap_backend::db::models::roadmap::{RoadmapItem, RoadmapSort};
use roadmap_backend::services::roadmap_service::order_by_popularity;
use std::collections::HashMap;
use uuid::Uuid;

#[test]
fn sort_param_selection() {
    assert_eq!(RoadmapSort::from_param(Some("recency")), RoadmapSort::Recency);
    assert_eq!(
        RoadmapSort::from_param(Some("popularity")),
        RoadmapSort::Popularity
    );
    assert_eq!(RoadmapSort::from_param(Some("status")), RoadmapSort::Status);
    assert_eq!(RoadmapSort::from_param(Some("bogus")), RoadmapSort::Recency);
    assert_eq!(RoadmapSort::from_param(None), RoadmapSort::Recency);
}

fn item(title: &str, age_secs: i64) -> RoadmapItem {
    RoadmapItem {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        status: RoadmapStatus::Planned,
        created_at: Utc::now() - Duration::seconds(age_secs),
    }
}

#[test]
fn popularity_orders_by_count_then_recency() {
    let unvoted_new = item("unvoted new", 0);
    let unvoted_old = item("unvoted old", 100);
    let popular = item("popular", 50);

    let counts: HashMap<Uuid, i64> = [(popular.id, 5)].into_iter().collect();
    let mut items = vec![unvoted_old.clone(), unvoted_new.clone(), popular.clone()];
    order_by_popularity(&mut items, &counts);

    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["popular", "unvoted new", "unvoted old"]);
}
