//! Seeds the roadmap catalog with a starting set of items. Safe to re-run;
//! items whose title already exists are skipped.

use diesel::prelude::*;
use roadmap_backend::{
    config::Config,
    db::enums::RoadmapStatus,
    db::models::roadmap::NewRoadmapItem,
    db::repositories::roadmap_items::RoadmapItemRepo,
    init_tracing,
};

fn seed_items() -> Vec<NewRoadmapItem> {
    vec![
        NewRoadmapItem {
            title: "Dark mode".to_string(),
            description: "A dark color scheme for the whole application, following the \
                          system preference by default."
                .to_string(),
            status: RoadmapStatus::InProgress,
        },
        NewRoadmapItem {
            title: "Email notifications".to_string(),
            description: "Notify users by email when someone replies to their comment."
                .to_string(),
            status: RoadmapStatus::Planned,
        },
        NewRoadmapItem {
            title: "Public API".to_string(),
            description: "A documented read-only API for the roadmap catalog.".to_string(),
            status: RoadmapStatus::Planned,
        },
        NewRoadmapItem {
            title: "CSV export".to_string(),
            description: "Export the full roadmap with upvote counts to CSV.".to_string(),
            status: RoadmapStatus::Completed,
        },
        NewRoadmapItem {
            title: "Mobile apps".to_string(),
            description: "Native iOS and Android clients.".to_string(),
            status: RoadmapStatus::Cancelled,
        },
    ]
}

fn title_exists(conn: &mut PgConnection, wanted: &str) -> Result<bool, diesel::result::Error> {
    use roadmap_backend::schema::roadmap_items::dsl::*;
    diesel::select(diesel::dsl::exists(
        roadmap_items.filter(title.eq(wanted)),
    ))
    .get_result(conn)
}

fn main() {
    let config = Config::from_env().expect("Failed to load configuration");
    init_tracing(&config);

    let mut conn =
        PgConnection::establish(&config.database_url).expect("Failed to connect to database");

    let mut created = 0;
    for item in seed_items() {
        let exists = title_exists(&mut conn, &item.title).expect("Failed to query roadmap items");
        if exists {
            tracing::info!(title = %item.title, "already present, skipping");
            continue;
        }

        let inserted =
            RoadmapItemRepo::insert(&mut conn, &item).expect("Failed to insert roadmap item");
        tracing::info!(title = %inserted.title, id = %inserted.id, "seeded roadmap item");
        created += 1;
    }

    tracing::info!(created, "seeding complete");
}
