use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::roadmap::{NewRoadmapItem, RoadmapItem, RoadmapSort};

pub struct RoadmapItemRepo;

impl RoadmapItemRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        item_id: Uuid,
    ) -> Result<Option<RoadmapItem>, diesel::result::Error> {
        use crate::schema::roadmap_items::dsl::*;
        roadmap_items
            .filter(id.eq(item_id))
            .select(RoadmapItem::as_select())
            .first(conn)
            .optional()
    }

    /// Recency and status ordering happen in the query; popularity needs the
    /// aggregate upvote counts and is applied by the service on top of the
    /// recency ordering.
    pub fn list(
        conn: &mut PgConnection,
        sort: RoadmapSort,
    ) -> Result<Vec<RoadmapItem>, diesel::result::Error> {
        use crate::schema::roadmap_items::dsl::*;
        let query = roadmap_items
            .select(RoadmapItem::as_select())
            .into_boxed();
        let query = match sort {
            RoadmapSort::Status => query.order((status.asc(), created_at.desc())),
            RoadmapSort::Recency | RoadmapSort::Popularity => query.order(created_at.desc()),
        };
        query.load(conn)
    }

    pub fn insert(
        conn: &mut PgConnection,
        new_item: &NewRoadmapItem,
    ) -> Result<RoadmapItem, diesel::result::Error> {
        diesel::insert_into(crate::schema::roadmap_items::table)
            .values(new_item)
            .get_result(conn)
    }
}
