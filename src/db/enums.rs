use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Lifecycle status of a roadmap item. Stored as text; the wire values sort
/// alphabetically, which is what the `status` sort mode relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl RoadmapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadmapStatus::Planned => "planned",
            RoadmapStatus::InProgress => "in_progress",
            RoadmapStatus::Completed => "completed",
            RoadmapStatus::Cancelled => "cancelled",
        }
    }
}

impl FromSql<Text, Pg> for RoadmapStatus {
    fn from_sql(bytes: <Pg as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "planned" => Ok(RoadmapStatus::Planned),
            "in_progress" => Ok(RoadmapStatus::InProgress),
            "completed" => Ok(RoadmapStatus::Completed),
            "cancelled" => Ok(RoadmapStatus::Cancelled),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl ToSql<Text, Pg> for RoadmapStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}
