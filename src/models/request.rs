use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::openapi::schema::{ObjectBuilder, Schema, SchemaType};
use utoipa::openapi::RefOr;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Coffee,
    Meals,
    Outing,
    Hobby,
    Household,
    Transportation,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Coffee => "Coffee & Talks",
            Category::Meals => "Meals Together",
            Category::Outing => "Outings",
            Category::Hobby => "Hobby Activities",
            Category::Household => "Household Help",
            Category::Transportation => "Transportation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Hindi,
    Bengali,
    Tamil,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "details", rename_all = "snake_case")]
pub enum MeetingLocation {
    #[default]
    Home,
    Public,
    Online,
    Custom(String),
}

impl<'s> ToSchema<'s> for MeetingLocation {
    fn schema() -> (&'s str, RefOr<Schema>) {
        let schema = ObjectBuilder::new()
            .property(
                "kind",
                ObjectBuilder::new()
                    .schema_type(SchemaType::String)
                    .enum_values(Some(["home", "public", "online", "custom"])),
            )
            .required("kind")
            .property(
                "details",
                ObjectBuilder::new()
                    .schema_type(SchemaType::String)
                    .nullable(true)
                    .description(Some("Place description, only for `custom`")),
            )
            .into();
        ("MeetingLocation", schema)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimeWindow {
    pub from: NaiveTime,
    pub to: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Matched,
    InProgress,
    Completed,
}

impl RequestStatus {
    fn rank(self) -> u8 {
        match self {
            RequestStatus::Pending => 0,
            RequestStatus::Matched => 1,
            RequestStatus::InProgress => 2,
            RequestStatus::Completed => 3,
        }
    }

    /// Whether `self` is `other` or a later stage.
    pub fn is_at_least(self, other: RequestStatus) -> bool {
        self.rank() >= other.rank()
    }

    /// Requests only move one step forward along the lifecycle.
    pub fn can_transition_to(self, next: RequestStatus) -> bool {
        next.rank() == self.rank() + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Matched => "matched",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupportRequest {
    pub id: Uuid,
    pub category: Category,
    pub date: NaiveDate,
    pub time_window: TimeWindow,
    pub language: Option<Language>,
    #[serde(default)]
    pub location: MeetingLocation,
    pub details: Option<String>,
    #[serde(default)]
    pub reward_offered: bool,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
