use uuid::Uuid;
use validator::Validate;

use crate::dto::profile_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::models::rating::RatingRecord;
use crate::models::request::{RequestStatus, SupportRequest};
use crate::models::user::{ProfileStats, UserProfile};
use crate::services::rating_service::round_tenth;
use crate::storage::{
    load_list, load_object, save_object, SharedStore, RATINGS_KEY, REQUESTS_KEY, USER_KEY,
};
use crate::utils::time;
use crate::utils::validation::{ensure_mobile, ensure_present};

#[derive(Clone)]
pub struct ProfileService {
    store: SharedStore,
}

impl ProfileService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stores the installation's profile, replacing any previous one.
    pub async fn register(&self, payload: RegisterPayload) -> Result<UserProfile> {
        let name = payload.name.trim().to_string();
        ensure_present(&[
            ("name", !name.is_empty()),
            ("mobile", !payload.mobile.trim().is_empty()),
        ])?;
        payload.validate()?;
        ensure_mobile(&payload.mobile)?;
        if !payload.agreed_to_terms {
            return Err(Error::BadRequest(
                "Please accept the terms and conditions".to_string(),
            ));
        }
        if let Some(aadhaar) = &payload.aadhaar {
            if !aadhaar.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::BadRequest(
                    "Aadhaar number must have 12 digits".to_string(),
                ));
            }
        }

        let existing: Option<UserProfile> = load_object(self.store.as_ref(), USER_KEY).await?;
        let profile = UserProfile {
            id: existing.as_ref().map(|p| p.id).unwrap_or_else(Uuid::new_v4),
            name,
            age: payload.age,
            gender: non_blank(payload.gender),
            mobile: payload.mobile,
            address: non_blank(payload.address),
            aadhaar: payload.aadhaar,
            language: payload.language,
            interests: non_blank(payload.interests),
            mental_health_assessment: non_blank(payload.mental_health_assessment),
            agreed_to_terms: true,
            registered_at: existing
                .map(|p| p.registered_at)
                .unwrap_or_else(time::now),
        };
        save_object(self.store.as_ref(), USER_KEY, &profile).await?;

        tracing::info!(profile_id = %profile.id, "Profile registered");
        Ok(profile)
    }

    pub async fn get(&self) -> Result<UserProfile> {
        load_object(self.store.as_ref(), USER_KEY)
            .await?
            .ok_or_else(|| Error::NotFound("No profile registered".to_string()))
    }

    pub async fn stats(&self) -> Result<ProfileStats> {
        let requests: Vec<SupportRequest> = load_list(self.store.as_ref(), REQUESTS_KEY).await?;
        let ratings: Vec<RatingRecord> = load_list(self.store.as_ref(), RATINGS_KEY).await?;

        let average_rating_given = if ratings.is_empty() {
            None
        } else {
            let sum: u32 = ratings.iter().map(|r| u32::from(r.rating)).sum();
            Some(round_tenth(f64::from(sum) / ratings.len() as f64))
        };

        Ok(ProfileStats {
            requests_made: requests.len(),
            sessions_completed: requests
                .iter()
                .filter(|r| r.status == RequestStatus::Completed)
                .count(),
            ratings_given: ratings.len(),
            average_rating_given,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
