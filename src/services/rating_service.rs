use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::rating::{RatingRecord, RatingSummary, MAX_RATING, MIN_RATING};
use crate::models::session::SessionResult;
use crate::storage::{load_list, save_list, SharedStore, RATINGS_KEY};
use crate::utils::time;

#[derive(Clone)]
pub struct RatingService {
    store: SharedStore,
    write_lock: Arc<Mutex<()>>,
}

impl RatingService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn submit(
        &self,
        result: &SessionResult,
        rating: u8,
        review: Option<String>,
    ) -> Result<RatingRecord> {
        if rating == 0 {
            return Err(Error::BadRequest("Please provide a rating".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(Error::BadRequest(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let _guard = self.write_lock.lock().await;
        let mut ratings: Vec<RatingRecord> = load_list(self.store.as_ref(), RATINGS_KEY).await?;
        if ratings.iter().any(|r| r.session_id == result.session_id) {
            return Err(Error::Conflict(format!(
                "Session {} has already been rated",
                result.session_id
            )));
        }

        let record = RatingRecord {
            id: Uuid::new_v4(),
            session_id: result.session_id,
            supporter_id: result.supporter_id,
            rating,
            review: review.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()),
            mode: result.mode,
            date: time::now(),
        };
        ratings.push(record.clone());
        save_list(self.store.as_ref(), RATINGS_KEY, &ratings).await?;

        tracing::info!(
            session_id = %record.session_id,
            supporter_id = %record.supporter_id,
            rating,
            "Rating recorded"
        );
        Ok(record)
    }

    /// Ratings in submission order.
    pub async fn list(&self) -> Result<Vec<RatingRecord>> {
        load_list(self.store.as_ref(), RATINGS_KEY).await
    }

    pub async fn summary_for(&self, supporter_id: Uuid) -> Result<RatingSummary> {
        let ratings = self.list().await?;
        let mut distribution = [0usize; 5];
        let mut sum = 0u32;
        let mut total = 0usize;
        for r in ratings.iter().filter(|r| r.supporter_id == supporter_id) {
            if let Some(slot) = distribution.get_mut(usize::from(r.rating).wrapping_sub(1)) {
                *slot += 1;
                sum += u32::from(r.rating);
                total += 1;
            }
        }
        Ok(RatingSummary {
            supporter_id,
            average_rating: (total > 0).then(|| round_tenth(f64::from(sum) / total as f64)),
            total_ratings: total,
            distribution,
        })
    }
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
