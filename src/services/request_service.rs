use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use crate::dto::request_dto::{CreateRequestPayload, LocationChoice};
use crate::error::{Error, Result};
use crate::models::request::{
    Category, MeetingLocation, RequestStatus, SupportRequest, TimeWindow,
};
use crate::storage::{load_list, save_list, SharedStore, REQUESTS_KEY};
use crate::utils::{time, validation::ensure_present};

#[derive(Clone)]
pub struct RequestService {
    store: SharedStore,
    write_lock: Arc<Mutex<()>>,
}

impl RequestService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn create(&self, payload: CreateRequestPayload) -> Result<SupportRequest> {
        payload.validate()?;

        let custom_text = payload
            .custom_location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        ensure_present(&[
            ("category", payload.category.is_some()),
            ("date", payload.date.is_some()),
            ("time_from", payload.time_from.is_some()),
            (
                "custom_location",
                payload.location != LocationChoice::Custom || custom_text.is_some(),
            ),
        ])?;

        let (Some(category), Some(date), Some(from)) =
            (payload.category, payload.date, payload.time_from)
        else {
            return Err(Error::BadRequest(
                "Please fill in all required fields".to_string(),
            ));
        };

        let location = match payload.location {
            LocationChoice::Home => MeetingLocation::Home,
            LocationChoice::Public => MeetingLocation::Public,
            LocationChoice::Online => MeetingLocation::Online,
            LocationChoice::Custom => {
                MeetingLocation::Custom(custom_text.unwrap_or_default().to_string())
            }
        };

        let now = time::now();
        let request = SupportRequest {
            id: Uuid::new_v4(),
            category,
            date,
            time_window: TimeWindow {
                from,
                to: payload.time_to,
            },
            language: payload.language,
            location,
            details: payload
                .details
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            reward_offered: payload.reward,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let _guard = self.write_lock.lock().await;
        let mut requests: Vec<SupportRequest> = load_list(self.store.as_ref(), REQUESTS_KEY).await?;
        requests.push(request.clone());
        save_list(self.store.as_ref(), REQUESTS_KEY, &requests).await?;

        tracing::info!(
            request_id = %request.id,
            category = request.category.label(),
            date = %request.date,
            "Support request created"
        );
        Ok(request)
    }

    /// All requests, newest first.
    pub async fn list(&self) -> Result<Vec<SupportRequest>> {
        let mut requests: Vec<SupportRequest> = load_list(self.store.as_ref(), REQUESTS_KEY).await?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Pending requests a supporter can pick up, optionally for one category.
    pub async fn list_open(&self, category: Option<Category>) -> Result<Vec<SupportRequest>> {
        let requests = self.list().await?;
        Ok(requests
            .into_iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .filter(|r| category.map_or(true, |c| r.category == c))
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<SupportRequest> {
        let requests: Vec<SupportRequest> = load_list(self.store.as_ref(), REQUESTS_KEY).await?;
        requests
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("Request {} not found", id)))
    }

    pub async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<SupportRequest> {
        let _guard = self.write_lock.lock().await;
        let mut requests: Vec<SupportRequest> = load_list(self.store.as_ref(), REQUESTS_KEY).await?;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("Request {} not found", id)))?;

        if !request.status.can_transition_to(status) {
            return Err(Error::Conflict(format!(
                "Request cannot move from {} to {}",
                request.status, status
            )));
        }

        let previous = request.status;
        request.status = status;
        request.updated_at = time::now();
        let updated = request.clone();
        save_list(self.store.as_ref(), REQUESTS_KEY, &requests).await?;

        tracing::info!(request_id = %id, from = %previous, to = %status, "Request status updated");
        Ok(updated)
    }

    /// Moves a request straight to `target`. A request already at or past
    /// `target` is returned unchanged.
    pub async fn advance_to(&self, id: Uuid, target: RequestStatus) -> Result<SupportRequest> {
        let _guard = self.write_lock.lock().await;
        let mut requests: Vec<SupportRequest> = load_list(self.store.as_ref(), REQUESTS_KEY).await?;
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("Request {} not found", id)))?;
        if request.status.is_at_least(target) {
            return Ok(request.clone());
        }

        let previous = request.status;
        request.status = target;
        request.updated_at = time::now();
        let updated = request.clone();
        save_list(self.store.as_ref(), REQUESTS_KEY, &requests).await?;

        tracing::info!(request_id = %id, from = %previous, to = %target, "Request advanced");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MockKeyValueStore};
    use chrono::{NaiveDate, NaiveTime};

    fn service() -> RequestService {
        RequestService::new(Arc::new(MemoryStore::new()))
    }

    fn payload() -> CreateRequestPayload {
        CreateRequestPayload {
            category: Some(Category::Coffee),
            date: NaiveDate::from_ymd_opt(2026, 10, 20),
            time_from: NaiveTime::from_hms_opt(16, 0, 0),
            details: Some("  Feeling a bit lonely today.  ".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_stores_pending_request() {
        let svc = service();
        let created = svc.create(payload()).await.unwrap();
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(created.location, MeetingLocation::Home);
        assert_eq!(created.details.as_deref(), Some("Feeling a bit lonely today."));

        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
    }

    #[tokio::test]
    async fn create_reports_missing_fields() {
        let svc = service();
        let err = svc
            .create(CreateRequestPayload {
                category: Some(Category::Meals),
                ..Default::default()
            })
            .await
            .unwrap_err();
        match err {
            Error::BadRequest(msg) => {
                assert!(msg.contains("date"));
                assert!(msg.contains("time_from"));
                assert!(!msg.contains("category"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn custom_location_needs_text() {
        let svc = service();
        let mut p = payload();
        p.location = LocationChoice::Custom;
        p.custom_location = Some("   ".into());
        assert!(matches!(svc.create(p.clone()).await, Err(Error::BadRequest(_))));

        p.custom_location = Some("MTR Restaurant, Jayanagar".into());
        let created = svc.create(p).await.unwrap();
        assert_eq!(
            created.location,
            MeetingLocation::Custom("MTR Restaurant, Jayanagar".into())
        );
    }

    #[tokio::test]
    async fn status_moves_forward_only() {
        let svc = service();
        let created = svc.create(payload()).await.unwrap();

        let err = svc
            .update_status(created.id, RequestStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let matched = svc
            .update_status(created.id, RequestStatus::Matched)
            .await
            .unwrap();
        assert_eq!(matched.status, RequestStatus::Matched);
        assert_eq!(svc.get(created.id).await.unwrap().status, RequestStatus::Matched);
    }

    #[tokio::test]
    async fn advance_skips_steps_and_never_moves_back() {
        let svc = service();
        let created = svc.create(payload()).await.unwrap();

        let done = svc
            .advance_to(created.id, RequestStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, RequestStatus::Completed);

        let again = svc
            .advance_to(created.id, RequestStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(again.status, RequestStatus::Completed);
        assert_eq!(again.updated_at, done.updated_at);
    }

    #[tokio::test]
    async fn open_requests_filter_by_category_and_status() {
        let svc = service();
        let coffee = svc.create(payload()).await.unwrap();
        let mut meals = payload();
        meals.category = Some(Category::Meals);
        let meals = svc.create(meals).await.unwrap();
        svc.update_status(meals.id, RequestStatus::Matched).await.unwrap();

        let open = svc.list_open(None).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, coffee.id);
        assert!(svc.list_open(Some(Category::Meals)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let svc = service();
        assert!(matches!(svc.get(Uuid::new_v4()).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(Error::Storage("disk full".into())));
        let svc = RequestService::new(Arc::new(store));

        let err = svc.create(payload()).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }
}
