//! Live session simulation.
//!
//! Starting a session is what matches a pending request. Two scheduled
//! tasks then drive it: a periodic ETA countdown that also nudges the
//! supporter's position, and a one-shot arrival timer. Arrival moves the
//! request to `in_progress`; completion is a user action, valid only after
//! arrival, and moves the request to `completed`. Completed sessions stay
//! readable for a retention window and are then dropped.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use rand::Rng;
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::request::{RequestStatus, SupportRequest};
use crate::models::session::{
    GeoPoint, Session, SessionEvent, SessionMode, SessionResult, SessionStatus,
};
use crate::services::request_service::RequestService;
use crate::utils::{scheduler::ScheduledTask, time};

const EVENT_BUFFER: usize = 64;
const LOCATION_JITTER: f64 = 0.001;
const START_OFFSET: f64 = 0.008;
pub const COMPLETED_RETENTION: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Copy)]
pub struct TrackingSettings {
    pub arrival_delay: Duration,
    pub eta_tick: Duration,
    pub initial_eta_minutes: u32,
}

impl From<&Config> for TrackingSettings {
    fn from(config: &Config) -> Self {
        Self {
            arrival_delay: config.arrival_delay(),
            eta_tick: config.eta_tick(),
            initial_eta_minutes: config.initial_eta_minutes,
        }
    }
}

struct TrackedSession {
    session: Session,
    tasks: Vec<ScheduledTask>,
    expiry: Option<ScheduledTask>,
}

struct Inner {
    requests: RequestService,
    settings: TrackingSettings,
    sessions: RwLock<HashMap<Uuid, TrackedSession>>,
    events: broadcast::Sender<SessionEvent>,
}

#[derive(Clone)]
pub struct SessionService {
    inner: Arc<Inner>,
}

impl SessionService {
    pub fn new(requests: RequestService, settings: TrackingSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            inner: Arc::new(Inner {
                requests,
                settings,
                sessions: RwLock::new(HashMap::new()),
                events,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Matches a pending request to `supporter_id` and starts tracking.
    ///
    /// The request only becomes `matched` together with its session: both
    /// happen under the sessions write lock, and a failed status write
    /// leaves no session behind.
    pub async fn start(
        &self,
        request_id: Uuid,
        supporter_id: Uuid,
        mode: SessionMode,
    ) -> Result<Session> {
        let mut sessions = self.inner.sessions.write().await;
        if sessions.values().any(|t| t.session.request_id == request_id) {
            return Err(Error::Conflict(format!(
                "Request {} already has a session",
                request_id
            )));
        }

        let request = self.inner.requests.get(request_id).await?;
        if request.status != RequestStatus::Pending {
            return Err(Error::Conflict(format!(
                "Request {} is {}, only pending requests can be matched",
                request_id, request.status
            )));
        }
        let request = self
            .inner
            .requests
            .update_status(request_id, RequestStatus::Matched)
            .await?;

        let settings = self.inner.settings;
        let session = Session {
            id: Uuid::new_v4(),
            request_id,
            supporter_id,
            mode,
            status: SessionStatus::OnWay,
            eta_minutes: settings.initial_eta_minutes,
            supporter_location: GeoPoint {
                lat: GeoPoint::ORIGIN.lat + START_OFFSET,
                lng: GeoPoint::ORIGIN.lng + START_OFFSET,
            },
            user_location: GeoPoint::ORIGIN,
            meeting_location: request.location,
            started_at: time::now(),
            arrived_at: None,
            completed_at: None,
        };

        // The write guard is held while spawning, so a zero delay still
        // finds the session in the map.
        let tasks = self.schedule(session.id);
        sessions.insert(
            session.id,
            TrackedSession {
                session: session.clone(),
                tasks,
                expiry: None,
            },
        );

        tracing::info!(
            session_id = %session.id,
            request_id = %request_id,
            supporter_id = %supporter_id,
            mode = ?mode,
            eta_minutes = session.eta_minutes,
            "Session started"
        );
        Ok(session)
    }

    /// A supporter picks up an open request from the board.
    pub async fn accept(&self, request_id: Uuid, supporter_id: Uuid) -> Result<Session> {
        self.start(request_id, supporter_id, SessionMode::Supporter).await
    }

    /// Manual status change from the API.
    ///
    /// `matched` is only reached by starting a session, and a request
    /// with a session is moved by that session. What is left is advancing
    /// a request whose session did not survive a restart.
    pub async fn update_request_status(
        &self,
        request_id: Uuid,
        status: RequestStatus,
    ) -> Result<SupportRequest> {
        if status == RequestStatus::Matched {
            return Err(Error::Conflict(
                "Requests are matched by confirming a candidate or accepting the request"
                    .to_string(),
            ));
        }

        let sessions = self.inner.sessions.read().await;
        if let Some(tracked) = sessions.values().find(|t| t.session.request_id == request_id) {
            return Err(Error::Conflict(format!(
                "Request {} is driven by session {}",
                request_id, tracked.session.id
            )));
        }
        self.inner.requests.update_status(request_id, status).await
    }

    fn schedule(&self, session_id: Uuid) -> Vec<ScheduledTask> {
        let settings = self.inner.settings;

        let weak = Arc::downgrade(&self.inner);
        let countdown = ScheduledTask::every(settings.eta_tick, move || {
            let weak: Weak<Inner> = weak.clone();
            async move {
                match weak.upgrade() {
                    Some(inner) => inner.tick(session_id).await,
                    None => false,
                }
            }
        });

        let weak = Arc::downgrade(&self.inner);
        let arrival = ScheduledTask::after(settings.arrival_delay, async move {
            if let Some(inner) = weak.upgrade() {
                inner.mark_arrived(session_id).await;
            }
        });

        vec![countdown, arrival]
    }

    fn schedule_expiry(&self, session_id: Uuid) -> ScheduledTask {
        let weak = Arc::downgrade(&self.inner);
        ScheduledTask::after(COMPLETED_RETENTION, async move {
            if let Some(inner) = weak.upgrade() {
                inner.sessions.write().await.remove(&session_id);
                tracing::debug!(session_id = %session_id, "Completed session dropped");
            }
        })
    }

    pub async fn get(&self, session_id: Uuid) -> Result<Session> {
        let sessions = self.inner.sessions.read().await;
        sessions
            .get(&session_id)
            .map(|t| t.session.clone())
            .ok_or_else(|| Error::NotFound(format!("Session {} not found", session_id)))
    }

    /// Ends an arrived session and returns what the rating step needs.
    pub async fn complete(&self, session_id: Uuid) -> Result<SessionResult> {
        let mut sessions = self.inner.sessions.write().await;
        let tracked = sessions
            .get_mut(&session_id)
            .ok_or_else(|| Error::NotFound(format!("Session {} not found", session_id)))?;

        match tracked.session.status {
            SessionStatus::OnWay => {
                return Err(Error::Conflict(
                    "Supporter has not arrived yet".to_string(),
                ))
            }
            SessionStatus::Completed => {
                return Err(Error::Conflict("Session is already completed".to_string()))
            }
            SessionStatus::Arrived => {}
        }

        self.inner
            .requests
            .advance_to(tracked.session.request_id, RequestStatus::Completed)
            .await?;

        let completed_at = time::now();
        tracked.session.status = SessionStatus::Completed;
        tracked.session.completed_at = Some(completed_at);
        tracked.tasks.clear();
        tracked.expiry = Some(self.schedule_expiry(session_id));

        let _ = self.inner.events.send(SessionEvent::Completed { session_id });
        tracing::info!(session_id = %session_id, "Session completed");

        Ok(SessionResult {
            session_id,
            request_id: tracked.session.request_id,
            supporter_id: tracked.session.supporter_id,
            mode: tracked.session.mode,
            completed_at,
        })
    }

    /// The result of a completed session, for rating.
    pub async fn result(&self, session_id: Uuid) -> Result<SessionResult> {
        let session = self.get(session_id).await?;
        match (session.status, session.completed_at) {
            (SessionStatus::Completed, Some(completed_at)) => Ok(SessionResult {
                session_id,
                request_id: session.request_id,
                supporter_id: session.supporter_id,
                mode: session.mode,
                completed_at,
            }),
            _ => Err(Error::Conflict(
                "Only completed sessions can be rated".to_string(),
            )),
        }
    }

    /// Cancels the session's timers without changing its status.
    pub async fn stop_tracking(&self, session_id: Uuid) -> Result<Session> {
        let mut sessions = self.inner.sessions.write().await;
        let tracked = sessions
            .get_mut(&session_id)
            .ok_or_else(|| Error::NotFound(format!("Session {} not found", session_id)))?;
        let cancelled = tracked.tasks.len();
        tracked.tasks.clear();
        tracing::debug!(session_id = %session_id, cancelled, "Session tracking stopped");
        Ok(tracked.session.clone())
    }
}

impl Inner {
    /// One countdown step. Returns `false` once the session is no longer
    /// on its way, which ends the periodic task.
    async fn tick(&self, session_id: Uuid) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(tracked) = sessions.get_mut(&session_id) else {
            return false;
        };
        let session = &mut tracked.session;
        if session.status != SessionStatus::OnWay {
            return false;
        }

        session.eta_minutes = session.eta_minutes.saturating_sub(1);
        let (d_lat, d_lng) = {
            let mut rng = rand::thread_rng();
            (rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5)
        };
        session.supporter_location.lat += d_lat * LOCATION_JITTER;
        session.supporter_location.lng += d_lng * LOCATION_JITTER;

        let _ = self.events.send(SessionEvent::EtaUpdated {
            session_id,
            eta_minutes: session.eta_minutes,
            supporter_location: session.supporter_location,
        });
        true
    }

    async fn mark_arrived(&self, session_id: Uuid) {
        let mut sessions = self.sessions.write().await;
        let Some(tracked) = sessions.get_mut(&session_id) else {
            return;
        };
        if tracked.session.status != SessionStatus::OnWay {
            return;
        }

        tracked.session.status = SessionStatus::Arrived;
        tracked.session.arrived_at = Some(time::now());
        tracked.session.eta_minutes = 0;
        tracked.session.supporter_location = tracked.session.user_location;

        // Completion advances the request again, so a failed write here
        // is recovered there.
        if let Err(e) = self
            .requests
            .advance_to(tracked.session.request_id, RequestStatus::InProgress)
            .await
        {
            tracing::error!(
                session_id = %session_id,
                error = ?e,
                "Failed to move request to in_progress on arrival"
            );
        }

        let _ = self.events.send(SessionEvent::Arrived { session_id });
        tracing::info!(session_id = %session_id, "Supporter arrived");
    }
}
