use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::ScorerKind;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::request::{RequestStatus, SupportRequest};
use crate::models::session::{Session, SessionMode};
use crate::models::supporter::Supporter;
use crate::services::request_service::RequestService;
use crate::services::session_service::SessionService;
use crate::utils::time;

/// Compatibility between a request and a supporter, in percent.
pub trait MatchScorer: Send + Sync {
    fn score(&self, request: &SupportRequest, supporter: &Supporter) -> u8;
}

/// Uses the roster's fixed figure.
pub struct StaticScorer;

impl MatchScorer for StaticScorer {
    fn score(&self, _request: &SupportRequest, supporter: &Supporter) -> u8 {
        supporter.base_match.min(100)
    }
}

/// Weighs category fit, shared language, proximity and reputation.
pub struct PreferenceScorer;

impl MatchScorer for PreferenceScorer {
    fn score(&self, request: &SupportRequest, supporter: &Supporter) -> u8 {
        let mut score = 30.0_f32;

        if supporter.categories.contains(&request.category) {
            score += 30.0;
        }
        score += match request.language {
            Some(lang) if supporter.languages.contains(&lang) => 15.0,
            Some(_) => 0.0,
            None => 10.0,
        };
        score += (supporter.rating.clamp(0.0, 5.0) / 5.0) * 15.0;
        score += (10.0 - supporter.distance_km * 3.0).max(0.0);
        if supporter.verified {
            score += 5.0;
        }

        score.round().clamp(0.0, 100.0) as u8
    }
}

pub fn scorer_for(kind: ScorerKind) -> Arc<dyn MatchScorer> {
    match kind {
        ScorerKind::Static => Arc::new(StaticScorer),
        ScorerKind::Preference => Arc::new(PreferenceScorer),
    }
}

#[derive(Clone)]
pub struct MatcherService {
    requests: RequestService,
    sessions: SessionService,
    roster: Arc<Vec<Supporter>>,
    scorer: Arc<dyn MatchScorer>,
    views: Arc<RwLock<HashMap<Uuid, Vec<Candidate>>>>,
}

impl MatcherService {
    pub fn new(
        requests: RequestService,
        sessions: SessionService,
        roster: Vec<Supporter>,
        scorer: Arc<dyn MatchScorer>,
    ) -> Self {
        Self {
            requests,
            sessions,
            roster: Arc::new(roster),
            scorer,
            views: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Candidates for a pending request, best match first. The list is
    /// built once per request and then only shrinks as candidates are
    /// declined.
    pub async fn get_candidates(&self, request_id: Uuid) -> Result<Vec<Candidate>> {
        let request = self.requests.get(request_id).await?;
        let mut views = self.views.write().await;

        if request.status != RequestStatus::Pending {
            views.remove(&request_id);
            return Ok(Vec::new());
        }

        let candidates = views
            .entry(request_id)
            .or_insert_with(|| self.build_candidates(&request));
        Ok(candidates.clone())
    }

    fn build_candidates(&self, request: &SupportRequest) -> Vec<Candidate> {
        let now = time::now();
        let mut candidates: Vec<Candidate> = self
            .roster
            .iter()
            .map(|s| Candidate {
                id: s.id,
                request_id: request.id,
                supporter_name: s.name.clone(),
                age: s.age,
                distance_km: s.distance_km,
                rating: s.rating,
                completed_sessions: s.completed_sessions,
                match_percentage: self.scorer.score(request, s).min(100),
                bio: s.bio.clone(),
                interests: s.interests.clone(),
                verified: s.verified,
                responded_at: time::minutes_before(now, s.response_delay_mins),
            })
            .collect();
        candidates.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        tracing::debug!(
            request_id = %request.id,
            count = candidates.len(),
            "Built candidate list"
        );
        candidates
    }

    /// Drops a candidate from the request's view. The request is untouched.
    pub async fn decline(&self, request_id: Uuid, candidate_id: Uuid) -> Result<Vec<Candidate>> {
        self.get_candidates(request_id).await?;

        let mut views = self.views.write().await;
        let candidates = views.get_mut(&request_id).ok_or_else(|| {
            Error::Conflict(format!("Request {} is no longer open", request_id))
        })?;
        let before = candidates.len();
        candidates.retain(|c| c.id != candidate_id);
        if candidates.len() == before {
            return Err(Error::NotFound(format!(
                "Candidate {} not found for request {}",
                candidate_id, request_id
            )));
        }

        tracing::info!(request_id = %request_id, candidate_id = %candidate_id, "Candidate declined");
        Ok(candidates.clone())
    }

    /// Accepts a candidate: the request becomes matched and a requestor-side
    /// session starts with the chosen supporter.
    pub async fn confirm(&self, request_id: Uuid, candidate_id: Uuid) -> Result<(Candidate, Session)> {
        let candidates = self.get_candidates(request_id).await?;
        let candidate = match candidates.into_iter().find(|c| c.id == candidate_id) {
            Some(c) => c,
            None => {
                let request = self.requests.get(request_id).await?;
                if request.status != RequestStatus::Pending {
                    return Err(Error::Conflict(format!(
                        "Request {} is already {}",
                        request_id, request.status
                    )));
                }
                return Err(Error::NotFound(format!(
                    "Candidate {} not found for request {}",
                    candidate_id, request_id
                )));
            }
        };

        // Starting the session is what matches the request. On failure the
        // request stays pending and keeps its candidates.
        let session = self
            .sessions
            .start(request_id, candidate.id, SessionMode::Requestor)
            .await?;
        self.views.write().await.remove(&request_id);

        tracing::info!(
            request_id = %request_id,
            supporter = %candidate.supporter_name,
            session_id = %session.id,
            "Supporter confirmed"
        );
        Ok((candidate, session))
    }
}
