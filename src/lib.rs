pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::models::supporter::demo_roster;
use crate::services::{
    auth_service::AuthService,
    matcher_service::{scorer_for, MatcherService},
    profile_service::ProfileService,
    rating_service::RatingService,
    request_service::RequestService,
    session_service::{SessionService, TrackingSettings},
};
use crate::storage::SharedStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: SharedStore,
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub request_service: RequestService,
    pub matcher_service: MatcherService,
    pub session_service: SessionService,
    pub rating_service: RatingService,
}

impl AppState {
    pub fn new(config: Config, store: SharedStore) -> Self {
        let request_service = RequestService::new(store.clone());
        let session_service =
            SessionService::new(request_service.clone(), TrackingSettings::from(&config));
        let matcher_service = MatcherService::new(
            request_service.clone(),
            session_service.clone(),
            demo_roster(),
            scorer_for(config.match_scorer),
        );

        Self {
            auth_service: AuthService::new(&config),
            profile_service: ProfileService::new(store.clone()),
            rating_service: RatingService::new(store.clone()),
            request_service,
            matcher_service,
            session_service,
            store,
            config: Arc::new(config),
        }
    }
}
