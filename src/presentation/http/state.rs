// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use crate::config::Environment;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub environment: Environment,
}
