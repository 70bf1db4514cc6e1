// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

/// Shared handler state, installed on the router as an `Extension`.
#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
}
