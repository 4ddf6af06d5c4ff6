use std::sync::Arc;

use service::account::{AccountRepository, AccountService};

/// Shared handler state; the repository is chosen by the caller.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { accounts: AccountService::new(repo) }
    }
}
