use std::sync::Arc;

use crate::{
    config::Config,
    models::{contest::Contest, payment::Payment, submission::Submission, user::User},
    repositories::{InMemoryRepository, Repository},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub contests: Arc<dyn Repository<Contest>>,
    pub users: Arc<dyn Repository<User>>,
    pub submissions: Arc<dyn Repository<Submission>>,
    pub payments: Arc<dyn Repository<Payment>>,
}

impl AppState {
    pub fn new(
        config: Config,
        contests: Arc<dyn Repository<Contest>>,
        users: Arc<dyn Repository<User>>,
        submissions: Arc<dyn Repository<Submission>>,
        payments: Arc<dyn Repository<Payment>>,
    ) -> Self {
        Self {
            config,
            contests,
            users,
            submissions,
            payments,
        }
    }

    /// State backed by fresh process-local repositories.
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryRepository::<Contest>::new()),
            Arc::new(InMemoryRepository::<User>::new()),
            Arc::new(InMemoryRepository::<Submission>::new()),
            Arc::new(InMemoryRepository::<Payment>::new()),
        )
    }
}
