use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use userbase_core::validation::validate_user;
use userbase_core::{
    AVERAGE_YEAR_DAYS, CreateUserRequest, DomainError, MIN_REGISTRATION_AGE_YEARS,
    UNDERAGE_REASON, User,
};
use userbase_storage::UserStore;
use uuid::Uuid;

use crate::events::{UserEvent, UserEventSink};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Age in fractional years, using an average year of 365.25 days.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "second precision is far finer than needed")]
pub fn age_in_years(date_of_birth: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let seconds = (now - date_of_birth).num_seconds() as f64;
    seconds / (AVERAGE_YEAR_DAYS * SECONDS_PER_DAY)
}

pub struct UserService {
    storage: Arc<dyn UserStore>,
    events: Arc<dyn UserEventSink>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    #[must_use]
    pub fn new(
        storage: Arc<dyn UserStore>,
        events: Arc<dyn UserEventSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { storage, events, clock }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let now = self.clock.utc();
        validate_user(&request.name, &request.email, request.date_of_birth, now)?;

        if age_in_years(request.date_of_birth, now) < MIN_REGISTRATION_AGE_YEARS {
            return Err(DomainError::bad_request(UNDERAGE_REASON));
        }

        let user = User::new(request.id, &request.name, &request.email, request.date_of_birth);
        self.storage.create_user(&user).await?;

        self.events.emit(UserEvent::Created { id: user.id });
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        let user = self.storage.retrieve_user(id).await?;
        self.events.emit(UserEvent::Accessed { id });
        Ok(user)
    }

    /// Release the underlying store's connections.
    pub async fn close(&self) -> Result<(), DomainError> {
        self.storage.close().await
    }
}
