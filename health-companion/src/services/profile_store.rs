//! Where the current session's [`HealthProfile`] lives.

use crate::models::HealthProfile;
use async_trait::async_trait;
use companion_core::error::AppError;
use tower_sessions::Session;

const PROFILE_KEY: &str = "health_profile";
const MEAL_PLAN_KEY: &str = "last_meal_plan";

/// Whole-profile reads and writes. `get` falls back to the default profile
/// until something has been stored.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self) -> Result<HealthProfile, AppError>;

    async fn set(&self, profile: HealthProfile) -> Result<(), AppError>;
}

/// Profile held in the cookie session. The session store is in-memory, so
/// the profile disappears with the session.
pub struct SessionProfileStore {
    session: Session,
}

impl SessionProfileStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Most recent meal plan, kept for the download link.
    pub async fn last_meal_plan(&self) -> Result<Option<String>, AppError> {
        self.session
            .get::<String>(MEAL_PLAN_KEY)
            .await
            .map_err(|e| AppError::SessionError(e.into()))
    }

    pub async fn set_last_meal_plan(&self, plan: &str) -> Result<(), AppError> {
        self.session
            .insert(MEAL_PLAN_KEY, plan)
            .await
            .map_err(|e| AppError::SessionError(e.into()))
    }
}

#[async_trait]
impl ProfileStore for SessionProfileStore {
    async fn get(&self) -> Result<HealthProfile, AppError> {
        let stored = self
            .session
            .get::<HealthProfile>(PROFILE_KEY)
            .await
            .map_err(|e| AppError::SessionError(e.into()))?;
        Ok(stored.unwrap_or_default())
    }

    async fn set(&self, profile: HealthProfile) -> Result<(), AppError> {
        self.session
            .insert(PROFILE_KEY, profile)
            .await
            .map_err(|e| AppError::SessionError(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn sample() -> HealthProfile {
        HealthProfile {
            goals: "Build muscle".to_string(),
            conditions: String::new(),
            routines: "Lifting 4x/week".to_string(),
            preferences: "High protein".to_string(),
            restrictions: "Shellfish allergy\nNo pork".to_string(),
        }
    }

    #[tokio::test]
    async fn session_store_round_trips() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let store = SessionProfileStore::new(session);

        assert_eq!(store.get().await.unwrap(), HealthProfile::default());
        store.set(sample()).await.unwrap();
        assert_eq!(store.get().await.unwrap(), sample());

        store.set(HealthProfile::blank()).await.unwrap();
        assert_eq!(store.get().await.unwrap(), HealthProfile::blank());

        assert_eq!(store.last_meal_plan().await.unwrap(), None);
        store.set_last_meal_plan("Day 1").await.unwrap();
        assert_eq!(store.last_meal_plan().await.unwrap().as_deref(), Some("Day 1"));
    }
}
