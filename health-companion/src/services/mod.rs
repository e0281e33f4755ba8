pub mod companion;
pub mod gateway;
pub mod profile_store;
pub mod prompts;
pub mod providers;

pub use companion::{CompanionError, HealthCompanion};
pub use gateway::{InferenceError, InferenceErrorKind, InferenceGateway, ERROR_MARKER};
pub use profile_store::{ProfileStore, SessionProfileStore};
