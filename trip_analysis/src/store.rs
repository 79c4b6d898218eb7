use async_trait::async_trait;
use entities::trips::NewTripRecord;

/// The persistence collaborator the session hands finished analyses to.
/// The production implementation lives with the host application (it owns
/// the database client and the authenticated user context).
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn save_analysis(&self, record: NewTripRecord) -> anyhow::Result<()>;
}
