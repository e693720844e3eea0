use storefront::infra::state::build_state;
use storefront::{AppError, AppState};

pub const TEST_SECRET: &str = "storefront-test-signing-key";

/// Fresh in-memory database, migrated, with the signing key provisioned.
pub async fn build_test_state() -> Result<AppState, AppError> {
    let state = build_state()
        .with_database_url("sqlite::memory:")
        .build()
        .await?;

    migration::provision_signing_key(&state.db, TEST_SECRET).await?;
    Ok(state)
}
