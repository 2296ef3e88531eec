use backend_domain::PlayerSelector;

use crate::error::database;
use crate::{AppError, AppState};

/// Uuid of the most recently updated identity carrying `name`.
pub(crate) async fn resolve_uuid_by_name(
    state: &AppState,
    name: &str,
) -> Result<Option<String>, AppError> {
    let identity = state
        .identities
        .find_identity_by_name(name)
        .await
        .map_err(database("resolve player name"))?;
    Ok(identity.map(|identity| identity.player_uuid))
}

/// The uuid when given, otherwise the name resolved through identities.
pub(crate) async fn ensure_player_uuid(
    state: &AppState,
    selector: &PlayerSelector,
) -> Result<Option<String>, AppError> {
    if let Some(uuid) = &selector.uuid {
        return Ok(Some(uuid.clone()));
    }
    match &selector.name {
        Some(name) => resolve_uuid_by_name(state, name).await,
        None => Ok(None),
    }
}

/// Optional player filter for list queries: absent selector means no filter,
/// an unresolvable name is `NOT_FOUND`.
pub(crate) async fn player_filter(
    state: &AppState,
    selector: &PlayerSelector,
) -> Result<Option<String>, AppError> {
    if selector.is_empty() {
        return Ok(None);
    }
    ensure_player_uuid(state, selector)
        .await?
        .map(Some)
        .ok_or(AppError::NotFound)
}
