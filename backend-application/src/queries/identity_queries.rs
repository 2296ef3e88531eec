use backend_domain::{Page, PageLimits, PageRequest, PlayerIdentity, PlayerSelector};
use tracing::warn;

use crate::dtos::{IdentityResponse, PageOnlyRequest, PlayerLookupRequest};
use crate::error::database;
use crate::{AppError, AppState};

/// Uuid lookup first, then the name. A name that disagrees with the
/// uuid's record is only logged.
pub async fn lookup_player_identity(
    state: &AppState,
    request: PlayerLookupRequest,
) -> Result<IdentityResponse, AppError> {
    let selector = PlayerSelector::new(request.player_uuid, request.player_name);
    if selector.is_empty() {
        return Err(AppError::invalid("playerUuid or playerName required"));
    }

    let mut identity = None;
    if let Some(uuid) = &selector.uuid {
        identity = state
            .identities
            .find_identity_by_uuid(uuid)
            .await
            .map_err(database("load identity by uuid"))?;
    }
    if identity.is_none() {
        if let Some(name) = &selector.name {
            identity = state
                .identities
                .find_identity_by_name(name)
                .await
                .map_err(database("load identity by name"))?;
        }
    }
    let identity = identity.ok_or(AppError::NotFound)?;

    if let (Some(uuid), Some(requested)) = (&selector.uuid, &selector.name) {
        if let Some(stored) = &identity.player_name {
            if !stored.eq_ignore_ascii_case(requested) {
                warn!(
                    player_uuid = uuid.as_str(),
                    requested = requested.as_str(),
                    stored = stored.as_str(),
                    "identity lookup name mismatch"
                );
            }
        }
    }
    Ok(IdentityResponse { identity })
}

pub async fn list_player_identities(
    state: &AppState,
    request: PageOnlyRequest,
) -> Result<Page<Vec<PlayerIdentity>>, AppError> {
    let page = PageRequest::new(request.page, request.page_size, PageLimits::IDENTITIES);
    let total = state
        .identities
        .count_identities()
        .await
        .map_err(database("count identities"))?;
    let window = page.window(total);
    let records = state
        .identities
        .fetch_identities(window)
        .await
        .map_err(database("list identities"))?;
    Ok(Page::new(records, total, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;

    #[tokio::test]
    async fn lookup_requires_uuid_or_name() {
        let h = harness();
        let err = lookup_player_identity(
            &h.state,
            PlayerLookupRequest {
                player_uuid: Some(" ".to_string()),
                player_name: None,
            },
        )
        .await
        .expect_err("nothing to look up");
        assert_eq!(
            err.to_string(),
            "INVALID_ARGUMENT: playerUuid or playerName required"
        );
    }

    #[tokio::test]
    async fn unknown_uuid_falls_back_to_name() {
        let h = harness();
        h.store.add_identity("u1", "Alex", 5);
        let response = lookup_player_identity(
            &h.state,
            PlayerLookupRequest {
                player_uuid: Some("missing".to_string()),
                player_name: Some("Alex".to_string()),
            },
        )
        .await
        .expect("name fallback");
        assert_eq!(response.identity.player_uuid, "u1");
    }

    #[tokio::test]
    async fn mismatching_name_still_returns_uuid_record() {
        let h = harness();
        h.store.add_identity("u1", "Alex", 5);
        let response = lookup_player_identity(
            &h.state,
            PlayerLookupRequest {
                player_uuid: Some("u1".to_string()),
                player_name: Some("Steve".to_string()),
            },
        )
        .await
        .expect("uuid wins");
        assert_eq!(response.identity.player_name.as_deref(), Some("Alex"));
    }

    #[tokio::test]
    async fn listing_orders_by_last_update() {
        let h = harness();
        h.store.add_identity("u1", "Alex", 5);
        h.store.add_identity("u2", "Steve", 9);
        let page = list_player_identities(&h.state, PageOnlyRequest::default())
            .await
            .expect("list");
        assert_eq!(page.total, 2);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.records[0].player_uuid, "u2");
    }
}
