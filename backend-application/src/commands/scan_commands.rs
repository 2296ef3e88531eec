use crate::dtos::ForceUpdateResponse;
use crate::AppState;

/// Acknowledged before the pass starts; a pass already in flight absorbs it.
pub fn force_update(state: &AppState) -> ForceUpdateResponse {
    state.orchestrator.spawn_run("force_update");
    ForceUpdateResponse { queued: true }
}
