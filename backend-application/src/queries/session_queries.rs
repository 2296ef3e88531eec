use backend_domain::{
    normalize_optional_text, Page, PageLimits, PageRequest, PlayerSelector, PlayerSession,
    SessionEventType, SessionFilter, SessionWindow,
};

use crate::dtos::SessionQueryRequest;
use crate::error::database;
use crate::queries::player_resolution::player_filter;
use crate::{AppError, AppState};

pub async fn get_player_sessions(
    state: &AppState,
    request: SessionQueryRequest,
) -> Result<Page<Vec<PlayerSession>>, AppError> {
    let event_type = normalize_optional_text(request.event_type)
        .map(|raw| SessionEventType::parse(&raw))
        .transpose()?;
    let window = SessionWindow::from_parts(
        request.single_date,
        request.start_date,
        request.end_date,
        request.start_at,
        request.end_at,
    )?;
    let page = PageRequest::new(request.page, request.page_size, PageLimits::SESSIONS);

    let selector = PlayerSelector::new(request.player_uuid, request.player_name);
    let filter = SessionFilter {
        player_uuid: player_filter(state, &selector).await?,
        event_type,
        window,
    };

    let total = state
        .sessions
        .count_sessions(&filter)
        .await
        .map_err(database("count player sessions"))?;
    let page_window = page.window(total);
    let records = state
        .sessions
        .fetch_sessions(&filter, page_window)
        .await
        .map_err(database("load player sessions"))?;
    Ok(Page::new(records, total, page_window))
}
