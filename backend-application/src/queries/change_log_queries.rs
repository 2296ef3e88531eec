use backend_domain::{
    normalize_optional_text, ChangeLogEntry, ChangeLogFilter, ChangeLogOrderColumn,
    ChangeLogWindow, Page, PageLimits, PageRequest, PlayerSelector, SortDirection,
};

use crate::dtos::{ChangeLogDetailRequest, ChangeLogDetailResponse, ChangeLogQueryRequest};
use crate::error::database;
use crate::queries::player_resolution::player_filter;
use crate::{AppError, AppState};

pub async fn get_player_mtr_logs(
    state: &AppState,
    request: ChangeLogQueryRequest,
) -> Result<Page<Vec<ChangeLogEntry>>, AppError> {
    let window =
        ChangeLogWindow::from_parts(request.single_date, request.start_date, request.end_date)?;
    let direction = SortDirection::parse(request.order.as_deref())?;
    let order_column = ChangeLogOrderColumn::parse(request.order_column.as_deref())?;
    let page = PageRequest::new(request.page, request.page_size, PageLimits::CHANGE_LOGS);

    let selector = PlayerSelector::new(request.player_uuid, request.player_name);
    let filter = ChangeLogFilter {
        player_uuid: player_filter(state, &selector).await?,
        dimension_context: normalize_optional_text(request.dimension_context),
        entry_id: normalize_optional_text(request.entry_id),
        change_type: normalize_optional_text(request.change_type),
        window,
        order_column,
        direction,
    };

    let total = state
        .change_logs
        .count_change_logs(&filter)
        .await
        .map_err(database("count change logs"))?;
    let page_window = page.window(total);
    let records = state
        .change_logs
        .fetch_change_logs(&filter, page_window)
        .await
        .map_err(database("load change logs"))?;
    Ok(Page::new(records, total, page_window))
}

pub async fn get_mtr_log_detail(
    state: &AppState,
    request: ChangeLogDetailRequest,
) -> Result<ChangeLogDetailResponse, AppError> {
    let id = request
        .id
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::invalid("id must be > 0"))?;
    let log = state
        .change_logs
        .find_change_log(id)
        .await
        .map_err(database("load change log"))?
        .ok_or(AppError::NotFound)?;
    Ok(ChangeLogDetailResponse { log })
}
