use backend_domain::{validate_read_only, SqlQueryResult};

use crate::dtos::ExecuteSqlRequest;
use crate::error::database;
use crate::{AppError, AppState};

pub const DEFAULT_MAX_ROWS: usize = 200;
pub const MAX_ROWS_CAP: usize = 1000;

/// Read-only escape hatch. The statement is checked before the store sees it.
pub async fn execute_sql(
    state: &AppState,
    request: ExecuteSqlRequest,
) -> Result<SqlQueryResult, AppError> {
    let statement = validate_read_only(request.sql.as_deref().unwrap_or_default())?;
    let max_rows = row_cap(request.max_rows);
    state
        .sql
        .execute_read_only(&statement, max_rows)
        .await
        .map_err(database("execute sql"))
}

fn row_cap(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_MAX_ROWS,
        Some(rows) if rows <= 0 => 1,
        Some(rows) => usize::try_from(rows).map_or(MAX_ROWS_CAP, |rows| rows.min(MAX_ROWS_CAP)),
    }
}
