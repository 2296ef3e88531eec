// Ad-hoc read-only SQL against the read-only pool

use async_trait::async_trait;
use futures_util::TryStreamExt;
use serde_json::{Map, Number, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Executor, Row, TypeInfo, ValueRef};

use backend_domain::{ReadOnlySqlRepository, SqlQueryResult};

use super::SqliteStore;

fn cell_value(row: &SqliteRow, index: usize) -> anyhow::Result<Value> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();
    let value = match type_name.as_str() {
        "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
        "REAL" => Number::from_f64(row.try_get::<f64, _>(index)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => Value::String(String::from_utf8_lossy(&row.try_get::<Vec<u8>, _>(index)?).into_owned()),
        _ => Value::String(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}

#[async_trait]
impl ReadOnlySqlRepository for SqliteStore {
    async fn execute_read_only(
        &self,
        sql: &str,
        max_rows: usize,
    ) -> anyhow::Result<SqlQueryResult> {
        let mut result = SqlQueryResult::default();
        let mut stream = sqlx::query(sql).fetch(self.read_only());
        while let Some(row) = stream.try_next().await? {
            if result.columns.is_empty() {
                result.columns = row
                    .columns()
                    .iter()
                    .map(|column| column.name().to_string())
                    .collect();
            }
            // One extra row only decides truncation.
            if result.rows.len() == max_rows {
                result.truncated = true;
                break;
            }
            let mut record = Map::new();
            for (index, column) in result.columns.iter().enumerate() {
                record.insert(column.clone(), cell_value(&row, index)?);
            }
            result.rows.push(record);
        }
        drop(stream);

        if result.columns.is_empty() {
            let described = self.read_only().describe(sql).await?;
            result.columns = described
                .columns()
                .iter()
                .map(|column| column.name().to_string())
                .collect();
        }
        Ok(result)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }
}
