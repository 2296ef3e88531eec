use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite};

use backend_domain::{
    AdvancementEntry, AdvancementMap, DataTotals, FilterKeys, PageWindow, PlayerRecordRepository,
    StatEntry, StatMap,
};

use super::SqliteStore;

fn push_in_list<'a>(
    builder: &mut QueryBuilder<'a, Sqlite>,
    column: &str,
    values: impl Iterator<Item = &'a String>,
) {
    builder.push(" AND ").push(column).push(" IN (");
    let mut separated = builder.separated(", ");
    for value in values {
        separated.push_bind(value.as_str());
    }
    separated.push_unseparated(")");
}

fn record_query<'a>(
    select: &str,
    table: &str,
    key_column: &str,
    player_uuid: &'a str,
    keys: Option<&'a FilterKeys>,
) -> QueryBuilder<'a, Sqlite> {
    let mut builder = QueryBuilder::new(select);
    builder
        .push(" FROM ")
        .push(table)
        .push(" WHERE player_uuid = ")
        .push_bind(player_uuid);
    if let Some(keys) = keys {
        push_in_list(&mut builder, key_column, keys.iter());
    }
    builder
}

fn batch_query<'a>(
    select: &str,
    table: &str,
    key_column: &str,
    player_uuids: &'a BTreeSet<String>,
    keys: &'a FilterKeys,
) -> QueryBuilder<'a, Sqlite> {
    let mut builder = QueryBuilder::new(select);
    builder.push(" FROM ").push(table).push(" WHERE 1 = 1");
    push_in_list(&mut builder, "player_uuid", player_uuids.iter());
    push_in_list(&mut builder, key_column, keys.iter());
    builder
}

fn blob_text(bytes: Option<Vec<u8>>) -> String {
    bytes
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[async_trait]
impl PlayerRecordRepository for SqliteStore {
    async fn count_advancements(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
    ) -> anyhow::Result<i64> {
        let mut builder = record_query(
            "SELECT COUNT(*)",
            "player_advancements",
            "advancement_key",
            player_uuid,
            keys,
        );
        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await?)
    }

    async fn fetch_advancements(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
        window: PageWindow,
    ) -> anyhow::Result<Vec<AdvancementEntry>> {
        let mut builder = record_query(
            "SELECT advancement_key, value",
            "player_advancements",
            "advancement_key",
            player_uuid,
            keys,
        );
        builder
            .push(" ORDER BY advancement_key ASC LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);
        let rows = builder.build().fetch_all(self.pool()).await?;
        Ok(rows
            .into_iter()
            .map(|row| AdvancementEntry {
                key: row.get("advancement_key"),
                value: blob_text(row.get("value")),
            })
            .collect())
    }

    async fn count_stats(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
    ) -> anyhow::Result<i64> {
        let mut builder = record_query(
            "SELECT COUNT(*)",
            "player_stats",
            "stat_key",
            player_uuid,
            keys,
        );
        Ok(builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await?)
    }

    async fn fetch_stats(
        &self,
        player_uuid: &str,
        keys: Option<&FilterKeys>,
        window: PageWindow,
    ) -> anyhow::Result<Vec<StatEntry>> {
        let mut builder = record_query(
            "SELECT stat_key, value",
            "player_stats",
            "stat_key",
            player_uuid,
            keys,
        );
        builder
            .push(" ORDER BY stat_key ASC LIMIT ")
            .push_bind(window.limit)
            .push(" OFFSET ")
            .push_bind(window.offset);
        let rows = builder.build().fetch_all(self.pool()).await?;
        Ok(rows
            .into_iter()
            .map(|row| StatEntry {
                key: row.get("stat_key"),
                value: row.get("value"),
            })
            .collect())
    }

    async fn advancements_for_players(
        &self,
        player_uuids: &BTreeSet<String>,
        keys: &FilterKeys,
    ) -> anyhow::Result<BTreeMap<String, AdvancementMap>> {
        let mut out: BTreeMap<String, AdvancementMap> = BTreeMap::new();
        if player_uuids.is_empty() || keys.is_empty() {
            return Ok(out);
        }
        let mut builder = batch_query(
            "SELECT player_uuid, advancement_key, value",
            "player_advancements",
            "advancement_key",
            player_uuids,
            keys,
        );
        for row in builder.build().fetch_all(self.pool()).await? {
            out.entry(row.get("player_uuid"))
                .or_default()
                .insert(row.get("advancement_key"), blob_text(row.get("value")));
        }
        Ok(out)
    }

    async fn stats_for_players(
        &self,
        player_uuids: &BTreeSet<String>,
        keys: &FilterKeys,
    ) -> anyhow::Result<BTreeMap<String, StatMap>> {
        let mut out: BTreeMap<String, StatMap> = BTreeMap::new();
        if player_uuids.is_empty() || keys.is_empty() {
            return Ok(out);
        }
        let mut builder = batch_query(
            "SELECT player_uuid, stat_key, value",
            "player_stats",
            "stat_key",
            player_uuids,
            keys,
        );
        for row in builder.build().fetch_all(self.pool()).await? {
            out.entry(row.get("player_uuid"))
                .or_default()
                .insert(row.get("stat_key"), row.get("value"));
        }
        Ok(out)
    }

    async fn data_totals(&self) -> anyhow::Result<DataTotals> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM mtr_logs) AS mtr_logs_total,
                (SELECT COUNT(*) FROM player_stats) AS stats_total,
                (SELECT COUNT(*) FROM player_advancements) AS advancements_total
            "#,
        )
        .fetch_one(self.pool())
        .await?;
        Ok(DataTotals {
            mtr_logs_total: row.get("mtr_logs_total"),
            stats_total: row.get("stats_total"),
            advancements_total: row.get("advancements_total"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::sqlite_store::test_support::temp_store;

    async fn seed(store: &SqliteStore) {
        for (uuid, key, value) in [
            ("a", "minecraft:custom:minecraft:jump", 5_i64),
            ("a", "minecraft:mined:minecraft:stone", 9),
            ("a", "minecraft:custom:minecraft:play_time", 100),
            ("b", "minecraft:custom:minecraft:jump", 2),
        ] {
            sqlx::query(
                "INSERT INTO player_stats (player_uuid, stat_key, value, last_updated) VALUES (?, ?, ?, 0)",
            )
            .bind(uuid)
            .bind(key)
            .bind(value)
            .execute(store.pool())
            .await
            .unwrap();
        }
        sqlx::query(
            "INSERT INTO player_advancements (player_uuid, advancement_key, value, last_updated) VALUES ('a', 'minecraft:story/root', ?, 0)",
        )
        .bind(br#"{"done":true}"#.to_vec())
        .execute(store.pool())
        .await
        .unwrap();
    }

    fn keys(values: &[&str]) -> FilterKeys {
        FilterKeys::from_raw(Some(values.iter().map(|v| v.to_string()).collect())).unwrap()
    }

    #[tokio::test]
    async fn stats_page_is_key_ordered_and_filterable() {
        let (_dir, store) = temp_store().await;
        seed(&store).await;
        let window = PageWindow {
            page: 1,
            limit: 2,
            offset: 0,
        };
        let page = store.fetch_stats("a", None, window).await.unwrap();
        assert_eq!(
            page.iter().map(|s| s.key.as_str()).collect::<Vec<_>>(),
            vec![
                "minecraft:custom:minecraft:jump",
                "minecraft:custom:minecraft:play_time"
            ]
        );
        assert_eq!(store.count_stats("a", None).await.unwrap(), 3);

        let filter = keys(&["minecraft:mined:minecraft:stone", "unknown"]);
        assert_eq!(store.count_stats("a", Some(&filter)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn advancement_blob_reads_back_as_text() {
        let (_dir, store) = temp_store().await;
        seed(&store).await;
        let window = PageWindow {
            page: 1,
            limit: 10,
            offset: 0,
        };
        let rows = store.fetch_advancements("a", None, window).await.unwrap();
        assert_eq!(rows[0].value, r#"{"done":true}"#);
    }

    #[tokio::test]
    async fn batch_lookup_only_returns_players_with_rows() {
        let (_dir, store) = temp_store().await;
        seed(&store).await;
        let players: BTreeSet<String> = ["a", "b", "c"].iter().map(|v| v.to_string()).collect();
        let stats = store
            .stats_for_players(&players, &keys(&["minecraft:custom:minecraft:jump"]))
            .await
            .unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["b"]["minecraft:custom:minecraft:jump"], 2);

        let totals = store.data_totals().await.unwrap();
        assert_eq!(totals.stats_total, 4);
        assert_eq!(totals.advancements_total, 1);
        assert_eq!(totals.mtr_logs_total, 0);
    }
}
