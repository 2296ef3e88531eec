use std::sync::Arc;

use async_trait::async_trait;
use backend_domain::ports::{HealthCheckService, ReadOnlySqlRepository};

pub struct DefaultHealthService {
    sql: Arc<dyn ReadOnlySqlRepository>,
}

impl DefaultHealthService {
    pub fn new(sql: Arc<dyn ReadOnlySqlRepository>) -> Self {
        Self { sql }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_database(&self) -> anyhow::Result<bool> {
        self.sql.ping().await.map(|_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::sqlite_store::test_support::temp_store;

    #[tokio::test]
    async fn open_store_is_healthy() {
        let (_dir, store) = temp_store().await;
        let service = DefaultHealthService::new(Arc::new(store.clone()));
        assert!(service.check_database().await.unwrap());

        store.close().await;
        assert!(service.check_database().await.is_err());
    }
}
