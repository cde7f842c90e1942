//! Device result repository.
//!
//! A NULL device name is grouped with the empty name so both map to a
//! single `device_name=""` series.

use async_trait::async_trait;
use sqlx::Connection;

use crate::Result;
use crate::database::LogStore;
use crate::database::models::DeviceResultDbModel;

/// Latest device result per device, ignoring unfinished backups.
const LATEST_COMPLETED_SQL: &str = r#"
    SELECT IFNULL(device_name, '') AS device_name,
           IFNULL(status, 0) AS status,
           IFNULL(time_start, 0) AS time_start,
           IFNULL(time_end, 0) AS time_end,
           IFNULL(transfered_bytes, 0) AS transfered_bytes
    FROM device_result_table
    WHERE device_result_id IN (
        SELECT MAX(device_result_id) FROM device_result_table
        WHERE time_end != 0
        GROUP BY IFNULL(device_name, '')
    )
    ORDER BY device_name
"#;

/// Latest device result per device, finished or not.
const LATEST_ANY_SQL: &str = r#"
    SELECT IFNULL(device_name, '') AS device_name,
           IFNULL(status, 0) AS status,
           IFNULL(time_start, 0) AS time_start,
           IFNULL(time_end, 0) AS time_end,
           IFNULL(transfered_bytes, 0) AS transfered_bytes
    FROM device_result_table
    WHERE device_result_id IN (
        SELECT MAX(device_result_id) FROM device_result_table
        GROUP BY IFNULL(device_name, '')
    )
    ORDER BY device_name
"#;

/// Device result repository trait.
#[async_trait]
pub trait DeviceResultRepository: Send + Sync {
    /// One row per device: the one with the highest `device_result_id`.
    async fn latest_device_results(&self) -> Result<Vec<DeviceResultDbModel>>;
}

/// SQLx implementation of DeviceResultRepository.
pub struct SqlxDeviceResultRepository {
    store: LogStore,
    require_completed: bool,
}

impl SqlxDeviceResultRepository {
    pub fn new(store: LogStore, require_completed: bool) -> Self {
        Self {
            store,
            require_completed,
        }
    }

    fn sql(&self) -> &'static str {
        if self.require_completed {
            LATEST_COMPLETED_SQL
        } else {
            LATEST_ANY_SQL
        }
    }
}

#[async_trait]
impl DeviceResultRepository for SqlxDeviceResultRepository {
    async fn latest_device_results(&self) -> Result<Vec<DeviceResultDbModel>> {
        let mut conn = self.store.connect().await?;
        let results = sqlx::query_as::<_, DeviceResultDbModel>(self.sql())
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;
        Ok(results)
    }
}
