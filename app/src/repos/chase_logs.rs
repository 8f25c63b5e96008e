use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::models::chase_log::{
    self, ActiveModel, ChaseType, Entity as ChaseLogEntity, Model as ChaseLog,
};

pub struct ChaseLogsRepo {
    db: DatabaseConnection,
}

impl ChaseLogsRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn append(
        &self,
        task_id: i32,
        chase_type: ChaseType,
        message_sent: String,
        timestamp: DateTimeUtc,
    ) -> Result<ChaseLog, DbErr> {
        let log_model = ActiveModel {
            task_id: Set(task_id),
            chase_type: Set(chase_type),
            message_sent: Set(message_sent),
            timestamp: Set(timestamp),
            ..Default::default()
        };

        let log = log_model.insert(&self.db).await?;

        Ok(log)
    }

    pub async fn get_all_for_task(&self, task_id: i32) -> Result<Vec<ChaseLog>, DbErr> {
        let logs = ChaseLogEntity::find()
            .filter(chase_log::Column::TaskId.eq(task_id))
            .order_by_asc(chase_log::Column::Timestamp)
            .all(&self.db)
            .await?;

        Ok(logs)
    }

    pub async fn delete_for_task(&self, task_id: i32) -> Result<u64, DbErr> {
        let result = ChaseLogEntity::delete_many()
            .filter(chase_log::Column::TaskId.eq(task_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
