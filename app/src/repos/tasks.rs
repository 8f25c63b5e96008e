use chrono::NaiveDate;
use sea_orm::{
    prelude::DateTimeUtc, ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::models::{
    task::{self, ActiveModel, Entity as TaskEntity, Model as Task, TaskStatus},
    user::{Entity as UserEntity, Model as User},
};

pub struct TasksRepo {
    db: DatabaseConnection,
}

impl TasksRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: String,
        description: Option<String>,
        assignee_id: i32,
        due_date: NaiveDate,
    ) -> Result<Task, DbErr> {
        let task_model = ActiveModel {
            title: Set(title),
            description: Set(description),
            assignee_id: Set(assignee_id),
            due_date: Set(due_date),
            status: Set(TaskStatus::Pending),
            last_chased_at: Set(None),
            chase_count: Set(0),
            ..Default::default()
        };

        let task = task_model.insert(&self.db).await?;

        Ok(task)
    }

    pub async fn get_all_with_assignees(&self) -> Result<Vec<(Task, Option<User>)>, DbErr> {
        let tasks = TaskEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(task::Column::DueDate)
            .all(&self.db)
            .await?;

        Ok(tasks)
    }

    pub async fn get_with_assignee(&self, task_id: i32) -> Result<Option<(Task, User)>, DbErr> {
        let pair = TaskEntity::find_by_id(task_id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await?;

        Ok(pair.and_then(|(task, assignee)| assignee.map(|a| (task, a))))
    }

    /// Overdue means strictly past due and not completed. No gate on
    /// `last_chased_at`: a task already chased today is selected again.
    pub async fn get_overdue(&self, today: NaiveDate) -> Result<Vec<(Task, User)>, DbErr> {
        let tasks = TaskEntity::find()
            .find_also_related(UserEntity)
            .filter(task::Column::DueDate.lt(today))
            .filter(task::Column::Status.ne(TaskStatus::Completed))
            .order_by_asc(task::Column::DueDate)
            .all(&self.db)
            .await?;

        Ok(tasks
            .into_iter()
            .filter_map(|(task, assignee)| assignee.map(|a| (task, a)))
            .collect())
    }

    pub async fn change_status(&self, task_id: i32, status: TaskStatus) -> Result<Task, DbErr> {
        let task = TaskEntity::find_by_id(task_id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotFound("Task was not found.".to_string()))?;

        let mut task: ActiveModel = task.into();
        task.status = Set(status);
        let updated_task = task.update(&self.db).await?;

        Ok(updated_task)
    }

    pub async fn record_chase(&self, task: &Task, chased_at: DateTimeUtc) -> Result<Task, DbErr> {
        let mut task_model: ActiveModel = task.clone().into();
        task_model.last_chased_at = Set(Some(chased_at));
        task_model.chase_count = Set(task.chase_count + 1);
        let updated_task = task_model.update(&self.db).await?;

        Ok(updated_task)
    }

    pub async fn delete(&self, task_id: i32) -> Result<(), DbErr> {
        let result = TaskEntity::delete_by_id(task_id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DbErr::RecordNotFound("Task was not found.".to_string()));
        }

        Ok(())
    }
}
