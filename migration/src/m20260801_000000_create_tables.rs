use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table("users")
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string("name"))
                    .col(string("email").unique_key())
                    .col(string("role").default("user"))
                    .to_owned(),
            )
            .await?;

        // tasks
        manager
            .create_table(
                Table::create()
                    .table("tasks")
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string("title"))
                    .col(string_null("description"))
                    .col(integer("assignee_id"))
                    .col(date("due_date"))
                    .col(string("status").default("PENDING"))
                    .col(timestamp_with_time_zone_null("last_chased_at"))
                    .col(integer("chase_count").default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_users")
                            .from("tasks", "assignee_id")
                            .to("users", "id"),
                    )
                    .to_owned(),
            )
            .await?;

        // logs
        manager
            .create_table(
                Table::create()
                    .table("logs")
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(integer("task_id"))
                    .col(string("chase_type"))
                    .col(text("message_sent"))
                    .col(
                        timestamp_with_time_zone("timestamp")
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_tasks")
                            .from("logs", "task_id")
                            .to("tasks", "id")
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table("logs").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("tasks").to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table("users").to_owned())
            .await?;

        Ok(())
    }
}
