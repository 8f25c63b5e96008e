use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::repos::users::UsersRepo;

const DEFAULT_USERS: [(&str, &str); 2] = [
    ("Alice Engineer", "alice@example.com"),
    ("Bob Manager", "bob@example.com"),
];

pub async fn seed_default_users(db: &DatabaseConnection) -> Result<(), DbErr> {
    let users_repo = UsersRepo::new(db.clone());
    if users_repo.count().await? > 0 {
        return Ok(());
    }

    info!("Seeding initial users");
    for (name, email) in DEFAULT_USERS {
        let user = users_repo
            .create(name.to_string(), email.to_string(), "user".to_string())
            .await?;
        info!("Created default user: {}", user.name);
    }

    Ok(())
}
