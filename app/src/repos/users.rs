use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
};

use crate::models::user::{ActiveModel, Entity as UserEntity, Model as User};

pub struct UsersRepo {
    db: DatabaseConnection,
}

impl UsersRepo {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: String, email: String, role: String) -> Result<User, DbErr> {
        let user_model = ActiveModel {
            name: Set(name),
            email: Set(email),
            role: Set(role),
            ..Default::default()
        };

        let user = user_model.insert(&self.db).await?;

        Ok(user)
    }

    pub async fn get_all(&self) -> Result<Vec<User>, DbErr> {
        let users = UserEntity::find().all(&self.db).await?;

        Ok(users)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        let count = UserEntity::find().count(&self.db).await?;

        Ok(count)
    }
}
