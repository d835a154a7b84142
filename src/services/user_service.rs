use serde_json::Value;
use std::sync::Arc;

use super::ServiceResult;
use crate::auth::password::hash_password;
use crate::database::UserRepository;
use crate::entities::{AddedUser, RegisterUser};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    pub async fn register_user(&self, payload: &Value) -> ServiceResult<AddedUser> {
        let mut user = RegisterUser::new(payload)?;
        self.users.verify_available_username(&user.username).await?;

        user.password = hash_password(std::mem::take(&mut user.password), self.bcrypt_cost).await?;
        Ok(self.users.add_user(&user).await?)
    }
}
