//! User lookup port (outbound).

use async_trait::async_trait;

use crate::domain::{models::UserId, RepositoryError, User};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find the user with this login identifier and secret.
    async fn find_by_credentials(
        &self,
        mobile_number: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}
