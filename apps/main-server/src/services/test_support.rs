//! Fixtures shared by service tests.

use entities::{NewUser, User};
use meeting_store::UnitOfWork;

use super::users;

/// Registers `username` with derived subject, email and full name.
pub(crate) async fn register_user(uow: &mut UnitOfWork, username: &str) -> User {
    let new_user = NewUser::new(
        format!("sub-{username}"),
        "google",
        username,
        format!("{username}@example.com"),
        username.to_uppercase(),
    );
    users::register(uow, &new_user).await.unwrap()
}
