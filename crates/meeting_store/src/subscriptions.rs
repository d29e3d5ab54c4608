//! Directed subscription edges between users.
//!
//! Each edge is a single row `(subscriber_id, target_id)`. The two lookup
//! directions, "whom does a user follow" and "who follows a user", are
//! served by the primary key and by `idx_user_subscriptions_target`, so
//! they can never disagree.

use entities::User;

use crate::{rows::UserRow, users::hydrate_users, StoreResult, UnitOfWork};

/// Inserts the edge `subscriber_id -> target_id`. Returns false if it
/// already existed.
pub async fn insert_subscription(
    uow: &mut UnitOfWork,
    subscriber_id: i64,
    target_id: i64,
) -> StoreResult<bool> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO user_subscriptions (subscriber_id, target_id) VALUES (?, ?)",
    )
    .bind(subscriber_id)
    .bind(target_id)
    .execute(uow.writer()?)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Deletes the edge `subscriber_id -> target_id`. Returns false if it did
/// not exist.
pub async fn delete_subscription(
    uow: &mut UnitOfWork,
    subscriber_id: i64,
    target_id: i64,
) -> StoreResult<bool> {
    let result = sqlx::query(
        "DELETE FROM user_subscriptions WHERE subscriber_id = ? AND target_id = ?",
    )
    .bind(subscriber_id)
    .bind(target_id)
    .execute(uow.writer()?)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns true if the edge `subscriber_id -> target_id` exists.
pub async fn subscription_exists(
    uow: &mut UnitOfWork,
    subscriber_id: i64,
    target_id: i64,
) -> StoreResult<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(
             SELECT 1 FROM user_subscriptions WHERE subscriber_id = ? AND target_id = ?
         )",
    )
    .bind(subscriber_id)
    .bind(target_id)
    .fetch_one(uow.reader())
    .await?;

    Ok(exists)
}

/// Users that `user_id` is subscribed to, ordered by ID.
pub async fn find_subscriptions(uow: &mut UnitOfWork, user_id: i64) -> StoreResult<Vec<User>> {
    let rows: Vec<UserRow> = sqlx::query_as(
        "SELECT u.id, u.subject, u.provider, u.username, u.email, u.profile_completed,
                u.profile_description
         FROM user_subscriptions s
         JOIN users u ON u.id = s.target_id
         WHERE s.subscriber_id = ?
         ORDER BY u.id",
    )
    .bind(user_id)
    .fetch_all(uow.reader())
    .await?;

    hydrate_users(uow, rows).await
}

/// Users subscribed to `user_id`, ordered by ID.
pub async fn find_subscribers(uow: &mut UnitOfWork, user_id: i64) -> StoreResult<Vec<User>> {
    let rows: Vec<UserRow> = sqlx::query_as(
        "SELECT u.id, u.subject, u.provider, u.username, u.email, u.profile_completed,
                u.profile_description
         FROM user_subscriptions s
         JOIN users u ON u.id = s.subscriber_id
         WHERE s.target_id = ?
         ORDER BY u.id",
    )
    .bind(user_id)
    .fetch_all(uow.reader())
    .await?;

    hydrate_users(uow, rows).await
}

/// IDs of the users subscribed to `user_id`.
pub async fn subscriber_ids(uow: &mut UnitOfWork, user_id: i64) -> StoreResult<Vec<i64>> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT subscriber_id FROM user_subscriptions WHERE target_id = ? ORDER BY subscriber_id",
    )
    .bind(user_id)
    .fetch_all(uow.reader())
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{users::insert_user, Database};
    use entities::NewUser;

    async fn seed(uow: &mut UnitOfWork) -> (User, User) {
        let alice = insert_user(
            uow,
            &NewUser::new("sub-a", "google", "alice", "a@x.com", "Alice"),
        )
        .await
        .unwrap();
        let bob = insert_user(uow, &NewUser::new("sub-b", "google", "bob", "b@x.com", "Bob"))
            .await
            .unwrap();
        (alice, bob)
    }

    #[tokio::test]
    async fn test_edge_is_visible_from_both_directions() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();
        let (alice, bob) = seed(&mut uow).await;

        assert!(insert_subscription(&mut uow, alice.id, bob.id).await.unwrap());
        assert!(!insert_subscription(&mut uow, alice.id, bob.id).await.unwrap());

        assert!(subscription_exists(&mut uow, alice.id, bob.id).await.unwrap());
        assert!(!subscription_exists(&mut uow, bob.id, alice.id).await.unwrap());

        let following = find_subscriptions(&mut uow, alice.id).await.unwrap();
        assert_eq!(following.iter().map(|u| u.id).collect::<Vec<_>>(), vec![bob.id]);

        let followers = find_subscribers(&mut uow, bob.id).await.unwrap();
        assert_eq!(followers.iter().map(|u| u.id).collect::<Vec<_>>(), vec![alice.id]);
        assert_eq!(subscriber_ids(&mut uow, bob.id).await.unwrap(), vec![alice.id]);
    }

    #[tokio::test]
    async fn test_delete_subscription() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();
        let (alice, bob) = seed(&mut uow).await;

        insert_subscription(&mut uow, alice.id, bob.id).await.unwrap();
        assert!(delete_subscription(&mut uow, alice.id, bob.id).await.unwrap());
        assert!(!delete_subscription(&mut uow, alice.id, bob.id).await.unwrap());
        assert!(find_subscribers(&mut uow, bob.id).await.unwrap().is_empty());
    }
}
