//! User, personal-info and user-tag queries.

use entities::{NewUser, PersonalInfo, User};

use crate::{
    events,
    rows::{PersonalInfoRow, UserRow},
    StoreError, StoreResult, UnitOfWork,
};

/// Inserts a user together with its personal info.
pub async fn insert_user(uow: &mut UnitOfWork, user: &NewUser) -> StoreResult<User> {
    let conn = uow.writer()?;

    let result = sqlx::query(
        "INSERT INTO users (subject, provider, username, email, profile_completed, \
         profile_description)
         VALUES (?, ?, ?, ?, 0, ?)",
    )
    .bind(&user.subject)
    .bind(&user.provider)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.profile_description)
    .execute(&mut *conn)
    .await
    .map_err(|e| StoreError::from_write("User", e))?;

    let id = result.last_insert_rowid();

    sqlx::query(
        "INSERT INTO user_personal_info (user_id, full_name, avatar, member_since)
         VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&user.full_name)
    .bind(&user.avatar)
    .bind(user.member_since)
    .execute(&mut *conn)
    .await?;

    Ok(User {
        id,
        subject: user.subject.clone(),
        provider: user.provider.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
        profile_completed: false,
        profile_description: user.profile_description.clone(),
        tag_ids: Vec::new(),
    })
}

/// Gets a user by ID
pub async fn find_user(uow: &mut UnitOfWork, id: i64) -> StoreResult<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(
        "SELECT id, subject, provider, username, email, profile_completed, profile_description
         FROM users
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(uow.reader())
    .await?;

    match row {
        Some(row) => {
            let tag_ids = user_tag_ids(uow, row.id).await?;
            Ok(Some(row.into_user(tag_ids)))
        }
        None => Ok(None),
    }
}

/// Gets a user by username (without the handle prefix)
pub async fn find_user_by_username(
    uow: &mut UnitOfWork,
    username: &str,
) -> StoreResult<Option<User>> {
    let row: Option<UserRow> = sqlx::query_as(
        "SELECT id, subject, provider, username, email, profile_completed, profile_description
         FROM users
         WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(uow.reader())
    .await?;

    match row {
        Some(row) => {
            let tag_ids = user_tag_ids(uow, row.id).await?;
            Ok(Some(row.into_user(tag_ids)))
        }
        None => Ok(None),
    }
}

/// Returns true if a user with `id` exists
pub async fn user_exists(uow: &mut UnitOfWork, id: i64) -> StoreResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
        .bind(id)
        .fetch_one(uow.reader())
        .await?;
    Ok(exists)
}

/// Writes the mutable profile columns of a user
pub async fn update_user(uow: &mut UnitOfWork, user: &User) -> StoreResult<()> {
    sqlx::query(
        "UPDATE users SET profile_completed = ?, profile_description = ?
         WHERE id = ?",
    )
    .bind(user.profile_completed)
    .bind(&user.profile_description)
    .bind(user.id)
    .execute(uow.writer()?)
    .await?;
    Ok(())
}

/// Gets the personal info owned by a user
pub async fn find_personal_info(
    uow: &mut UnitOfWork,
    user_id: i64,
) -> StoreResult<Option<PersonalInfo>> {
    let row: Option<PersonalInfoRow> = sqlx::query_as(
        "SELECT user_id, full_name, avatar, member_since
         FROM user_personal_info
         WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(uow.reader())
    .await?;

    Ok(row.map(PersonalInfo::from))
}

/// Writes a user's personal info
pub async fn update_personal_info(uow: &mut UnitOfWork, info: &PersonalInfo) -> StoreResult<()> {
    sqlx::query(
        "UPDATE user_personal_info SET full_name = ?, avatar = ?, member_since = ?
         WHERE user_id = ?",
    )
    .bind(&info.full_name)
    .bind(&info.avatar)
    .bind(info.member_since)
    .bind(info.user_id)
    .execute(uow.writer()?)
    .await?;
    Ok(())
}

/// Deletes a user and everything that depends on it: owned events,
/// memberships, subscription edges, tag links and personal info.
///
/// Returns false if the user did not exist.
pub async fn delete_user(uow: &mut UnitOfWork, id: i64) -> StoreResult<bool> {
    let owned: Vec<(i64,)> = sqlx::query_as("SELECT id FROM events WHERE owner_id = ?")
        .bind(id)
        .fetch_all(uow.writer()?)
        .await?;
    for (event_id,) in owned {
        events::delete_event(uow, event_id).await?;
    }

    let conn = uow.writer()?;

    sqlx::query("DELETE FROM event_members WHERE user_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM user_subscriptions WHERE subscriber_id = ? OR target_id = ?")
        .bind(id)
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM user_tags WHERE user_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM user_personal_info WHERE user_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Attaches a tag to a user. Returns false if it was already attached.
pub async fn add_user_tag(uow: &mut UnitOfWork, user_id: i64, tag_id: i64) -> StoreResult<bool> {
    let result = sqlx::query("INSERT OR IGNORE INTO user_tags (user_id, tag_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(tag_id)
        .execute(uow.writer()?)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Detaches a tag from a user. Returns false if it was not attached.
pub async fn remove_user_tag(
    uow: &mut UnitOfWork,
    user_id: i64,
    tag_id: i64,
) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM user_tags WHERE user_id = ? AND tag_id = ?")
        .bind(user_id)
        .bind(tag_id)
        .execute(uow.writer()?)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Gets the IDs of the tags attached to a user
pub async fn user_tag_ids(uow: &mut UnitOfWork, user_id: i64) -> StoreResult<Vec<i64>> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT tag_id FROM user_tags WHERE user_id = ? ORDER BY tag_id")
            .bind(user_id)
            .fetch_all(uow.reader())
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Attaches tag IDs to user rows.
pub(crate) async fn hydrate_users(
    uow: &mut UnitOfWork,
    rows: Vec<UserRow>,
) -> StoreResult<Vec<User>> {
    let mut users = Vec::with_capacity(rows.len());
    for row in rows {
        let tag_ids = user_tag_ids(uow, row.id).await?;
        users.push(row.into_user(tag_ids));
    }
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tags, Database};
    use entities::NewTag;

    fn alice() -> NewUser {
        NewUser::new("sub-alice", "google", "alice", "a@x.com", "Alice Liddell")
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let user = insert_user(&mut uow, &alice()).await.unwrap();
        let found = find_user(&mut uow, user.id).await.unwrap().unwrap();
        assert_eq!(found, user);

        let by_name = find_user_by_username(&mut uow, "alice").await.unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(user.id));

        let info = find_personal_info(&mut uow, user.id).await.unwrap().unwrap();
        assert_eq!(info.full_name, "Alice Liddell");
        assert!(info.member_since.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_reported() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        insert_user(&mut uow, &alice()).await.unwrap();
        let clash = NewUser::new("sub-other", "google", "other", "a@x.com", "Other");
        let err = insert_user(&mut uow, &clash).await.unwrap_err();

        match err {
            StoreError::AlreadyExists { entity_type, field } => {
                assert_eq!(entity_type, "User");
                assert_eq!(field, "email");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_avatar_round_trips_as_blob() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let avatar = vec![0x89, b'P', b'N', b'G', 0x00, 0xff];
        let user = insert_user(&mut uow, &alice().with_avatar(avatar.clone()))
            .await
            .unwrap();

        let info = find_personal_info(&mut uow, user.id).await.unwrap().unwrap();
        assert_eq!(info.avatar, Some(avatar));
    }

    #[tokio::test]
    async fn test_user_tags() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let user = insert_user(&mut uow, &alice()).await.unwrap();
        let tag = tags::insert_tag(&mut uow, &NewTag::new("hiking")).await.unwrap();

        assert!(add_user_tag(&mut uow, user.id, tag.id).await.unwrap());
        assert!(!add_user_tag(&mut uow, user.id, tag.id).await.unwrap());
        assert_eq!(user_tag_ids(&mut uow, user.id).await.unwrap(), vec![tag.id]);

        assert!(remove_user_tag(&mut uow, user.id, tag.id).await.unwrap());
        assert!(user_tag_ids(&mut uow, user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_removes_personal_info() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let user = insert_user(&mut uow, &alice()).await.unwrap();
        assert!(delete_user(&mut uow, user.id).await.unwrap());

        assert!(!user_exists(&mut uow, user.id).await.unwrap());
        assert!(find_personal_info(&mut uow, user.id).await.unwrap().is_none());
        assert!(!delete_user(&mut uow, user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_only_unit_of_work_rejects_writes() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin_read_only().await.unwrap();

        let err = insert_user(&mut uow, &alice()).await.unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
        uow.commit().await.unwrap();

        let mut uow = db.begin_read_only().await.unwrap();
        assert!(find_user_by_username(&mut uow, "alice").await.unwrap().is_none());
    }
}
