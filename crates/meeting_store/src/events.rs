//! Event, membership and event-tag queries.

use chrono::NaiveDate;
use entities::{Event, NewEvent};
use sqlx::{QueryBuilder, Sqlite};

use crate::{rows::EventRow, StoreResult, UnitOfWork};

/// Filter options for listing events
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Filter by owner
    pub owner_id: Option<i64>,
    /// Filter by active flag
    pub is_active: Option<bool>,
}

impl EventFilter {
    /// Creates a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by owner
    pub fn with_owner(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Filters by active flag
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

/// Inserts an event owned by `owner_id`, with its tags and members.
pub async fn insert_event(
    uow: &mut UnitOfWork,
    owner_id: i64,
    event: &NewEvent,
) -> StoreResult<Event> {
    let result = sqlx::query(
        "INSERT INTO events (owner_id, title, description, creation_date, end_date, is_active)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(owner_id)
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.creation_date)
    .bind(event.end_date)
    .bind(event.is_active)
    .execute(uow.writer()?)
    .await?;

    let id = result.last_insert_rowid();
    replace_event_tags(uow, id, &event.tag_ids).await?;
    replace_event_members(uow, id, &event.member_ids).await?;

    let tag_ids = event_tag_ids(uow, id).await?;
    let member_ids = event_member_ids(uow, id).await?;

    Ok(Event {
        id,
        owner_id,
        title: event.title.clone(),
        description: event.description.clone(),
        creation_date: event.creation_date,
        end_date: event.end_date,
        is_active: event.is_active,
        tag_ids,
        member_ids,
    })
}

/// Gets an event by ID
pub async fn find_event(uow: &mut UnitOfWork, id: i64) -> StoreResult<Option<Event>> {
    let row: Option<EventRow> = sqlx::query_as(
        "SELECT id, owner_id, title, description, creation_date, end_date, is_active
         FROM events
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(uow.reader())
    .await?;

    match row {
        Some(row) => {
            let tag_ids = event_tag_ids(uow, row.id).await?;
            let member_ids = event_member_ids(uow, row.id).await?;
            Ok(Some(row.into_event(tag_ids, member_ids)))
        }
        None => Ok(None),
    }
}

/// Returns true if an event with `id` exists
pub async fn event_exists(uow: &mut UnitOfWork, id: i64) -> StoreResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = ?)")
        .bind(id)
        .fetch_one(uow.reader())
        .await?;
    Ok(exists)
}

/// Lists events matching `filter`, ordered by ID
pub async fn list_events(uow: &mut UnitOfWork, filter: &EventFilter) -> StoreResult<Vec<Event>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, owner_id, title, description, creation_date, end_date, is_active
         FROM events
         WHERE 1 = 1",
    );
    if let Some(owner_id) = filter.owner_id {
        query.push(" AND owner_id = ").push_bind(owner_id);
    }
    if let Some(is_active) = filter.is_active {
        query.push(" AND is_active = ").push_bind(is_active);
    }
    query.push(" ORDER BY id");

    let rows: Vec<EventRow> = query.build_query_as().fetch_all(uow.reader()).await?;

    let mut events = Vec::with_capacity(rows.len());
    for row in rows {
        let tag_ids = event_tag_ids(uow, row.id).await?;
        let member_ids = event_member_ids(uow, row.id).await?;
        events.push(row.into_event(tag_ids, member_ids));
    }

    Ok(events)
}

/// Writes the scalar columns of an event. Tags and members are written by
/// [`replace_event_tags`] and [`replace_event_members`].
pub async fn update_event(uow: &mut UnitOfWork, event: &Event) -> StoreResult<()> {
    sqlx::query(
        "UPDATE events SET title = ?, description = ?, end_date = ?, is_active = ?
         WHERE id = ?",
    )
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.end_date)
    .bind(event.is_active)
    .bind(event.id)
    .execute(uow.writer()?)
    .await?;
    Ok(())
}

/// Replaces the tag set of an event
pub async fn replace_event_tags(
    uow: &mut UnitOfWork,
    event_id: i64,
    tag_ids: &[i64],
) -> StoreResult<()> {
    let conn = uow.writer()?;

    sqlx::query("DELETE FROM event_tags WHERE event_id = ?")
        .bind(event_id)
        .execute(&mut *conn)
        .await?;

    for tag_id in tag_ids {
        sqlx::query("INSERT OR IGNORE INTO event_tags (event_id, tag_id) VALUES (?, ?)")
            .bind(event_id)
            .bind(tag_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Replaces the member set of an event
pub async fn replace_event_members(
    uow: &mut UnitOfWork,
    event_id: i64,
    member_ids: &[i64],
) -> StoreResult<()> {
    let conn = uow.writer()?;

    sqlx::query("DELETE FROM event_members WHERE event_id = ?")
        .bind(event_id)
        .execute(&mut *conn)
        .await?;

    for user_id in member_ids {
        sqlx::query("INSERT OR IGNORE INTO event_members (event_id, user_id) VALUES (?, ?)")
            .bind(event_id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Adds a member. Returns false if the user already was one.
pub async fn add_member(uow: &mut UnitOfWork, event_id: i64, user_id: i64) -> StoreResult<bool> {
    let result =
        sqlx::query("INSERT OR IGNORE INTO event_members (event_id, user_id) VALUES (?, ?)")
            .bind(event_id)
            .bind(user_id)
            .execute(uow.writer()?)
            .await?;
    Ok(result.rows_affected() > 0)
}

/// Removes a member. Returns false if the user was not one.
pub async fn remove_member(
    uow: &mut UnitOfWork,
    event_id: i64,
    user_id: i64,
) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM event_members WHERE event_id = ? AND user_id = ?")
        .bind(event_id)
        .bind(user_id)
        .execute(uow.writer()?)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Gets the IDs of an event's members
pub async fn event_member_ids(uow: &mut UnitOfWork, event_id: i64) -> StoreResult<Vec<i64>> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT user_id FROM event_members WHERE event_id = ? ORDER BY user_id")
            .bind(event_id)
            .fetch_all(uow.reader())
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Gets the IDs of an event's tags
pub async fn event_tag_ids(uow: &mut UnitOfWork, event_id: i64) -> StoreResult<Vec<i64>> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT tag_id FROM event_tags WHERE event_id = ? ORDER BY tag_id")
            .bind(event_id)
            .fetch_all(uow.reader())
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Marks every active event whose `end_date` is before `cutoff` as
/// inactive. Returns the number of events changed.
pub async fn deactivate_ended_before(uow: &mut UnitOfWork, cutoff: NaiveDate) -> StoreResult<u64> {
    let result = sqlx::query("UPDATE events SET is_active = 0 WHERE is_active = 1 AND end_date < ?")
        .bind(cutoff)
        .execute(uow.writer()?)
        .await?;

    Ok(result.rows_affected())
}

/// Deletes an event with its members and tags. Returns false if the event
/// did not exist.
pub async fn delete_event(uow: &mut UnitOfWork, id: i64) -> StoreResult<bool> {
    let conn = uow.writer()?;

    sqlx::query("DELETE FROM event_members WHERE event_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM event_tags WHERE event_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tags::insert_tag, users::insert_user, Database};
    use entities::{NewTag, NewUser};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn owner(uow: &mut UnitOfWork) -> i64 {
        insert_user(uow, &NewUser::new("sub-a", "google", "alice", "a@x.com", "Alice"))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_insert_event_with_tags_and_members() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();
        let owner_id = owner(&mut uow).await;
        let tag = insert_tag(&mut uow, &NewTag::new("music")).await.unwrap();

        let draft = NewEvent::new("Concert", date(2024, 6, 2))
            .with_creation_date(date(2024, 6, 1))
            .with_tags(vec![tag.id, tag.id])
            .with_members(vec![owner_id]);
        let event = insert_event(&mut uow, owner_id, &draft).await.unwrap();

        assert_eq!(event.tag_ids, vec![tag.id]);
        assert_eq!(event.member_ids, vec![owner_id]);
        assert_eq!(find_event(&mut uow, event.id).await.unwrap(), Some(event));
    }

    #[tokio::test]
    async fn test_list_events_filters() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();
        let owner_id = owner(&mut uow).await;

        let active = insert_event(
            &mut uow,
            owner_id,
            &NewEvent::new("Active", date(2024, 6, 2)).with_creation_date(date(2024, 6, 1)),
        )
        .await
        .unwrap();
        let inactive = insert_event(
            &mut uow,
            owner_id,
            &NewEvent::new("Inactive", date(2024, 6, 2))
                .with_creation_date(date(2024, 6, 1))
                .with_active(false),
        )
        .await
        .unwrap();

        let listed = list_events(&mut uow, &EventFilter::new().with_active(true))
            .await
            .unwrap();
        assert_eq!(listed, vec![active.clone()]);

        let listed = list_events(&mut uow, &EventFilter::new().with_active(false))
            .await
            .unwrap();
        assert_eq!(listed, vec![inactive.clone()]);

        let listed = list_events(&mut uow, &EventFilter::new().with_owner(owner_id))
            .await
            .unwrap();
        assert_eq!(listed, vec![active, inactive]);

        let listed = list_events(&mut uow, &EventFilter::new().with_owner(owner_id + 1))
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_ended_before() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();
        let owner_id = owner(&mut uow).await;

        let event = insert_event(
            &mut uow,
            owner_id,
            &NewEvent::new("Fair", date(2024, 6, 10)).with_creation_date(date(2024, 6, 1)),
        )
        .await
        .unwrap();

        // end_date equal to the cutoff is not yet expired
        assert_eq!(deactivate_ended_before(&mut uow, date(2024, 6, 10)).await.unwrap(), 0);
        assert_eq!(deactivate_ended_before(&mut uow, date(2024, 6, 11)).await.unwrap(), 1);
        assert_eq!(deactivate_ended_before(&mut uow, date(2024, 6, 11)).await.unwrap(), 0);

        let event = find_event(&mut uow, event.id).await.unwrap().unwrap();
        assert!(!event.is_active);
    }

    #[tokio::test]
    async fn test_membership_and_delete() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();
        let owner_id = owner(&mut uow).await;

        let event = insert_event(
            &mut uow,
            owner_id,
            &NewEvent::new("Hike", date(2024, 6, 2)).with_creation_date(date(2024, 6, 1)),
        )
        .await
        .unwrap();

        assert!(add_member(&mut uow, event.id, owner_id).await.unwrap());
        assert!(!add_member(&mut uow, event.id, owner_id).await.unwrap());
        assert_eq!(event_member_ids(&mut uow, event.id).await.unwrap(), vec![owner_id]);
        assert!(remove_member(&mut uow, event.id, owner_id).await.unwrap());
        assert!(!remove_member(&mut uow, event.id, owner_id).await.unwrap());

        add_member(&mut uow, event.id, owner_id).await.unwrap();
        assert!(delete_event(&mut uow, event.id).await.unwrap());
        assert!(!event_exists(&mut uow, event.id).await.unwrap());
        assert!(event_member_ids(&mut uow, event.id).await.unwrap().is_empty());
    }
}
