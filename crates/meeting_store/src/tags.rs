//! Tag queries.

use entities::{NewTag, Tag};

use crate::{rows::TagRow, StoreResult, UnitOfWork};

/// Inserts a new tag
pub async fn insert_tag(uow: &mut UnitOfWork, tag: &NewTag) -> StoreResult<Tag> {
    let result = sqlx::query("INSERT INTO tags (title, category) VALUES (?, ?)")
        .bind(&tag.title)
        .bind(&tag.category)
        .execute(uow.writer()?)
        .await?;

    Ok(Tag {
        id: result.last_insert_rowid(),
        title: tag.title.clone(),
        category: tag.category.clone(),
    })
}

/// Gets a tag by ID
pub async fn find_tag(uow: &mut UnitOfWork, id: i64) -> StoreResult<Option<Tag>> {
    let row: Option<TagRow> = sqlx::query_as("SELECT id, title, category FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(uow.reader())
        .await?;

    Ok(row.map(Tag::from))
}

/// Returns true if a tag with `id` exists
pub async fn tag_exists(uow: &mut UnitOfWork, id: i64) -> StoreResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tags WHERE id = ?)")
        .bind(id)
        .fetch_one(uow.reader())
        .await?;
    Ok(exists)
}

/// Lists tags, optionally restricted to one category
pub async fn list_tags(uow: &mut UnitOfWork, category: Option<&str>) -> StoreResult<Vec<Tag>> {
    let rows: Vec<TagRow> = match category {
        Some(category) => {
            sqlx::query_as(
                "SELECT id, title, category FROM tags
                 WHERE category = ?
                 ORDER BY title, id",
            )
            .bind(category)
            .fetch_all(uow.reader())
            .await?
        }
        None => {
            sqlx::query_as("SELECT id, title, category FROM tags ORDER BY title, id")
                .fetch_all(uow.reader())
                .await?
        }
    };

    Ok(rows.into_iter().map(Tag::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_insert_and_list_tags() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let hiking = insert_tag(&mut uow, &NewTag::new("hiking").with_category("outdoor"))
            .await
            .unwrap();
        let chess = insert_tag(&mut uow, &NewTag::new("chess").with_category("games"))
            .await
            .unwrap();

        assert_eq!(find_tag(&mut uow, hiking.id).await.unwrap(), Some(hiking.clone()));
        assert!(tag_exists(&mut uow, chess.id).await.unwrap());
        assert!(!tag_exists(&mut uow, 999).await.unwrap());

        let all = list_tags(&mut uow, None).await.unwrap();
        assert_eq!(all, vec![chess, hiking.clone()]);

        let outdoor = list_tags(&mut uow, Some("outdoor")).await.unwrap();
        assert_eq!(outdoor, vec![hiking]);
    }
}
