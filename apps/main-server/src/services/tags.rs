use entities::{NewTag, Tag};
use meeting_store::{tags, StoreError, StoreResult, UnitOfWork};

pub async fn create_tag(uow: &mut UnitOfWork, new_tag: &NewTag) -> StoreResult<Tag> {
    new_tag.validate()?;
    let tag = tags::insert_tag(uow, new_tag).await?;

    tracing::info!(tag_id = tag.id, title = %tag.title, "Tag created");

    Ok(tag)
}

pub async fn get_tag(uow: &mut UnitOfWork, id: i64) -> StoreResult<Tag> {
    tags::find_tag(uow, id)
        .await?
        .ok_or_else(|| StoreError::not_found("Tag", id))
}

/// Lists tags, optionally restricted to one category.
pub async fn list_tags(uow: &mut UnitOfWork, category: Option<&str>) -> StoreResult<Vec<Tag>> {
    tags::list_tags(uow, category).await
}

#[cfg(test)]
mod tests {
    use meeting_store::Database;

    use super::*;

    #[tokio::test]
    async fn test_create_and_list_tags() {
        let db = Database::in_memory().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let rock = create_tag(&mut uow, &NewTag::new("rock").with_category("music"))
            .await
            .unwrap();
        create_tag(&mut uow, &NewTag::new("hiking")).await.unwrap();

        assert_eq!(get_tag(&mut uow, rock.id).await.unwrap(), rock);
        assert_eq!(list_tags(&mut uow, None).await.unwrap().len(), 2);

        let music = list_tags(&mut uow, Some("music")).await.unwrap();
        assert_eq!(music, vec![rock]);

        assert!(get_tag(&mut uow, 999).await.unwrap_err().is_not_found());
        let err = create_tag(&mut uow, &NewTag::new("")).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
