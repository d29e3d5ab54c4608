//! Tag API endpoints.

use axum::{extract::State, Json};
use entities::NewTag;
use rpc_protocol::{requests::*, responses::*, TagData};

use super::OptionalJson;
use crate::error::ServerResult;
use crate::services::tags;
use crate::state::SharedState;

fn entity_to_rpc_tag(tag: &entities::Tag) -> TagData {
    TagData {
        id: tag.id,
        title: tag.title.clone(),
        category: tag.category.clone(),
    }
}

pub async fn create_tag(
    State(state): State<SharedState>,
    Json(request): Json<CreateTagRequest>,
) -> ServerResult<Json<TagResponse>> {
    let mut new_tag = NewTag::new(request.title);
    if let Some(category) = request.category {
        new_tag = new_tag.with_category(category);
    }

    let mut uow = state.write().await?;
    let tag = tags::create_tag(&mut uow, &new_tag).await?;
    uow.commit().await?;

    Ok(Json(TagResponse {
        tag: entity_to_rpc_tag(&tag),
    }))
}

pub async fn get_tag(
    State(state): State<SharedState>,
    Json(request): Json<GetTagRequest>,
) -> ServerResult<Json<TagResponse>> {
    let mut uow = state.read().await?;
    let tag = tags::get_tag(&mut uow, request.tag_id).await?;
    uow.commit().await?;

    Ok(Json(TagResponse {
        tag: entity_to_rpc_tag(&tag),
    }))
}

pub async fn list_tags(
    State(state): State<SharedState>,
    OptionalJson(request): OptionalJson<ListTagsRequest>,
) -> ServerResult<Json<TagsResponse>> {
    let mut uow = state.read().await?;
    let list = tags::list_tags(&mut uow, request.category.as_deref()).await?;
    uow.commit().await?;

    Ok(Json(TagsResponse {
        tags: list.iter().map(entity_to_rpc_tag).collect(),
    }))
}
