use rocket::serde::json::Json;
use rocket::State;

use crate::error::ApiError;
use crate::models::{Deal, DocumentId};
use crate::repository::DealRepository;
use crate::store::{DeleteAck, InsertAck, UpdateAck};

#[get("/deals")]
pub async fn get_all_deals(deal_repo: &State<DealRepository>) -> Result<Json<Vec<Deal>>, ApiError> {
    Ok(Json(deal_repo.get_all_deals().await?))
}

#[get("/myProduct?<email>")]
pub async fn get_my_products(
    deal_repo: &State<DealRepository>,
    email: Option<&str>,
) -> Result<Json<Vec<Deal>>, ApiError> {
    // Checked before the store is touched; an empty value counts as missing.
    let email = email
        .filter(|email| !email.is_empty())
        .ok_or(ApiError::MissingEmail)?;
    Ok(Json(deal_repo.find_deals_by_email(email).await?))
}

#[get("/deals/<id>")]
pub async fn get_deal(
    deal_repo: &State<DealRepository>,
    id: Result<DocumentId, ApiError>,
) -> Result<Json<Option<Deal>>, ApiError> {
    Ok(Json(deal_repo.find_deal_by_id(id?).await?))
}

#[post("/deals", data = "<new_deal>")]
pub async fn create_deal(
    deal_repo: &State<DealRepository>,
    new_deal: Json<Deal>,
) -> Result<Json<InsertAck>, ApiError> {
    Ok(Json(deal_repo.create_deal(new_deal.into_inner()).await?))
}

#[put("/deals/<id>", data = "<patch>")]
pub async fn update_deal(
    deal_repo: &State<DealRepository>,
    id: Result<DocumentId, ApiError>,
    patch: Json<Deal>,
) -> Result<Json<UpdateAck>, ApiError> {
    Ok(Json(deal_repo.update_deal(id?, patch.into_inner()).await?))
}

#[delete("/deals/<id>")]
pub async fn delete_deal(
    deal_repo: &State<DealRepository>,
    id: Result<DocumentId, ApiError>,
) -> Result<Json<DeleteAck>, ApiError> {
    Ok(Json(deal_repo.delete_deal(id?).await?))
}

#[get("/latestProduct")]
pub async fn get_latest_products(
    deal_repo: &State<DealRepository>,
) -> Result<Json<Vec<Deal>>, ApiError> {
    Ok(Json(deal_repo.get_latest_deals().await?))
}
