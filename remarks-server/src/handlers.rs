use actix_web::{web, HttpResponse};
use common::{
    db,
    models::{BasicRemarksRequest, ExtendedRemarksRequest, RemarksUpdate, SaveRemarksResponse},
    utils::SaveVariant,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[actix_web::get("/customers")]
async fn list_customers(app_state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let customers = db::list_customers(&app_state.pool).await.map_err(|e| {
        error!("Error fetching customers: {}", e);
        ApiError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(customers))
}

#[actix_web::get("/reasons")]
async fn list_reasons(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&app_state.reasons)
}

fn parse_body<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body).map_err(|e| ApiError::Validation(format!("Malformed request: {}", e)))
}

fn validate(variant: SaveVariant, body: Value) -> ApiResult<RemarksUpdate> {
    match variant {
        SaveVariant::Basic => {
            let req: BasicRemarksRequest = parse_body(body)?;
            info!("Received data for saving remarks: {:?}", req);
            req.into_update()
                .ok_or_else(|| ApiError::Validation(BasicRemarksRequest::REQUIRED.to_string()))
        }
        SaveVariant::Extended => {
            let req: ExtendedRemarksRequest = parse_body(body)?;
            info!("Received data for saving remarks: {:?}", req);
            req.into_update()
                .ok_or_else(|| ApiError::Validation(ExtendedRemarksRequest::REQUIRED.to_string()))
        }
    }
}

#[actix_web::post("/saveRemarks")]
async fn save_remarks(
    body: web::Json<Value>,
    app_state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let AppState {
        pool,
        save_variant,
        reasons,
    } = &**app_state;

    let update = validate(*save_variant, body.into_inner())?;

    if let RemarksUpdate::Extended {
        selected_reason, ..
    } = &update
    {
        if !selected_reason.is_empty() && !reasons.contains(selected_reason) {
            warn!("Storing reason outside the configured set: {:?}", selected_reason);
        }
    }

    let rows = db::save_remarks(pool, &update).await.map_err(|e| {
        error!("Error saving remarks: {}", e);
        ApiError::from(e)
    })?;

    if rows == 0 {
        // no existence check: unknown ids still report success
        warn!("No customer matched id {}, nothing updated", update.id());
    } else {
        info!("Remarks saved successfully for id: {}", update.id());
    }

    let selected_reason = match update {
        RemarksUpdate::Basic { .. } => None,
        RemarksUpdate::Extended {
            selected_reason, ..
        } => Some(selected_reason),
    };

    Ok(HttpResponse::Ok().json(SaveRemarksResponse {
        success: true,
        selected_reason,
    }))
}
