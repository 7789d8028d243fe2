use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::auth::Caller;
use crate::api::AppState;
use crate::domain::{
    AttachSkill, CharacterId, CharacterUpdate, CharacterView, EquipWeapon, NewCharacter,
};
use crate::response::ServiceResponse;

type Envelope<T> = (StatusCode, Json<ServiceResponse<T>>);

fn ok<T>(resp: ServiceResponse<T>) -> Envelope<T> {
    (StatusCode::OK, Json(resp))
}

/// 404 when the envelope carries no character.
fn found_or_404<T>(resp: ServiceResponse<T>) -> Envelope<T> {
    let status = if resp.has_data() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(resp))
}

pub async fn list_characters(
    State(state): State<AppState>,
    Caller(caller): Caller,
) -> Envelope<Vec<CharacterView>> {
    ok(state.service.list_characters(caller).await)
}

pub async fn get_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Envelope<CharacterView> {
    found_or_404(
        state
            .service
            .get_character(caller, CharacterId::new(id))
            .await,
    )
}

pub async fn create_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(input): Json<NewCharacter>,
) -> Envelope<Vec<CharacterView>> {
    ok(state.service.create_character(caller, input).await)
}

pub async fn update_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(update): Json<CharacterUpdate>,
) -> Envelope<CharacterView> {
    found_or_404(state.service.update_character(caller, update).await)
}

pub async fn delete_character(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(id): Path<i64>,
) -> Envelope<Vec<CharacterView>> {
    found_or_404(
        state
            .service
            .delete_character(caller, CharacterId::new(id))
            .await,
    )
}

pub async fn attach_skill(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<AttachSkill>,
) -> Envelope<CharacterView> {
    ok(state.service.attach_skill(caller, request).await)
}

pub async fn equip_weapon(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<EquipWeapon>,
) -> Envelope<CharacterView> {
    ok(state.service.equip_weapon(caller, request).await)
}
