//! Request handlers
//!
//! Each handler resolves a request context from `x-request-id`, runs the
//! blocking service call on the blocking pool, and answers 200 with JSON.
//! A failed service call is logged with the request id and the handler
//! falls back to the current mirror contents (or an empty room).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use house_core::core_types::correlation::REQUEST_ID_HEADER;
use house_core::core_types::RequestContext;
use house_core::{ExError, ExErrorKind, Room};
use house_engine::HouseService;
use tracing::Span;

use crate::router::HouseState;

/// Name addressed by `GET /house/new` and `DELETE /house/new`
const NEW_ROUTE_NAME: &str = "new";

/// JSON body plus the request id echoed back to the caller
pub type HouseResponse<T> = ([(&'static str, String); 1], Json<T>);

/// `GET /house`
pub async fn list_rooms(
    State(state): State<HouseState>,
    headers: HeaderMap,
) -> HouseResponse<Vec<Room>> {
    let ctx = request_context(&headers);
    let rooms = current_rooms(&state, &ctx).await;
    respond(&ctx, rooms)
}

/// `GET /house/{roomName}`
pub async fn get_room(
    State(state): State<HouseState>,
    Path(room_name): Path<String>,
    headers: HeaderMap,
) -> HouseResponse<Room> {
    let ctx = request_context(&headers);
    let room = lookup(&state, &ctx, decode_room_name(&room_name)).await;
    respond(&ctx, room)
}

/// `GET /house/new`
pub async fn get_new_room(
    State(state): State<HouseState>,
    headers: HeaderMap,
) -> HouseResponse<Room> {
    let ctx = request_context(&headers);
    let room = lookup(&state, &ctx, NEW_ROUTE_NAME.to_string()).await;
    respond(&ctx, room)
}

/// `POST /house/new`
///
/// A body that does not decode as a room is logged and replaced by an empty
/// room, which is then stored under the default name.
pub async fn create_room(
    State(state): State<HouseState>,
    headers: HeaderMap,
    body: Bytes,
) -> HouseResponse<Vec<Room>> {
    let ctx = request_context(&headers);

    let room = match Room::from_json_slice(&body) {
        Ok(room) => room,
        Err(err) => {
            let err: ExError = err.into();
            tracing::warn!(
                component = module_path!(),
                op = "create_room",
                request_id = %ctx.request_id,
                err_code = err.code(),
                err = %err,
                "malformed room body, storing an empty room"
            );
            Room::default()
        }
    };

    let created = run_blocking(&state, &ctx, move |service| service.create_room(room)).await;
    if let Err(err) = created {
        log_failure(&ctx, "create_room", err);
    }

    let rooms = current_rooms(&state, &ctx).await;
    respond(&ctx, rooms)
}

/// `DELETE /house/{roomName}`
pub async fn delete_room(
    State(state): State<HouseState>,
    Path(room_name): Path<String>,
    headers: HeaderMap,
) -> HouseResponse<Vec<Room>> {
    let ctx = request_context(&headers);
    let rooms = remove(&state, &ctx, decode_room_name(&room_name)).await;
    respond(&ctx, rooms)
}

/// `DELETE /house/new`
pub async fn delete_new_room(
    State(state): State<HouseState>,
    headers: HeaderMap,
) -> HouseResponse<Vec<Room>> {
    let ctx = request_context(&headers);
    let rooms = remove(&state, &ctx, NEW_ROUTE_NAME.to_string()).await;
    respond(&ctx, rooms)
}

/// Path segments arrive percent-decoded; `+` still stands for a space
pub fn decode_room_name(raw: &str) -> String {
    raw.replace('+', " ")
}

async fn lookup(state: &HouseState, ctx: &RequestContext, name: String) -> Room {
    match run_blocking(state, ctx, move |service| service.get_room(&name)).await {
        Ok(found) => found.unwrap_or_default(),
        Err(err) => {
            log_failure(ctx, "get_room", err);
            Room::default()
        }
    }
}

async fn remove(state: &HouseState, ctx: &RequestContext, name: String) -> Vec<Room> {
    let removed = run_blocking(state, ctx, move |service| service.delete_room(&name)).await;
    if let Err(err) = removed {
        log_failure(ctx, "delete_room", err);
    }
    current_rooms(state, ctx).await
}

async fn current_rooms(state: &HouseState, ctx: &RequestContext) -> Vec<Room> {
    match run_blocking(state, ctx, |service| service.list_rooms()).await {
        Ok(rooms) => rooms,
        Err(err) => {
            log_failure(ctx, "list_rooms", err);
            Vec::new()
        }
    }
}

/// Run a service call on the blocking pool inside the request's span
async fn run_blocking<T, F>(
    state: &HouseState,
    ctx: &RequestContext,
    call: F,
) -> Result<T, ExError>
where
    F: FnOnce(&HouseService) -> Result<T, ExError> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(state.service());
    let span = request_span(ctx);

    let joined = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        call(&service)
    })
    .await;

    match joined {
        Ok(result) => result,
        Err(join_err) => Err(ExError::new(ExErrorKind::Internal)
            .with_op("spawn_blocking")
            .with_message(join_err.to_string())),
    }
}

fn request_span(ctx: &RequestContext) -> Span {
    tracing::info_span!("request", request_id = %ctx.request_id)
}

fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext::from_header(
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
    )
}

fn log_failure(ctx: &RequestContext, op: &str, err: ExError) {
    let err = err.with_request_id(ctx.request_id.clone());
    tracing::warn!(
        component = module_path!(),
        op = op,
        request_id = %ctx.request_id,
        err_kind = ?err.kind(),
        err_code = err.code(),
        err = %err,
        "service call failed, answering with the current mirror"
    );
}

fn respond<T>(ctx: &RequestContext, body: T) -> HouseResponse<T> {
    ([(REQUEST_ID_HEADER, ctx.request_id.to_string())], Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_decodes_to_space() {
        assert_eq!(decode_room_name("Living+Room"), "Living Room");
        assert_eq!(decode_room_name("Living Room"), "Living Room");
        assert_eq!(decode_room_name("Kitchen"), "Kitchen");
    }

    #[test]
    fn test_request_context_reads_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, "req-42".parse().unwrap());

        let ctx = request_context(&headers);

        assert_eq!(ctx.request_id.as_str(), "req-42");
    }

    #[test]
    fn test_request_context_generated_when_missing() {
        let ctx = request_context(&HeaderMap::new());
        assert!(!ctx.request_id.as_str().is_empty());
    }
}
