use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use pv_api_types::{
    ActionResponse, AssetId, CartResponse, CategoryId, CheckoutResponse, SelectViewRequest,
    SessionResponse, ViewResponse,
};
use pv_storefront_core::{CheckoutError, Storefront, StorefrontError, TracingObserver, ViewFilter};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;
use uuid::Uuid;

use crate::{ApiError, ApiResult, AppState, bad_request, conflict, not_found};

/// One visitor's storefront and the time of its last request.
pub(crate) struct Session {
    storefront: Storefront,
    // Milliseconds on the `AppState` clock. Atomic so read-only requests can
    // refresh it under the shared guard.
    touched_ms: AtomicU64,
}

impl Session {
    fn new(storefront: Storefront, now_ms: u64) -> Self {
        Self {
            storefront,
            touched_ms: AtomicU64::new(now_ms),
        }
    }

    fn touch(&self, now_ms: u64) {
        self.touched_ms.fetch_max(now_ms, Ordering::Relaxed);
    }

    fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.touched_ms.load(Ordering::Relaxed)) > ttl_ms
    }
}

pub(crate) async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let mut storefront = Storefront::with_page_size(state.catalog.clone(), state.page_size);
    storefront.subscribe(Arc::new(TracingObserver));
    let cart = storefront.cart_response();
    let page_size = storefront.page_size();

    let session_id = Uuid::new_v4();
    let now = state.now_ms();
    let ttl = state.ttl_ms();
    {
        let mut sessions = state.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("evicted {} idle sessions", evicted);
        }
        sessions.insert(session_id, Session::new(storefront, now));
    }
    info!("session {} opened (page size {})", session_id, page_size);

    (StatusCode::CREATED, Json(SessionResponse { session_id, cart }))
}

pub(crate) async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .write()
        .await
        .remove(&session_id)
        .ok_or_else(|| not_found("session not found"))?;
    info!("session {} closed", session_id);
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn get_view(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<ViewResponse> {
    read_session(&state, session_id, |storefront| Ok(storefront.view_page())).await
}

pub(crate) async fn select_view(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectViewRequest>,
) -> ApiResult<ActionResponse> {
    with_session(&state, session_id, |storefront| {
        storefront
            .select_view(ViewFilter::from(request.category))
            .map_err(storefront_error)?;
        Ok(action_response(storefront))
    })
    .await
}

pub(crate) async fn toggle_asset(
    State(state): State<Arc<AppState>>,
    Path((session_id, asset_id)): Path<(Uuid, String)>,
) -> ApiResult<ActionResponse> {
    if asset_id.trim().is_empty() {
        return Err(bad_request("asset_id is required"));
    }

    with_session(&state, session_id, |storefront| {
        storefront.toggle_asset(&AssetId(asset_id));
        Ok(action_response(storefront))
    })
    .await
}

pub(crate) async fn toggle_pack(
    State(state): State<Arc<AppState>>,
    Path((session_id, category)): Path<(Uuid, String)>,
) -> ApiResult<ActionResponse> {
    with_session(&state, session_id, |storefront| {
        storefront
            .toggle_pack(&CategoryId(category))
            .map_err(storefront_error)?;
        Ok(action_response(storefront))
    })
    .await
}

pub(crate) async fn load_more(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<ActionResponse> {
    with_session(&state, session_id, |storefront| {
        storefront.load_more();
        Ok(action_response(storefront))
    })
    .await
}

pub(crate) async fn get_cart(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<CartResponse> {
    read_session(&state, session_id, |storefront| Ok(storefront.cart_response())).await
}

pub(crate) async fn open_cart(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<CartResponse> {
    with_session(&state, session_id, |storefront| {
        storefront.open_cart();
        Ok(storefront.cart_response())
    })
    .await
}

pub(crate) async fn close_cart(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<CartResponse> {
    with_session(&state, session_id, |storefront| {
        storefront.close_cart();
        Ok(storefront.cart_response())
    })
    .await
}

pub(crate) async fn clear_cart(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<ActionResponse> {
    with_session(&state, session_id, |storefront| {
        storefront.clear_cart();
        Ok(action_response(storefront))
    })
    .await
}

pub(crate) async fn checkout(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<CheckoutResponse> {
    read_session(&state, session_id, |storefront| {
        let order = storefront.checkout().map_err(|err| checkout_error(&err))?;
        Ok(order.to_response())
    })
    .await
}

/// Run one mutating action against a session while holding the write guard.
/// An idle session is dropped here and reported as missing.
async fn with_session<T, F>(state: &AppState, session_id: Uuid, action: F) -> ApiResult<T>
where
    F: FnOnce(&mut Storefront) -> Result<T, ApiError>,
{
    let now = state.now_ms();
    let mut sessions = state.sessions.write().await;
    let expired = sessions
        .get(&session_id)
        .ok_or_else(|| not_found("session not found"))?
        .is_expired(now, state.ttl_ms());
    if expired {
        sessions.remove(&session_id);
        info!("session {} expired", session_id);
        return Err(not_found("session not found"));
    }

    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| not_found("session not found"))?;
    session.touch(now);
    action(&mut session.storefront).map(Json)
}

/// Read-only counterpart of `with_session`; concurrent readers share the guard.
async fn read_session<T, F>(state: &AppState, session_id: Uuid, action: F) -> ApiResult<T>
where
    F: FnOnce(&Storefront) -> Result<T, ApiError>,
{
    let now = state.now_ms();
    let sessions = state.sessions.read().await;
    let session = sessions
        .get(&session_id)
        .filter(|session| !session.is_expired(now, state.ttl_ms()))
        .ok_or_else(|| not_found("session not found"))?;
    session.touch(now);
    action(&session.storefront).map(Json)
}

fn action_response(storefront: &Storefront) -> ActionResponse {
    ActionResponse {
        view: storefront.view_page(),
        cart: storefront.cart_response(),
    }
}

fn storefront_error(err: StorefrontError) -> ApiError {
    match err {
        StorefrontError::UnknownCategory(_) => not_found(&err.to_string()),
    }
}

fn checkout_error(err: &CheckoutError) -> ApiError {
    conflict(&err.to_string())
}
