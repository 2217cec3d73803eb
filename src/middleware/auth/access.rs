//! access token 検証 → AuthCtx を extensions に入れる (Request Context Binder)
//!
//! - credential は cookie → `Authorization: Bearer` の順で探す
//! - 署名/exp/nbf 検証、claim から user id を取り出し、user store で 1 回だけ lookup
//! - 失敗時は downstream を呼ばずに 401 `{"ok": false, "error": ...}` を返す
//! - 成功時だけ AuthCtx を insert して next を呼ぶ (部分的な bind はしない)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 認証が必要な router に middleware を適用する。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/me", get(me));
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    // route_layer: マッチしたルートにだけ掛ける (未知のパスは 401 ではなく 404 のまま)
    router.route_layer(middleware::from_fn_with_state(state, require_auth))
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // lookup 中に transport 側で request が drop された場合、この future ごと破棄される
    let principal = state.auth.authenticate(req.headers()).await?;

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(principal));

    Ok(next.run(req).await)
}
