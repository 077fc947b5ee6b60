//! Cookie-carried session middleware.

use axum::{
    extract::{Request, State},
    http::{
        HeaderMap, HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::Response,
};

use crate::domain::session::{SessionHandle, SessionId};
use crate::state::AppState;

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    /// Finds a well-formed session id in the request's `Cookie` headers.
    ///
    /// Handles multiple cookies per header by splitting on semicolons; values that are
    /// not valid session ids are ignored.
    pub fn extract(&self, headers: &HeaderMap) -> Option<SessionId> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookie_str| cookie_str.split(';'))
            .find_map(|cookie| {
                let (name, value) = cookie.trim().split_once('=')?;
                if name == self.name {
                    value.trim_matches('"').parse().ok()
                } else {
                    None
                }
            })
    }

    /// Builds the `Set-Cookie` value for a session id.
    ///
    /// No `Max-Age` or `Expires`: the cookie lasts for the browser session, while the
    /// server-side record follows the store's TTL.
    pub fn header_value(&self, id: &SessionId) -> String {
        let mut value = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", self.name, id);
        if self.secure {
            value.push_str("; Secure");
        }
        value
    }
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self::new("session", false)
    }
}

/// Attaches a [`SessionHandle`] to the request.
///
/// # Flow
///
/// 1. Read the session id from the configured cookie
/// 2. Generate a fresh id if the cookie is missing or malformed
/// 3. Insert the handle as a request extension and run the handler
/// 4. Set the cookie on the response if a new session was written
///
/// A visitor that only reads (for example the home page of a fresh session) gets no
/// cookie until something is stored for them.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::session;
///
/// let routes = Router::new()
///     .route("/img.png", get(image_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), session::layer));
/// ```
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let (id, is_new) = match st.session_cookie.extract(req.headers()) {
        Some(id) => (id, false),
        None => (SessionId::generate(), true),
    };

    let handle = SessionHandle::new(id, st.session_store.clone(), is_new);
    req.extensions_mut().insert(handle.clone());

    let mut response = next.run(req).await;

    if handle.is_new() && handle.was_written() {
        tracing::debug!("Issuing session cookie for {}", handle.id().short());
        match HeaderValue::from_str(&st.session_cookie.header_value(handle.id())) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::error!("Invalid session cookie header: {}", e),
        }
    }

    response
}
