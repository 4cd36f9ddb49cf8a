use std::io;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::Response;
use cas_types::ObjectRef;
use futures::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::{debug, info};

use crate::auth::Credentials;
use crate::body::AbortingBody;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Static informational page.
pub async fn root_handler() -> String {
    format!(
        "This is casd {}, a content-addressable blob store daemon.\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Methods other than GET and PUT on a blob path.
pub async fn unsupported_method() -> ServerError {
    ServerError::InvalidRequest("Unsupported method.".into())
}

fn parse_ref(uri: &Uri, malformed: &str) -> ServerResult<ObjectRef> {
    ObjectRef::parse(uri.path()).map_err(|err| {
        debug!(path = uri.path(), %err, "rejecting request path");
        ServerError::InvalidRequest(malformed.into())
    })
}

/// Stream a blob back to the client.
pub async fn get_blob(State(state): State<AppState>, uri: Uri) -> ServerResult<Response> {
    let oref = parse_ref(&uri, "Malformed GET URL.")?;
    let blob = state.store.open(&oref).await?.ok_or(ServerError::NotFound)?;

    debug!(%oref, size = blob.size, "serving blob");
    let size = blob.size;
    let body = Body::from_stream(AbortingBody::new(oref, blob.reader, size));
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/octet-stream")
        .header(CONTENT_LENGTH, size)
        .body(body)
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// Verify and store an uploaded blob.
pub async fn put_blob(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> ServerResult<&'static str> {
    let oref = parse_ref(&uri, "Malformed PUT URL.")?;
    if !oref.is_supported() {
        return Err(ServerError::InvalidRequest(
            "unsupported object hash function".into(),
        ));
    }

    let credentials = Credentials::from_headers(&headers);
    if !state.authorizer.allow(&credentials).await {
        return Err(ServerError::Unauthorized {
            realm: state.config.realm.clone(),
        });
    }

    let stream = body.into_data_stream().map_err(io::Error::other);
    let mut reader = StreamReader::new(stream);
    let written = state.store.put(&oref, &mut reader).await?;

    info!(%oref, bytes = written, "stored blob");
    Ok("OK")
}
