//! Request and response types for the URL submission endpoint.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use url::form_urlencoded;

use crate::application::services::SubmitOutcome;

/// Name of the form field carrying the URL.
pub const URL_FIELD: &str = "url";

/// Submitted form data.
///
/// Extracted from `application/x-www-form-urlencoded` or `multipart/form-data` bodies.
/// Anything that cannot be read as one of those (another media type, a truncated body,
/// a multipart body without a boundary) yields a form without a `url`, so the
/// submission reports a missing URL instead of an extractor error.
#[derive(Debug, Default)]
pub struct SetUrlForm {
    pub url: Option<String>,
}

impl<S> FromRequest<S> for SetUrlForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            return Ok(Self::from_multipart(req, state).await);
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            return Ok(Self::from_urlencoded(req, state).await);
        }

        tracing::debug!("Submission with unsupported content type '{}'", content_type);
        Ok(Self::default())
    }
}

impl SetUrlForm {
    /// Takes the first `url` pair of a urlencoded body; later repeats are ignored.
    pub fn parse_urlencoded(body: &[u8]) -> Self {
        let url = form_urlencoded::parse(body)
            .find(|(key, _)| key == URL_FIELD)
            .map(|(_, value)| value.into_owned());

        Self { url }
    }

    async fn from_urlencoded<S>(req: Request, state: &S) -> Self
    where
        S: Send + Sync,
    {
        match Bytes::from_request(req, state).await {
            Ok(body) => Self::parse_urlencoded(&body),
            Err(e) => {
                tracing::debug!("Unreadable form body: {}", e.body_text());
                Self::default()
            }
        }
    }

    /// Reads the first `url` field of a multipart body, skipping other fields.
    async fn from_multipart<S>(req: Request, state: &S) -> Self
    where
        S: Send + Sync,
    {
        let mut multipart = match Multipart::from_request(req, state).await {
            Ok(multipart) => multipart,
            Err(e) => {
                tracing::debug!("Unreadable multipart body: {}", e.body_text());
                return Self::default();
            }
        };

        loop {
            match multipart.next_field().await {
                Ok(Some(field)) if field.name() == Some(URL_FIELD) => {
                    return match field.text().await {
                        Ok(url) => Self { url: Some(url) },
                        Err(e) => {
                            tracing::debug!("Unreadable multipart field: {}", e);
                            Self::default()
                        }
                    };
                }
                Ok(Some(_)) => continue,
                Ok(None) => return Self::default(),
                Err(e) => {
                    tracing::debug!("Unreadable multipart body: {}", e);
                    return Self::default();
                }
            }
        }
    }
}

/// Plain-text response for a submission outcome.
///
/// | Outcome        | Status          | Body              |
/// |----------------|-----------------|-------------------|
/// | `MissingInput` | 400 Bad Request | `No URL provided` |
/// | `InvalidInput` | 400 Bad Request | `Invalid URL`     |
/// | `Success`      | 201 Created     | `Success!`        |
impl IntoResponse for SubmitOutcome {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            SubmitOutcome::MissingInput => (StatusCode::BAD_REQUEST, "No URL provided"),
            SubmitOutcome::InvalidInput => (StatusCode::BAD_REQUEST, "Invalid URL"),
            SubmitOutcome::Success => (StatusCode::CREATED, "Success!"),
        };

        (
            status,
            [(
                CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_outcome_responses() {
        let response = SubmitOutcome::Success.into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "Success!");

        let response = SubmitOutcome::MissingInput.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "No URL provided");

        let response = SubmitOutcome::InvalidInput.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid URL");
    }

    #[tokio::test]
    async fn test_extract_urlencoded() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("url=https%3A%2F%2Fexample.org%2Fpage&other=1"))
            .unwrap();

        let form = SetUrlForm::from_request(req, &()).await.unwrap();

        assert_eq!(form.url.as_deref(), Some("https://example.org/page"));
    }

    #[tokio::test]
    async fn test_extract_urlencoded_without_field() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("other=1"))
            .unwrap();

        let form = SetUrlForm::from_request(req, &()).await.unwrap();

        assert_eq!(form.url, None);
    }

    #[tokio::test]
    async fn test_extract_multipart() {
        let body = "--XYZ\r\n\
                    Content-Disposition: form-data; name=\"note\"\r\n\r\n\
                    hello\r\n\
                    --XYZ\r\n\
                    Content-Disposition: form-data; name=\"url\"\r\n\r\n\
                    https://example.org/multi\r\n\
                    --XYZ--\r\n";
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
            .body(Body::from(body))
            .unwrap();

        let form = SetUrlForm::from_request(req, &()).await.unwrap();

        assert_eq!(form.url.as_deref(), Some("https://example.org/multi"));
    }

    #[test]
    fn test_parse_urlencoded_takes_first_url() {
        let form = SetUrlForm::parse_urlencoded(
            b"url=https%3A%2F%2Fexample.org%2Fa&url=https%3A%2F%2Fexample.org%2Fb",
        );

        assert_eq!(form.url.as_deref(), Some("https://example.org/a"));
    }

    #[test]
    fn test_parse_urlencoded_decodes_plus_and_escapes() {
        let form =
            SetUrlForm::parse_urlencoded(b"note=a+b&url=https%3A%2F%2Fexample.org%2F%3Fq%3Da+b");

        assert_eq!(form.url.as_deref(), Some("https://example.org/?q=a b"));
    }

    #[tokio::test]
    async fn test_extract_multipart_without_boundary_is_empty() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "multipart/form-data")
            .body(Body::from("url=https://example.org"))
            .unwrap();

        let form = SetUrlForm::from_request(req, &()).await.unwrap();

        assert_eq!(form.url, None);
    }

    #[tokio::test]
    async fn test_extract_truncated_multipart_is_empty() {
        let body = "--XYZ\r\n\
                    Content-Disposition: form-data; name=\"note\"\r\n\r\n\
                    hel";
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
            .body(Body::from(body))
            .unwrap();

        let form = SetUrlForm::from_request(req, &()).await.unwrap();

        assert_eq!(form.url, None);
    }

    #[tokio::test]
    async fn test_extract_other_content_type_is_empty() {
        let req = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"url":"https://example.org"}"#))
            .unwrap();

        let form = SetUrlForm::from_request(req, &()).await.unwrap();

        assert_eq!(form.url, None);
    }
}
