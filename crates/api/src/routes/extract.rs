//! Request extractors shared by the resource routers.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Multipart, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    response::{IntoResponse, Response},
};
use northwind_core::Page;
use serde::Deserialize;

use crate::error::AppError;

/// `?offset=&limit=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Validate into a [`Page`], defaulting to offset 0 and limit 10.
    ///
    /// # Errors
    ///
    /// Returns a 400 if the offset is negative or the limit is below 1.
    pub fn page(&self) -> Result<Page, AppError> {
        Ok(Page::new(
            self.offset.unwrap_or(0),
            self.limit
                .unwrap_or_else(|| i64::from(Page::DEFAULT_LIMIT)),
        )?)
    }
}

/// Every `name` value in the query string, in order.
///
/// `axum::extract::Query` cannot collect a repeated key, so the raw query is
/// parsed with `form_urlencoded`. Blank values are dropped.
#[derive(Debug, Default)]
pub struct NameList(pub Vec<String>);

impl<S> FromRequestParts<S> for NameList
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parse_names(parts.uri.query().unwrap_or_default())))
    }
}

fn parse_names(query: &str) -> Vec<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "name")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Picture bytes from either a multipart form (first file part) or the raw
/// request body.
#[derive(Debug)]
pub struct Upload(pub Vec<u8>);

impl<S> FromRequest<S> for Upload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(IntoResponse::into_response)?
            {
                if field.file_name().is_some() {
                    let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
                    return Ok(Self(bytes.to_vec()));
                }
            }

            return Err(AppError::BadRequest("no file in upload".to_string()).into_response());
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        if body.is_empty() {
            return Err(AppError::BadRequest("empty upload".to_string()).into_response());
        }

        Ok(Self(body.to_vec()))
    }
}
