use std::fmt::Display;
use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// JSON body extractor whose failures render as problem+json 400s.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let inner = web::Json::<T>::from_request(req, payload);
        let path = req.path().to_string();

        Box::pin(async move {
            match inner.await {
                Ok(json) => Ok(ValidatedJson(json.into_inner())),
                Err(err) => Err(reject_body(&path, err)),
            }
        })
    }
}

/// JSON body that may be absent.
///
/// An empty or whitespace-only body yields `None`; anything else must parse
/// as `T` or the request is rejected like `ValidatedJson`.
#[derive(Debug)]
pub struct OptionalJson<T>(pub Option<T>);

impl<T> OptionalJson<T> {
    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> FromRequest for OptionalJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let bytes = web::Bytes::from_request(req, payload);
        let path = req.path().to_string();

        Box::pin(async move {
            let bytes = bytes.await.map_err(|err| reject_body(&path, err))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(OptionalJson(None));
            }
            serde_json::from_slice(&bytes)
                .map(|value| OptionalJson(Some(value)))
                .map_err(|err| reject_body(&path, err))
        })
    }
}

fn reject_body(path: &str, err: impl Display) -> AppError {
    warn!(path = %path, error = %err, "rejected request body");
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}"))
}
