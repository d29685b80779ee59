use axum::extract::{FromRequest, FromRequestParts};

use crate::error::Error;

/// `axum::Json` with rejections rendered as `{"message": "Invalid request body"}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct PathParam<T>(pub T);
