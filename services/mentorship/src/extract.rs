//! axum extractors whose rejections render as `{"message"}` bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::MentorshipServiceError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(MentorshipServiceError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(MentorshipServiceError))]
pub struct PathParam<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(MentorshipServiceError))]
pub struct QueryParams<T>(pub T);
