use std::fmt::{Display, Formatter};
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

/// Body of every error response: `{"error": "<message>"}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Unparsable path identifier or request body.
    MalformedInput(String),
    /// A field rule or a referential rule was violated.
    ValidationFailed(String),
    /// The addressed record, or the record it references, does not exist.
    NotFound(String),
    Internal(String),
}
impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MalformedInput(_) => Status::BadRequest,
            ApiError::ValidationFailed(_) => Status::BadRequest,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
    pub fn message(&self) -> &str {
        match self {
            ApiError::MalformedInput(msg)
            | ApiError::ValidationFailed(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
    pub fn invalid_id() -> Self {
        ApiError::MalformedInput("Invalid ID".to_string())
    }
}
impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status().code, self.message())
    }
}
impl std::error::Error for ApiError {}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = ErrorBody { error: self.message().to_string() };
        Custom(status, Json(body)).respond_to(request)
    }
}

#[catch(404)]
fn not_found_catcher(request: &Request<'_>) -> ApiError {
    ApiError::NotFound(format!("No route for {} {}", request.method(), request.uri()))
}
#[catch(500)]
fn internal_error_catcher() -> ApiError {
    ApiError::Internal("Internal server error".to_string())
}
#[catch(default)]
fn default_catcher(status: Status, _request: &Request<'_>) -> Custom<Json<ErrorBody>> {
    let error = status.reason().unwrap_or("Unknown error").to_string();
    Custom(status, Json(ErrorBody { error }))
}

pub fn extend(rocket: rocket::Rocket<rocket::Build>) -> rocket::Rocket<rocket::Build> {
    rocket.register("/", catchers![
        not_found_catcher,
        internal_error_catcher,
        default_catcher,
    ])
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::invalid_id().status(), Status::BadRequest);
        assert_eq!(ApiError::ValidationFailed("Invalid Class".into()).status(), Status::BadRequest);
        assert_eq!(ApiError::NotFound("Class not found".into()).status(), Status::NotFound);
        assert_eq!(ApiError::Internal("boom".into()).status(), Status::InternalServerError);
        assert_eq!(ApiError::NotFound("Class not found".into()).to_string(), "404 Class not found");
    }
}
