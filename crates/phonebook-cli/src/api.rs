//! Request adapter: routes `{method, path, body}` requests to the contact
//! service and turns results and failures into `{status, body}` responses.

use phonebook_core::domain::{ContactId, ContactPayload};
use phonebook_core::dto::StatusDto;
use phonebook_store::{ContactService, ContactStore, ServiceError, ServiceErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const DELETED_MESSAGE: &str = "Contact deleted successfully";

const COLLECTION: &str = "contacts";

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self {
                status: STATUS_OK,
                body,
            },
            Err(err) => Self::error(
                STATUS_INTERNAL_ERROR,
                format!("failed to encode response: {err}"),
            ),
        }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        let dto = StatusDto::error(status, message);
        Self {
            status,
            body: serde_json::to_value(dto).unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Get(ContactId),
    Update(ContactId),
    Delete(ContactId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    UnknownPath(String),
    MethodNotAllowed(String),
    InvalidId(String),
}

impl RouteError {
    fn into_response(self) -> Response {
        match self {
            RouteError::UnknownPath(path) => {
                Response::error(STATUS_NOT_FOUND, format!("no route for {path}"))
            }
            RouteError::MethodNotAllowed(method) => Response::error(
                STATUS_METHOD_NOT_ALLOWED,
                format!("method not allowed: {method}"),
            ),
            RouteError::InvalidId(raw) => {
                Response::error(STATUS_BAD_REQUEST, format!("invalid contact id: {raw}"))
            }
        }
    }
}

pub fn route(method: &str, path: &str) -> Result<Route, RouteError> {
    let path_only = path.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path_only
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let method = method.to_ascii_uppercase();

    match segments.as_slice() {
        [COLLECTION] => match method.as_str() {
            "GET" => Ok(Route::List),
            "POST" => Ok(Route::Create),
            _ => Err(RouteError::MethodNotAllowed(method)),
        },
        [COLLECTION, raw_id] => {
            let id = raw_id
                .parse::<ContactId>()
                .map_err(|_| RouteError::InvalidId(raw_id.to_string()))?;
            match method.as_str() {
                "GET" => Ok(Route::Get(id)),
                "PUT" => Ok(Route::Update(id)),
                "DELETE" => Ok(Route::Delete(id)),
                _ => Err(RouteError::MethodNotAllowed(method)),
            }
        }
        _ => Err(RouteError::UnknownPath(path.to_string())),
    }
}

pub fn status_for(kind: ServiceErrorKind) -> u16 {
    match kind {
        ServiceErrorKind::Validation => STATUS_BAD_REQUEST,
        ServiceErrorKind::NotFound => STATUS_NOT_FOUND,
        ServiceErrorKind::Conflict => STATUS_CONFLICT,
    }
}

pub struct Api<'a, S> {
    service: &'a ContactService<S>,
    log_requests: bool,
}

impl<'a, S: ContactStore> Api<'a, S> {
    pub fn new(service: &'a ContactService<S>, log_requests: bool) -> Self {
        Self {
            service,
            log_requests,
        }
    }

    /// Decodes one request line; malformed JSON yields a 400 response.
    pub fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(&request),
            Err(err) => Response::error(STATUS_BAD_REQUEST, format!("invalid request: {err}")),
        }
    }

    pub fn handle(&self, request: &Request) -> Response {
        if self.log_requests {
            info!(method = %request.method, path = %request.path, "incoming request");
        }

        let route = match route(&request.method, &request.path) {
            Ok(route) => route,
            Err(err) => return err.into_response(),
        };

        match route {
            Route::List => Response::ok(&self.service.get_all()),
            Route::Get(id) => respond(self.service.get_by_id(id)),
            Route::Create => match payload_from(request.body.as_ref()) {
                Ok(payload) => respond(self.service.create(&payload)),
                Err(response) => response,
            },
            Route::Update(id) => match payload_from(request.body.as_ref()) {
                Ok(payload) => respond(self.service.update(id, &payload)),
                Err(response) => response,
            },
            Route::Delete(id) => respond(self.service.delete(id).map(|()| DELETED_MESSAGE)),
        }
    }
}

fn respond<T: Serialize>(result: Result<T, ServiceError>) -> Response {
    match result {
        Ok(value) => Response::ok(&value),
        Err(err) => Response::error(status_for(err.kind()), err.to_string()),
    }
}

fn payload_from(body: Option<&Value>) -> Result<ContactPayload, Response> {
    match body {
        None | Some(Value::Null) => Err(Response::error(
            STATUS_BAD_REQUEST,
            "request body is required",
        )),
        Some(value) => ContactPayload::deserialize(value).map_err(|err| {
            Response::error(STATUS_BAD_REQUEST, format!("invalid request body: {err}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{route, status_for, Api, Route, RouteError, STATUS_BAD_REQUEST};
    use phonebook_core::domain::ContactId;
    use phonebook_store::{ContactService, MemoryStore, ServiceErrorKind};
    use serde_json::json;

    #[test]
    fn routes_collection_and_item_paths() {
        assert_eq!(route("GET", "/contacts"), Ok(Route::List));
        assert_eq!(route("post", "/contacts/"), Ok(Route::Create));
        assert_eq!(route("GET", "/contacts/7"), Ok(Route::Get(ContactId(7))));
        assert_eq!(route("PUT", "/contacts/7"), Ok(Route::Update(ContactId(7))));
        assert_eq!(
            route("DELETE", "/contacts/7?force=1"),
            Ok(Route::Delete(ContactId(7)))
        );
    }

    #[test]
    fn rejects_unknown_paths_methods_and_ids() {
        assert!(matches!(
            route("GET", "/people"),
            Err(RouteError::UnknownPath(_))
        ));
        assert!(matches!(
            route("DELETE", "/contacts"),
            Err(RouteError::MethodNotAllowed(_))
        ));
        assert!(matches!(
            route("GET", "/contacts/abc"),
            Err(RouteError::InvalidId(_))
        ));
    }

    #[test]
    fn maps_error_kinds_to_statuses() {
        assert_eq!(status_for(ServiceErrorKind::Validation), 400);
        assert_eq!(status_for(ServiceErrorKind::NotFound), 404);
        assert_eq!(status_for(ServiceErrorKind::Conflict), 409);
    }

    #[test]
    fn create_returns_wire_record() {
        let service = ContactService::new(MemoryStore::new());
        let api = Api::new(&service, false);
        let response = api.handle_line(
            &json!({
                "method": "POST",
                "path": "/contacts",
                "body": {"name": "Egor", "phoneNumber": "+375293451267", "address": "Minsk"}
            })
            .to_string(),
        );
        assert_eq!(response.status, 200);
        assert_eq!(response.body["id"], 1);
        assert_eq!(response.body["phoneNumber"], "+375293451267");
    }

    #[test]
    fn missing_body_is_a_bad_request() {
        let service = ContactService::new(MemoryStore::new());
        let api = Api::new(&service, false);
        let response = api.handle_line(r#"{"method":"POST","path":"/contacts"}"#);
        assert_eq!(response.status, STATUS_BAD_REQUEST);
        assert_eq!(response.body["status"], "ERROR");
        assert_eq!(response.body["code"], 400);
    }

    #[test]
    fn malformed_line_is_a_bad_request() {
        let service = ContactService::new(MemoryStore::new());
        let api = Api::new(&service, false);
        let response = api.handle_line("{not json");
        assert_eq!(response.status, STATUS_BAD_REQUEST);
    }

    #[test]
    fn delete_reports_message_then_not_found() {
        let service = ContactService::new(MemoryStore::with_samples());
        let api = Api::new(&service, false);
        let first = api.handle_line(r#"{"method":"DELETE","path":"/contacts/1"}"#);
        assert_eq!(first.status, 200);
        assert_eq!(first.body, json!("Contact deleted successfully"));
        let second = api.handle_line(r#"{"method":"DELETE","path":"/contacts/1"}"#);
        assert_eq!(second.status, 404);
    }
}
