//! HTTP response handling.
//!
//! [`HttpResponse`] is the raw outcome of one round trip. It is decoded and
//! classified into either a JSON value or an [`ApiError`], and is never kept
//! after that.

use serde_json::Value;

use crate::clients::errors::ApiError;
use crate::clients::http_request::HttpMethod;

/// Number of body characters quoted in a JSON parse error message.
pub const JSON_ERROR_SNIPPET_CHARS: usize = 250;

/// Status code and raw body of a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Undecoded response body (after gzip decoding).
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(code: u16, body: impl Into<String>) -> Self {
        Self {
            code,
            body: body.into(),
        }
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] of kind `JsonParse` (status 200, raw body
    /// attached) if the body is not valid JSON or decodes to `null`. An empty
    /// body is not valid JSON.
    pub fn parse_json(&self) -> Result<Value, ApiError> {
        match serde_json::from_str(&self.body) {
            Ok(Value::Null) | Err(_) => Err(ApiError::json_parse(
                self.body.clone(),
                JSON_ERROR_SNIPPET_CHARS,
            )),
            Ok(value) => Ok(value),
        }
    }

    /// Decodes and classifies the response for a request made with `method`.
    ///
    /// The body is decoded first, so an unparsable body yields a `JsonParse`
    /// error even when the status itself was an error status.
    ///
    /// # Errors
    ///
    /// Returns a `JsonParse` [`ApiError`] for an invalid body, or an
    /// [`ApiError`] classified by status when `method` does not accept it.
    pub fn into_json(self, method: HttpMethod) -> Result<Value, ApiError> {
        let body = self.parse_json()?;
        if method.accepts(self.code) {
            Ok(body)
        } else {
            Err(ApiError::from_status(self.code, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::errors::{ErrorBody, ErrorKind};
    use serde_json::json;

    #[test]
    fn test_accepted_status_returns_decoded_body() {
        let response = HttpResponse::new(200, r#"{"id":1,"login":"admin"}"#);
        assert_eq!(
            response.into_json(HttpMethod::Get).unwrap(),
            json!({"id": 1, "login": "admin"})
        );
    }

    #[test]
    fn test_validation_status_is_returned_for_post() {
        let body = r#"{"status":"error","errors":{"name":["Invalid"]}}"#;
        let response = HttpResponse::new(422, body);
        let value = response.into_json(HttpMethod::Post).unwrap();
        assert_eq!(value["status"], "error");
    }

    #[test]
    fn test_validation_status_is_error_for_get() {
        let error = HttpResponse::new(400, r#"{"message":"Bad filter"}"#)
            .into_json(HttpMethod::Get)
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Generic);
        assert_eq!(error.status, 400);
        assert_eq!(error.message, "Bad filter");
    }

    #[test]
    fn test_error_status_carries_decoded_body() {
        let error = HttpResponse::new(404, r#"{"message":"Zone not found"}"#)
            .into_json(HttpMethod::Delete)
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
        assert_eq!(error.body, ErrorBody::Json(json!({"message": "Zone not found"})));
    }

    #[test]
    fn test_invalid_json_takes_precedence_over_status() {
        let error = HttpResponse::new(503, "<html>Service Unavailable</html>")
            .into_json(HttpMethod::Get)
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::JsonParse);
        assert_eq!(error.status, 200);
        assert_eq!(error.message, "Error while parsing json: <html>Service Unavailable</html>");
        assert_eq!(error.body, ErrorBody::Raw("<html>Service Unavailable</html>".to_string()));
    }

    #[test]
    fn test_null_body_is_parse_error() {
        let error = HttpResponse::new(200, "null")
            .into_json(HttpMethod::Get)
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::JsonParse);
        assert_eq!(error.status, 200);
        assert_eq!(error.message, "Error while parsing json: null");
        assert_eq!(error.body, ErrorBody::Raw("null".to_string()));
    }

    #[test]
    fn test_empty_body_is_parse_error() {
        let error = HttpResponse::new(200, "").parse_json().unwrap_err();
        assert_eq!(error.kind, ErrorKind::JsonParse);
        assert_eq!(error.message, "Error while parsing json: ");
    }
}
