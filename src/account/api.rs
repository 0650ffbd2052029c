//! Auth backend client
//!
//! The HTTP stack is supplied by the host through [`HttpTransport`]; this
//! module only builds JSON requests and interprets the responses.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use super::User;

pub const DEFAULT_BASE_URL: &str = "https://virtuallab-production.up.railway.app";

/// Message shown when a rejected request carries no reason
const FALLBACK_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unable to reach the server. Make sure the backend is running.")]
    Network(#[source] TransportError),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("Unexpected response from server: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Failure below HTTP: DNS, connection refused, timeout
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request)
    }
}

/// Backend base URL and endpoint paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub register: String,
    pub login: String,
    pub logout: String,
    pub profile: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            register: "/auth/register".into(),
            login: "/auth/login".into(),
            logout: "/auth/logout".into(),
            profile: "/auth/profile".into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Fields sent when saving the profile screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
}

pub trait AuthApi {
    fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
    fn signup(&self, name: &str, email: &str, password: &str) -> Result<Value, ApiError>;
    fn logout(&self, token: &str) -> Result<(), ApiError>;
    fn get_profile(&self, token: &str) -> Result<User, ApiError>;
    /// Returns the server's copy of the user when the response includes one
    fn update_profile(&self, token: &str, update: &ProfileUpdate)
    -> Result<Option<User>, ApiError>;
}

/// JSON-over-HTTP implementation of [`AuthApi`]
#[derive(Debug, Clone)]
pub struct RestAuthApi<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: HttpTransport> RestAuthApi<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn call(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        let request = ApiRequest {
            method,
            url: self.endpoints.url(path),
            headers,
            body: body.map(|b| b.to_string()),
        };

        let response = self.transport.send(&request).map_err(|e| {
            log::warn!("{} {} failed: {}", method.as_str(), request.url, e);
            ApiError::Network(e)
        })?;

        let data: Option<Value> = serde_json::from_str(&response.body).ok();

        if !response.is_success() {
            let message = data
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
            log::warn!(
                "{} {} rejected with {}: {}",
                method.as_str(),
                request.url,
                response.status,
                message
            );
            return Err(if response.status == 401 {
                ApiError::Unauthorized(message)
            } else {
                ApiError::Rejected {
                    status: response.status,
                    message,
                }
            });
        }

        data.ok_or_else(|| ApiError::MalformedResponse("body is not JSON".into()))
    }
}

/// `detail`, then `message`, whichever is a non-empty string
fn error_message(data: &Value) -> Option<String> {
    ["detail", "message"].iter().find_map(|key| {
        data.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

fn parse_user(value: &Value) -> Result<User, ApiError> {
    serde_json::from_value(value.clone())
        .map_err(|e| ApiError::MalformedResponse(format!("invalid user record: {}", e)))
}

impl<T: HttpTransport> AuthApi for RestAuthApi<T> {
    fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let data = self.call(
            HttpMethod::Post,
            &self.endpoints.login,
            Some(json!({ "email": email, "password": password })),
            None,
        )?;

        let token = data
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());
        let user = data.get("user").filter(|u| u.is_object());
        match (token, user) {
            (Some(token), Some(user)) => Ok(LoginResponse {
                access_token: token.to_string(),
                user: parse_user(user)?,
            }),
            _ => Err(ApiError::MalformedResponse(
                "login response is missing the token or user".into(),
            )),
        }
    }

    fn signup(&self, name: &str, email: &str, password: &str) -> Result<Value, ApiError> {
        self.call(
            HttpMethod::Post,
            &self.endpoints.register,
            Some(json!({ "name": name, "email": email, "password": password })),
            None,
        )
    }

    fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.call(HttpMethod::Post, &self.endpoints.logout, None, Some(token))?;
        Ok(())
    }

    fn get_profile(&self, token: &str) -> Result<User, ApiError> {
        let data = self.call(HttpMethod::Get, &self.endpoints.profile, None, Some(token))?;
        // Some deployments wrap the record, some return it bare
        let user = match data.get("user") {
            Some(u) if !u.is_null() => u,
            _ => &data,
        };
        if !user.is_object() {
            return Err(ApiError::MalformedResponse("profile not found".into()));
        }
        parse_user(user)
    }

    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, ApiError> {
        let body = serde_json::to_value(update)
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        let data = self.call(
            HttpMethod::Put,
            &self.endpoints.profile,
            Some(body),
            Some(token),
        )?;
        match data.get("user") {
            Some(u) if u.is_object() => parse_user(u).map(Some),
            _ => Ok(None),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTransport;
    use super::*;

    fn api(transport: &FakeTransport) -> RestAuthApi<&FakeTransport> {
        RestAuthApi::new(transport, Endpoints::with_base_url("http://lab.test/"))
    }

    #[test]
    fn test_login_request_shape() {
        let transport = FakeTransport::new();
        transport.reply(
            200,
            r#"{"access_token":"tok","user":{"id":1,"name":"Ada","email":"ada@x"}}"#,
        );
        let res = api(&transport).login("ada@x", "pw").unwrap();
        assert_eq!(res.access_token, "tok");
        assert_eq!(res.user.name, "Ada");

        let requests = transport.requests.borrow();
        let req = &requests[0];
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://lab.test/auth/login");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("Authorization"), None);
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "email": "ada@x", "password": "pw" }));
    }

    #[test]
    fn test_login_requires_token_and_user() {
        let transport = FakeTransport::new();
        transport.reply(200, r#"{"access_token":"tok"}"#);
        let err = api(&transport).login("a", "b").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn test_error_message_precedence() {
        let transport = FakeTransport::new();
        transport
            .reply(400, r#"{"detail":"Email already registered","message":"x"}"#)
            .reply(422, r#"{"message":"Password too short"}"#)
            .reply(500, "<html>oops</html>");
        let api = api(&transport);

        let msgs: Vec<String> = (0..3)
            .map(|_| api.signup("n", "e", "p").unwrap_err().to_string())
            .collect();
        assert_eq!(
            msgs,
            vec!["Email already registered", "Password too short", "Request failed"]
        );
    }

    #[test]
    fn test_unauthorized_and_network() {
        let transport = FakeTransport::new();
        transport.reply(401, r#"{"detail":"Invalid token"}"#).fail();
        let api = api(&transport);

        let err = api.get_profile("bad").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "Invalid token"));

        let err = api.get_profile("bad").unwrap_err();
        assert!(err.is_network());
        assert!(err.to_string().starts_with("Unable to reach the server"));
    }

    #[test]
    fn test_profile_wrapped_or_bare() {
        let transport = FakeTransport::new();
        transport
            .reply(200, r#"{"user":{"name":"Ada","email":"a@x"}}"#)
            .reply(200, r#"{"name":"Bob","email":"b@x"}"#);
        let api = api(&transport);
        assert_eq!(api.get_profile("t").unwrap().name, "Ada");
        assert_eq!(api.get_profile("t").unwrap().name, "Bob");

        let requests = transport.requests.borrow();
        let req = &requests[0];
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.header("Authorization"), Some("Bearer t"));
        assert_eq!(req.body, None);
    }

    #[test]
    fn test_update_profile() {
        let transport = FakeTransport::new();
        transport
            .reply(200, r#"{"user":{"name":"New","email":"n@x"}}"#)
            .reply(200, r#"{"ok":true}"#);
        let api = api(&transport);
        let update = ProfileUpdate {
            name: "New".into(),
            email: "n@x".into(),
            photo: None,
        };

        let user = api.update_profile("t", &update).unwrap();
        assert_eq!(user.map(|u| u.name).as_deref(), Some("New"));
        assert_eq!(api.update_profile("t", &update).unwrap(), None);

        let requests = transport.requests.borrow();
        let req = &requests[0];
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://lab.test/auth/profile");
        assert!(req.body.as_deref().unwrap().contains("\"photo\":null"));
    }
}
