// ============================================================================
// HTTP - Transporte hacia el API remoto (Stateless)
// ============================================================================
// `ApiRequest`/`ApiResponse` describen la llamada sin depender del navegador;
// `GlooTransport` la ejecuta con gloo-net. Los tests usan un transporte falso.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use crate::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// application/x-www-form-urlencoded
    Form(Vec<(String, String)>),
    /// multipart/form-data
    Multipart(Vec<(String, String)>),
    Json(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    pub fn multipart(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, AuthError> {
        let value = serde_json::to_value(value)
            .map_err(|e| AuthError::Transport(format!("Serialization error: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false)
    }

    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, AuthError> {
        serde_json::from_str(&self.body)
            .map_err(|e| AuthError::MalformedResponse(format!("Parse error: {}", e)))
    }

    /// Mensaje de error del servidor: `{detail}` (texto o lista de validación de FastAPI)
    /// o el cuerpo en texto plano. Nunca devuelve HTML.
    pub fn detail(&self) -> Option<String> {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&self.body) {
            return match value.get("detail") {
                Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
                Some(serde_json::Value::Array(items)) => {
                    let msgs: Vec<&str> = items
                        .iter()
                        .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                        .collect();
                    if msgs.is_empty() { None } else { Some(msgs.join(", ")) }
                }
                _ => None,
            };
        }

        let text = self.body.trim();
        if text.is_empty() || self.is_html() || text.starts_with('<') {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Transporte HTTP. `?Send`: todo corre en el hilo del navegador
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError>;
}

/// Transporte real sobre `gloo_net::http::Request`
#[derive(Clone)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn js_error(context: &str, err: JsValue) -> AuthError {
    AuthError::Transport(format!("{}: {:?}", context, err))
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AuthError> {
        let url = self.url(&request.path);

        let mut builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Form(fields) => {
                let params = web_sys::UrlSearchParams::new()
                    .map_err(|e| js_error("UrlSearchParams", e))?;
                for (key, value) in fields {
                    params.append(key, value);
                }
                builder
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(params.to_string())
            }
            RequestBody::Multipart(fields) => {
                // Sin Content-Type: el navegador pone el boundary
                let form = web_sys::FormData::new().map_err(|e| js_error("FormData", e))?;
                for (key, value) in fields {
                    form.append_with_str(key, value)
                        .map_err(|e| js_error("FormData.append", e))?;
                }
                builder.body(form)
            }
            RequestBody::Json(value) => builder.json(value),
        }
        .map_err(|e| AuthError::Transport(format!("Request build error: {}", e)))?;

        log::debug!("🌐 [HTTP] {:?} {}", request.method, url);

        let response = prepared
            .send()
            .await
            .map_err(|e| AuthError::Transport(format!("Network error: {}", e)))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response.text().await.unwrap_or_default();

        log::debug!("🌐 [HTTP] {} -> {}", url, status);

        Ok(ApiResponse { status, content_type, body })
    }
}
