use serde::{Deserialize, Serialize};
use crate::models::user::{Role, User};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Campos del formulario `application/x-www-form-urlencoded`
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("email".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Resultado de un login correcto
#[derive(Clone, PartialEq, Debug)]
pub struct LoginOutcome {
    pub redirect_url: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct VerifyResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DashboardResponse {
    pub user: User,
}

/// Datos del formulario de registro (multipart)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department_name: String,
    pub rol: String,
}

impl RegisterData {
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("name".to_string(), self.name.clone()),
            ("email".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
            ("department_name".to_string(), self.department_name.clone()),
            ("rol".to_string(), self.rol.clone()),
        ]
    }

    /// Validación mínima antes de enviar
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Por favor, completa todos los campos obligatorios".to_string());
        }
        if !self.email.contains('@') {
            return Err("Email inválido".to_string());
        }
        if Role::parse(&self.rol).is_none() {
            return Err("Selecciona un rol válido".to_string());
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Respuesta genérica `{message}` / `{detail}` de los endpoints de cuenta
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_without_redirect() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"access_token":"a.b.c","token_type":"bearer"}"#).unwrap();
        assert_eq!(parsed.access_token, "a.b.c");
        assert_eq!(parsed.redirect_url, None);
    }

    #[test]
    fn reset_request_uses_camel_case_confirm() {
        let body = serde_json::to_value(ResetPasswordRequest {
            token: "tok".into(),
            password: "p1".into(),
            password_confirm: "p1".into(),
        })
        .unwrap();
        assert_eq!(body["passwordConfirm"], "p1");
    }

    #[test]
    fn register_validation() {
        let mut data = RegisterData {
            name: "Ana".into(),
            email: "ana@docs.flow".into(),
            password: "secreto".into(),
            department_name: "Finanzas".into(),
            rol: "user".into(),
        };
        assert!(data.validate().is_ok());

        data.rol = "superuser".into();
        assert!(data.validate().is_err());

        data.rol = "admin".into();
        data.email = "sin-arroba".into();
        assert_eq!(data.validate(), Err("Email inválido".to_string()));
    }
}
