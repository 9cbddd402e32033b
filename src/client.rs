//! Typed HTTP client for the registration API.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::dtos::{AdminAdded, ErrorBody, PaymentRecorded, RegistrationRecorded, UserCreated};
use crate::models::{
    Admin, NewAdmin, NewPayment, NewRegistration, NewUser, Payment, Registration, User,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },
}

/// The two remote writes the registration flow depends on.
#[async_trait]
pub trait RegistrationApi {
    async fn register_event(&self, request: &NewRegistration) -> Result<Registration, ClientError>;
    async fn make_payment(&self, request: &NewPayment) -> Result<Payment, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            admin_token: None,
        }
    }

    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn register_user(&self, request: &NewUser) -> Result<User, ClientError> {
        let created: UserCreated = self.post("/api/register", request).await?;
        Ok(created.user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get("/api/users").await
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>, ClientError> {
        self.get("/api/payments").await
    }

    pub async fn list_registrations(&self) -> Result<Vec<Registration>, ClientError> {
        self.get("/api/registrations").await
    }

    pub async fn create_admin(&self, request: &NewAdmin) -> Result<Admin, ClientError> {
        let added: AdminAdded = self.post("/api/admin", request).await?;
        Ok(added.admin)
    }

    pub async fn list_admins(&self) -> Result<Vec<Admin>, ClientError> {
        self.get("/api/admins").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.admin_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl RegistrationApi for ApiClient {
    async fn register_event(&self, request: &NewRegistration) -> Result<Registration, ClientError> {
        let recorded: RegistrationRecorded = self.post("/api/register-event", request).await?;
        Ok(recorded.registration)
    }

    async fn make_payment(&self, request: &NewPayment) -> Result<Payment, ClientError> {
        let recorded: PaymentRecorded = self.post("/api/payment", request).await?;
        Ok(recorded.payment)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("request failed with status {status}"),
    };
    tracing::debug!(status = status.as_u16(), %message, "api call failed");

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
