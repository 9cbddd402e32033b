use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Admin, Payment, Registration, User};

/// JSON body extractor whose rejections share the `{error}` shape of every
/// other failure instead of axum's plain-text 4xx.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreated {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub message: String,
    pub payment: Payment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRecorded {
    pub message: String,
    pub registration: Registration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAdded {
    pub message: String,
    pub admin: Admin,
}
