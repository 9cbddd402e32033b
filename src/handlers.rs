//! One insert or one select per request; nothing is validated beyond the
//! shape of the JSON body.

use axum::{extract::State, response::Json};
use diesel::prelude::*;

use crate::dtos::{AdminAdded, ApiJson, PaymentRecorded, RegistrationRecorded, UserCreated};
use crate::error::AppError;
use crate::models::{
    Admin, NewAdmin, NewPayment, NewRegistration, NewUser, Payment, Registration, User,
};
use crate::schema::{admins, payments, registrations, users};
use crate::state::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> Result<Json<UserCreated>, AppError> {
    let user: User = state
        .interact(|conn| {
            diesel::insert_into(users::table)
                .values(new_user)
                .returning(User::as_returning())
                .get_result(conn)
        })
        .await?;
    tracing::info!(user_id = user.id, "user registered");

    Ok(Json(UserCreated {
        message: "User registered".to_string(),
        user,
    }))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let rows: Vec<User> = state
        .interact(|conn| {
            users::table
                .order(users::id.asc())
                .select(User::as_select())
                .load(conn)
        })
        .await?;
    tracing::debug!(count = rows.len(), "listed users");
    Ok(Json(rows))
}

pub async fn create_payment(
    State(state): State<AppState>,
    ApiJson(new_payment): ApiJson<NewPayment>,
) -> Result<Json<PaymentRecorded>, AppError> {
    let payment: Payment = state
        .interact(|conn| {
            diesel::insert_into(payments::table)
                .values(new_payment)
                .returning(Payment::as_returning())
                .get_result(conn)
        })
        .await?;
    tracing::info!(
        payment_id = payment.id,
        user_id = payment.user_id,
        amount = payment.amount,
        status = %payment.status,
        "payment recorded"
    );

    Ok(Json(PaymentRecorded {
        message: "Payment recorded".to_string(),
        payment,
    }))
}

pub async fn list_payments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let rows: Vec<Payment> = state
        .interact(|conn| {
            payments::table
                .order(payments::id.asc())
                .select(Payment::as_select())
                .load(conn)
        })
        .await?;
    tracing::debug!(count = rows.len(), "listed payments");
    Ok(Json(rows))
}

pub async fn create_registration(
    State(state): State<AppState>,
    ApiJson(new_registration): ApiJson<NewRegistration>,
) -> Result<Json<RegistrationRecorded>, AppError> {
    let registration: Registration = state
        .interact(|conn| {
            diesel::insert_into(registrations::table)
                .values(new_registration)
                .returning(Registration::as_returning())
                .get_result(conn)
        })
        .await?;
    tracing::info!(
        registration_id = registration.id,
        user_id = registration.user_id,
        event = %registration.event_name,
        "event registration recorded"
    );

    Ok(Json(RegistrationRecorded {
        message: "Event registration recorded".to_string(),
        registration,
    }))
}

pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>, AppError> {
    let rows: Vec<Registration> = state
        .interact(|conn| {
            registrations::table
                .order(registrations::id.asc())
                .select(Registration::as_select())
                .load(conn)
        })
        .await?;
    tracing::debug!(count = rows.len(), "listed registrations");
    Ok(Json(rows))
}

pub async fn create_admin(
    State(state): State<AppState>,
    ApiJson(new_admin): ApiJson<NewAdmin>,
) -> Result<Json<AdminAdded>, AppError> {
    let admin: Admin = state
        .interact(|conn| {
            diesel::insert_into(admins::table)
                .values(new_admin)
                .returning(Admin::as_returning())
                .get_result(conn)
        })
        .await?;
    tracing::info!(admin_id = admin.id, "admin added");

    Ok(Json(AdminAdded {
        message: "Admin added".to_string(),
        admin,
    }))
}

pub async fn list_admins(State(state): State<AppState>) -> Result<Json<Vec<Admin>>, AppError> {
    let rows: Vec<Admin> = state
        .interact(|conn| {
            admins::table
                .order(admins::id.asc())
                .select(Admin::as_select())
                .load(conn)
        })
        .await?;
    tracing::debug!(count = rows.len(), "listed admins");
    Ok(Json(rows))
}
