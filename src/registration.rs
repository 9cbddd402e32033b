//! Team registration form and its submission flow.
//!
//! The flow validates locally, then issues at most one remote write per user
//! action: a registration on `submit`, and a payment on `confirm_payment`.
//! Nothing is retried or deduplicated, and a failed payment never undoes the
//! registration that preceded it.

use async_trait::async_trait;
use thiserror::Error;

use crate::client::{ClientError, RegistrationApi};
use crate::models::{NewPayment, NewRegistration, Payment, Registration};
use crate::tracking::PaymentStatus;

pub const PAID: &str = PaymentStatus::Paid.as_str();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    TeamName,
    CaptainName,
    Player1,
    Player2,
    Player3,
    Player4,
    ContactNumber,
    Email,
}

impl RequiredField {
    pub const ALL: [RequiredField; 8] = [
        RequiredField::TeamName,
        RequiredField::CaptainName,
        RequiredField::Player1,
        RequiredField::Player2,
        RequiredField::Player3,
        RequiredField::Player4,
        RequiredField::ContactNumber,
        RequiredField::Email,
    ];

    /// Form key as the browser form names it.
    pub fn key(self) -> &'static str {
        match self {
            RequiredField::TeamName => "teamName",
            RequiredField::CaptainName => "captainName",
            RequiredField::Player1 => "player1",
            RequiredField::Player2 => "player2",
            RequiredField::Player3 => "player3",
            RequiredField::Player4 => "player4",
            RequiredField::ContactNumber => "contactNumber",
            RequiredField::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRegistrationForm {
    pub team_name: String,
    pub captain_name: String,
    pub player1: String,
    pub player2: String,
    pub player3: String,
    pub player4: String,
    pub player5: String,
    pub contact_number: String,
    pub email: String,
}

impl TeamRegistrationForm {
    pub fn value(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::TeamName => &self.team_name,
            RequiredField::CaptainName => &self.captain_name,
            RequiredField::Player1 => &self.player1,
            RequiredField::Player2 => &self.player2,
            RequiredField::Player3 => &self.player3,
            RequiredField::Player4 => &self.player4,
            RequiredField::ContactNumber => &self.contact_number,
            RequiredField::Email => &self.email,
        }
    }

    /// Required fields that are empty or whitespace, in form order. A value of
    /// only spaces is treated as missing, which is stricter than a plain
    /// emptiness check.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    pub fn players(&self) -> Vec<&str> {
        [
            &self.player1,
            &self.player2,
            &self.player3,
            &self.player4,
            &self.player5,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|player| !player.trim().is_empty())
        .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

/// Decides the status a payment is recorded with. Real authorization would
/// live behind this seam; none exists today.
#[async_trait]
pub trait PaymentGateway {
    async fn authorize(&self, user_id: i32, amount: i32) -> Result<String, ClientError>;
}

/// Asserts `"Paid"` without contacting anyone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientAssertedPayment;

#[async_trait]
impl PaymentGateway for ClientAssertedPayment {
    async fn authorize(&self, _user_id: i32, _amount: i32) -> Result<String, ClientError> {
        Ok(PAID.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowVariant {
    RegisterOnly,
    RegisterThenPay,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    Editing,
    Validating,
    Invalid(Vec<RequiredField>),
    Submitting,
    Succeeded(Registration),
    PaymentPending(Registration),
    PaymentConfirmed {
        registration: Registration,
        payment: Payment,
    },
    Cancelled(Registration),
    Failed(String),
}

impl FlowState {
    fn name(&self) -> &'static str {
        match self {
            FlowState::Editing => "Editing",
            FlowState::Validating => "Validating",
            FlowState::Invalid(_) => "Invalid",
            FlowState::Submitting => "Submitting",
            FlowState::Succeeded(_) => "Succeeded",
            FlowState::PaymentPending(_) => "PaymentPending",
            FlowState::PaymentConfirmed { .. } => "PaymentConfirmed",
            FlowState::Cancelled(_) => "Cancelled",
            FlowState::Failed(_) => "Failed",
        }
    }

    /// `submit` holds `&mut self` across its await, so no caller can observe
    /// `Validating` or `Submitting` while a request is in flight. Seeing one
    /// here means the submit future was dropped before it finished; the form
    /// is untouched and the user may carry on.
    fn accepts_edits(&self) -> bool {
        matches!(
            self,
            FlowState::Editing
                | FlowState::Validating
                | FlowState::Invalid(_)
                | FlowState::Submitting
                | FlowState::Failed(_)
        )
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlowError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Registration of one team for one event.
#[derive(Debug, Clone)]
pub struct RegistrationFlow {
    user_id: i32,
    event_name: String,
    registration_fee: i32,
    variant: FlowVariant,
    form: TeamRegistrationForm,
    state: FlowState,
}

impl RegistrationFlow {
    pub fn new(
        user_id: i32,
        event_name: impl Into<String>,
        registration_fee: i32,
        variant: FlowVariant,
    ) -> Self {
        Self {
            user_id,
            event_name: event_name.into(),
            registration_fee,
            variant,
            form: TeamRegistrationForm::default(),
            state: FlowState::Editing,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn form(&self) -> &TeamRegistrationForm {
        &self.form
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Mutable access to the form. Returns the flow to `Editing` after an
    /// invalid or failed submission.
    pub fn edit(&mut self) -> Result<&mut TeamRegistrationForm, FlowError> {
        self.ensure(self.state.accepts_edits(), "edit")?;
        self.state = FlowState::Editing;
        Ok(&mut self.form)
    }

    pub async fn submit<A>(&mut self, api: &A) -> Result<Notice, FlowError>
    where
        A: RegistrationApi + Sync + ?Sized,
    {
        self.ensure(self.state.accepts_edits(), "submit")?;
        self.state = FlowState::Validating;

        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(
                missing = ?missing.iter().map(|f| f.key()).collect::<Vec<_>>(),
                "registration form incomplete"
            );
            self.state = FlowState::Invalid(missing);
            return Ok(Notice::error(
                "Missing Information",
                "Please fill in all required fields.",
            ));
        }

        self.state = FlowState::Submitting;
        let request = NewRegistration {
            user_id: self.user_id,
            event_name: self.event_name.clone(),
        };

        match api.register_event(&request).await {
            Ok(registration) => {
                tracing::info!(
                    registration_id = registration.id,
                    team = %self.form.team_name,
                    event = %self.event_name,
                    "team registered"
                );
                let notice = Notice::success(
                    "Registration Successful",
                    format!("Your team has been registered for {}", self.event_name),
                );
                self.state = match self.variant {
                    FlowVariant::RegisterOnly => {
                        self.form.reset();
                        FlowState::Succeeded(registration)
                    }
                    FlowVariant::RegisterThenPay => FlowState::PaymentPending(registration),
                };
                Ok(notice)
            }
            Err(err) => {
                tracing::warn!(error = %err, event = %self.event_name, "team registration failed");
                let message = err.to_string();
                self.state = FlowState::Failed(message.clone());
                Ok(Notice::error("Error", message))
            }
        }
    }

    /// Records the payment for a pending registration. A failure leaves the
    /// registration in place and the flow still pending.
    pub async fn confirm_payment<A, G>(&mut self, api: &A, gateway: &G) -> Result<Notice, FlowError>
    where
        A: RegistrationApi + Sync + ?Sized,
        G: PaymentGateway + Sync + ?Sized,
    {
        let FlowState::PaymentPending(registration) = &self.state else {
            return Err(self.invalid("confirm payment"));
        };
        let registration = registration.clone();

        let outcome = match gateway.authorize(self.user_id, self.registration_fee).await {
            Ok(status) => {
                let request = NewPayment {
                    user_id: self.user_id,
                    amount: self.registration_fee,
                    status,
                };
                api.make_payment(&request).await
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(payment) => {
                tracing::info!(
                    payment_id = payment.id,
                    registration_id = registration.id,
                    amount = payment.amount,
                    "registration fee recorded"
                );
                self.form.reset();
                self.state = FlowState::PaymentConfirmed {
                    registration,
                    payment,
                };
                Ok(Notice::success(
                    "Registration Successful!",
                    format!(
                        "Your team has been registered and payment of ₹{} is successful!",
                        self.registration_fee
                    ),
                ))
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    registration_id = registration.id,
                    "payment failed after registration"
                );
                Ok(Notice::error("Error", err.to_string()))
            }
        }
    }

    pub fn cancel_payment(&mut self) -> Result<(), FlowError> {
        let FlowState::PaymentPending(registration) = &self.state else {
            return Err(self.invalid("cancel payment"));
        };
        let registration = registration.clone();
        tracing::info!(registration_id = registration.id, "payment cancelled");
        self.state = FlowState::Cancelled(registration);
        Ok(())
    }

    fn ensure(&self, allowed: bool, action: &'static str) -> Result<(), FlowError> {
        if allowed {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}
