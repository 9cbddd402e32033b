use crate::registration::Notice;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    /// Contact messages are only logged; there is no endpoint behind them.
    pub fn submit(&mut self) -> Notice {
        if !self.is_complete() {
            return Notice::error("Missing Information", "Please fill in all fields.");
        }

        tracing::info!(
            name = %self.name,
            email = %self.email,
            message = %self.message,
            "contact form submitted"
        );
        *self = Self::default();

        Notice::success(
            "Message Sent!",
            "Thank you for reaching out. We'll get back to you soon!",
        )
    }
}
