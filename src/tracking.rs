//! Admin-side views over listed payments and registrations. The status column
//! is free-form text; these helpers interpret it without constraining it.

use crate::models::{Payment, Registration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

impl PaymentStatus {
    /// Normalises before matching: surrounding whitespace is ignored and case
    /// does not matter, so `" paid "` reads as `Paid`. Rows written by other
    /// tools with lower-case statuses still count towards revenue.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "paid" => Some(PaymentStatus::Paid),
            "pending" => Some(PaymentStatus::Pending),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(PaymentStatus),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentStats {
    pub total: usize,
    pub paid: usize,
    pub pending: usize,
    pub failed: usize,
    /// Rows whose status is none of the known values.
    pub other: usize,
    /// Sum of `amount` over paid rows.
    pub total_revenue: i64,
}

impl PaymentStats {
    pub fn from_payments(payments: &[Payment]) -> Self {
        payments
            .iter()
            .fold(Self::default(), |mut stats, payment| {
                stats.total += 1;
                match PaymentStatus::parse(&payment.status) {
                    Some(PaymentStatus::Paid) => {
                        stats.paid += 1;
                        stats.total_revenue += i64::from(payment.amount);
                    }
                    Some(PaymentStatus::Pending) => stats.pending += 1,
                    Some(PaymentStatus::Failed) => stats.failed += 1,
                    None => stats.other += 1,
                }
                stats
            })
    }
}

pub fn filter_payments(payments: &[Payment], filter: StatusFilter) -> Vec<&Payment> {
    payments
        .iter()
        .filter(|payment| match filter {
            StatusFilter::All => true,
            StatusFilter::Only(status) => PaymentStatus::parse(&payment.status) == Some(status),
        })
        .collect()
}

/// Case-insensitive substring match on the event name. An empty term matches
/// everything.
pub fn search_registrations<'a>(
    registrations: &'a [Registration],
    term: &str,
) -> Vec<&'a Registration> {
    let needle = term.trim().to_lowercase();
    registrations
        .iter()
        .filter(|registration| registration.event_name.to_lowercase().contains(&needle))
        .collect()
}
