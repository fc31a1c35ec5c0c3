//! Payments
//!
//! A payment tracks how an order is paid for. It never reaches back into the
//! order or the seat inventory; verification looks at its own state only.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;
use tracing::info;

use crate::{errors::ErrorKind, pricing::Price, uuids::TypedUuid};

/// Payment ID
pub type PaymentId = TypedUuid<Payment>;

/// Errors raised by payments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Method name outside the accepted set.
    #[error("unsupported payment method {0}, choose from: credit_card, debit_card, cash, paypal")]
    UnsupportedMethod(String),

    /// Amount below zero.
    #[error("payment amount cannot be negative, got {0}")]
    NegativeAmount(String),

    /// Payment already settled.
    #[error("payment is {0}, not pending")]
    NotPending(PaymentStatus),

    /// Only cash payments are settled on delivery.
    #[error("{0} payments cannot be paid on delivery")]
    NotCash(PaymentMethod),
}

impl PaymentError {
    /// Category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::UnsupportedMethod(_)
            | PaymentError::NegativeAmount(_)
            | PaymentError::NotCash(_) => ErrorKind::Validation,
            PaymentError::NotPending(_) => ErrorKind::State,
        }
    }
}

/// How the purchaser pays.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Credit card
    CreditCard,

    /// Debit card
    DebitCard,

    /// Cash, collected on delivery
    Cash,

    /// `PayPal`
    PayPal,
}

impl PaymentMethod {
    /// Every accepted method.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Cash,
        PaymentMethod::PayPal,
    ];

    /// Name as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::PayPal => "paypal",
        }
    }

    /// Whether the payment is settled when it is processed, rather than on delivery.
    pub fn settles_immediately(self) -> bool {
        !matches!(self, PaymentMethod::Cash)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| PaymentError::UnsupportedMethod(s.to_string()))
    }
}

/// Where a payment is in its lifecycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    /// Not yet settled
    #[default]
    Pending,

    /// Card or online payment taken
    Processed,

    /// Cash collected on delivery
    PaidOnDelivery,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processed => "processed",
            PaymentStatus::PaidOnDelivery => "paid_on_delivery",
        })
    }
}

/// A payment for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    id: PaymentId,
    amount: Price,
    method: PaymentMethod,
    status: PaymentStatus,
    transaction_date: Option<Timestamp>,
}

impl Payment {
    /// Create a pending payment.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NegativeAmount`] if `amount` is below zero.
    pub fn new(amount: Price, method: PaymentMethod) -> Result<Self, PaymentError> {
        if amount.is_negative() {
            return Err(PaymentError::NegativeAmount(amount.to_string()));
        }

        Ok(Self {
            id: PaymentId::new(),
            amount,
            method,
            status: PaymentStatus::Pending,
            transaction_date: None,
        })
    }

    /// Payment ID
    pub fn id(&self) -> PaymentId {
        self.id
    }

    /// Amount paid
    pub fn amount(&self) -> Price {
        self.amount
    }

    /// Payment method, fixed at creation
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Current status
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// When the payment was processed
    pub fn transaction_date(&self) -> Option<Timestamp> {
        self.transaction_date
    }

    /// Record when the transaction happened.
    pub fn set_transaction_date(&mut self, at: Timestamp) {
        self.transaction_date = Some(at);
    }

    /// Process the payment now.
    ///
    /// # Errors
    ///
    /// See [`Payment::process_payment_at`].
    pub fn process_payment(&mut self) -> Result<(), PaymentError> {
        self.process_payment_at(Timestamp::now())
    }

    /// Process the payment, stamping `at` unless a transaction date is already set.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NotPending`] if the payment was already settled.
    pub fn process_payment_at(&mut self, at: Timestamp) -> Result<(), PaymentError> {
        self.ensure_pending()?;

        self.status = PaymentStatus::Processed;

        let at = *self.transaction_date.get_or_insert(at);

        info!(
            payment = %self.id,
            method = %self.method,
            amount = %self.amount,
            %at,
            "payment processed"
        );

        Ok(())
    }

    /// Settle a cash payment on delivery.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NotCash`] for non-cash methods and
    /// [`PaymentError::NotPending`] if the payment was already settled.
    pub fn mark_paid_on_delivery(&mut self) -> Result<(), PaymentError> {
        if self.method != PaymentMethod::Cash {
            return Err(PaymentError::NotCash(self.method));
        }

        self.ensure_pending()?;

        self.status = PaymentStatus::PaidOnDelivery;

        info!(payment = %self.id, amount = %self.amount, "cash payment collected");

        Ok(())
    }

    /// Whether the payment went through for its method.
    pub fn verify_payment(&self) -> bool {
        match self.method {
            PaymentMethod::CreditCard | PaymentMethod::DebitCard | PaymentMethod::PayPal => {
                self.status == PaymentStatus::Processed
            }
            PaymentMethod::Cash => self.status == PaymentStatus::PaidOnDelivery,
        }
    }

    fn ensure_pending(&self) -> Result<(), PaymentError> {
        if self.status != PaymentStatus::Pending {
            return Err(PaymentError::NotPending(self.status));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::pricing::major;

    use super::*;

    #[test]
    fn methods_parse_from_their_names() -> TestResult {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>()?, method);
        }

        let result = "bitcoin".parse::<PaymentMethod>();

        assert_eq!(
            result,
            Err(PaymentError::UnsupportedMethod("bitcoin".to_string()))
        );
        assert_eq!(
            result.map_err(|error| error.kind()),
            Err(ErrorKind::Validation)
        );

        Ok(())
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let result = Payment::new(Money::from_minor(-1, USD), PaymentMethod::Cash);

        assert!(matches!(result, Err(PaymentError::NegativeAmount(_))));
    }

    #[test]
    fn card_payment_verifies_once_processed() -> TestResult {
        let mut payment = Payment::new(major(130, USD), PaymentMethod::CreditCard)?;

        assert!(!payment.verify_payment());

        payment.process_payment()?;

        assert!(payment.verify_payment());
        assert_eq!(payment.status(), PaymentStatus::Processed);
        assert!(payment.transaction_date().is_some());

        Ok(())
    }

    #[test]
    fn cash_payment_verifies_once_paid_on_delivery() -> TestResult {
        let mut payment = Payment::new(major(130, USD), PaymentMethod::Cash)?;

        assert!(!payment.verify_payment());

        payment.mark_paid_on_delivery()?;

        assert!(payment.verify_payment());

        Ok(())
    }

    #[test]
    fn processed_cash_does_not_verify() -> TestResult {
        let mut payment = Payment::new(major(130, USD), PaymentMethod::Cash)?;

        payment.process_payment()?;

        assert!(!payment.verify_payment());

        Ok(())
    }

    #[test]
    fn paid_on_delivery_is_cash_only() -> TestResult {
        let mut payment = Payment::new(major(130, USD), PaymentMethod::PayPal)?;

        assert_eq!(
            payment.mark_paid_on_delivery(),
            Err(PaymentError::NotCash(PaymentMethod::PayPal))
        );

        Ok(())
    }

    #[test]
    fn payments_are_processed_once() -> TestResult {
        let mut payment = Payment::new(major(130, USD), PaymentMethod::DebitCard)?;

        payment.process_payment()?;

        let result = payment.process_payment();

        assert_eq!(
            result,
            Err(PaymentError::NotPending(PaymentStatus::Processed))
        );
        assert_eq!(result.map_err(|error| error.kind()), Err(ErrorKind::State));

        Ok(())
    }

    #[test]
    fn existing_transaction_date_is_kept() -> TestResult {
        let recorded: Timestamp = "2025-05-01T10:00:00Z".parse()?;
        let later: Timestamp = "2025-05-02T10:00:00Z".parse()?;
        let mut payment = Payment::new(major(130, USD), PaymentMethod::CreditCard)?;

        payment.set_transaction_date(recorded);
        payment.process_payment_at(later)?;

        assert_eq!(payment.transaction_date(), Some(recorded));

        Ok(())
    }
}
