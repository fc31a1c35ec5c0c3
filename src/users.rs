//! Users
//!
//! Purchaser profiles. Credentials and login live outside this crate.

use crate::{orders::OrderId, uuids::TypedUuid};

/// User ID
pub type UserId = TypedUuid<User>;

/// Profile fields a purchaser can change; empty fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Full name
    pub full_name: Option<String>,

    /// Email address
    pub email: Option<String>,

    /// Phone number
    pub phone_number: Option<String>,

    /// Postal address
    pub address: Option<String>,
}

/// A purchaser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    full_name: String,
    email: String,
    phone_number: String,
    address: String,
    purchase_history: Vec<OrderId>,
}

impl User {
    /// Create a user with no purchases.
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            address: address.into(),
            purchase_history: Vec::new(),
        }
    }

    /// Keep an existing id, e.g. when loading from storage.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    /// User ID
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Full name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Postal address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Orders placed, oldest first
    pub fn purchase_history(&self) -> &[OrderId] {
        &self.purchase_history
    }

    /// Change the login name
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    /// Overwrite the fields given in `update`, skipping missing or empty ones.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let fields = [
            (&mut self.full_name, update.full_name),
            (&mut self.email, update.email),
            (&mut self.phone_number, update.phone_number),
            (&mut self.address, update.address),
        ];

        for (field, value) in fields {
            if let Some(value) = value.filter(|value| !value.is_empty()) {
                *field = value;
            }
        }
    }

    /// Remember an order placed by this user.
    pub fn add_purchase(&mut self, order: OrderId) {
        if !self.purchase_history.contains(&order) {
            self.purchase_history.push(order);
        }
    }

    /// Forget an order, e.g. after it was deleted.
    pub fn remove_purchase(&mut self, order: OrderId) {
        self.purchase_history.retain(|id| *id != order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            "ayrton",
            "Ayrton Senna",
            "ayrton@example.com",
            "0123 456789",
            "1 Interlagos Way",
        )
    }

    #[test]
    fn update_profile_skips_empty_fields() {
        let mut user = user();

        user.update_profile(ProfileUpdate {
            full_name: Some(String::new()),
            email: Some("senna@example.com".to_string()),
            phone_number: None,
            address: Some("2 Monaco Road".to_string()),
        });

        assert_eq!(user.full_name(), "Ayrton Senna");
        assert_eq!(user.email(), "senna@example.com");
        assert_eq!(user.phone_number(), "0123 456789");
        assert_eq!(user.address(), "2 Monaco Road");
    }

    #[test]
    fn purchase_history_keeps_order_and_ignores_duplicates() {
        let mut user = user();
        let first = OrderId::new();
        let second = OrderId::new();

        user.add_purchase(first);
        user.add_purchase(second);
        user.add_purchase(first);

        assert_eq!(user.purchase_history(), &[first, second]);

        user.remove_purchase(first);

        assert_eq!(user.purchase_history(), &[second]);
    }
}
