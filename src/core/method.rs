//! Payment method selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// The payment method picked in the reservation flow
///
/// Only `Card` goes through field validation; every other method is handed
/// off without client-side checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Mobile,
    Bank,
    DigitalWallet,
    Paypal,
    Crypto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Card,
        PaymentMethod::Mobile,
        PaymentMethod::Bank,
        PaymentMethod::DigitalWallet,
        PaymentMethod::Paypal,
        PaymentMethod::Crypto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Mobile => "mobile",
            PaymentMethod::Bank => "bank",
            PaymentMethod::DigitalWallet => "digital_wallet",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Crypto => "crypto",
        }
    }

    /// Label shown in the method picker
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Carte bancaire",
            PaymentMethod::Mobile => "Paiement mobile",
            PaymentMethod::Bank => "Virement bancaire",
            PaymentMethod::DigitalWallet => "Portefeuille numérique",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::Crypto => "Cryptomonnaie",
        }
    }

    /// Whether the card field validator gates this method
    pub fn requires_card_validation(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
