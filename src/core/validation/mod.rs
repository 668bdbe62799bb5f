//! Formatting and validation of payment card fields
//!
//! Filters turn raw keystrokes into display text; validators decide whether a
//! display value is acceptable. Both are pure and run synchronously on every
//! change or blur event of the payment form.

pub mod filters;
pub mod validators;

pub use filters::{format_card_number, format_cardholder_name, format_expiry};
pub use validators::{
    is_card_number_valid, is_cvv_valid, is_expiry_valid, is_expiry_valid_at, is_name_valid,
    luhn_valid,
};
