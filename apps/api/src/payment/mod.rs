// Payment Intake Form: mobile-money payment mock.
// No gateway is contacted. A valid submission gets a fabricated reference and
// completes after a fixed simulated delay.

pub mod form;
pub mod handlers;
pub mod phone;
pub mod reference;

pub use form::{PaymentForm, PaymentSettings};
