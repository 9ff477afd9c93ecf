//! Page Components

mod checkout;
mod thank_you;

pub use checkout::CheckoutPage;
pub use thank_you::ThankYouPage;
