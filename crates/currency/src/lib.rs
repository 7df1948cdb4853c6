//! `artha-currency`: currency master, dated exchange rates, forex positions.
//!
//! Rate resolution for a `(from, to, as_of)` triple tries, in order:
//! a direct rate, the inverse pair (`1/rate`), then triangulation through
//! the base currency. Resolution that finds no path fails with
//! [`CurrencyError::RateNotFound`]; it never guesses `1`.

pub mod currency;
pub mod error;
pub mod forex;
pub mod rates;
pub mod service;

pub use currency::Currency;
pub use error::CurrencyError;
pub use forex::ForexTransaction;
pub use rates::{Conversion, ExchangeRate, RateFeed, RateQuote, RateSource};
pub use service::CurrencyService;
