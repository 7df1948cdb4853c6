use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use artha_core::{round_money, CurrencyCode, DomainError, ForexTransactionId};

use crate::currency::Currency;
use crate::error::CurrencyError;
use crate::forex::ForexTransaction;
use crate::rates::{Conversion, ExchangeRate, RateFeed, RateQuote, RateSource};

type PairKey = (CurrencyCode, CurrencyCode);

#[derive(Debug, Default)]
struct State {
    currencies: HashMap<CurrencyCode, Currency>,
    base: Option<CurrencyCode>,
    /// Time-series per pair: rate_date -> (rate, source). Insert on the exact
    /// date replaces the row (idempotent correction); rows are never removed.
    rates: HashMap<PairKey, BTreeMap<NaiveDate, (Decimal, RateSource)>>,
    forex: HashMap<ForexTransactionId, ForexTransaction>,
    /// Currencies referenced by at least one rate or forex transaction;
    /// structural edits on these are refused.
    referenced: HashSet<CurrencyCode>,
}

/// Currency master + rate store + forex book.
///
/// One lock over the whole component: rates are immutable-once-superseded
/// and conversion is read-only, so readers never block each other.
#[derive(Debug, Default)]
pub struct CurrencyService {
    state: RwLock<State>,
}

fn poisoned() -> CurrencyError {
    CurrencyError::Domain(DomainError::invariant("currency store lock poisoned"))
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

impl CurrencyService {
    pub fn new() -> Self {
        Self::default()
    }

    // --- currency master ---

    pub fn register_currency(&self, currency: Currency) -> Result<(), CurrencyError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let code = currency.code().clone();
        if state.currencies.contains_key(&code) {
            return Err(CurrencyError::DuplicateCurrency(code));
        }
        debug!(currency = %code, "currency registered");
        state.currencies.insert(code, currency);
        Ok(())
    }

    /// Designate the system-wide base currency. Exactly one currency is base
    /// at any time; re-pointing clears the previous flag.
    pub fn set_base(&self, code: &CurrencyCode) -> Result<(), CurrencyError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if !state.currencies.contains_key(code) {
            return Err(CurrencyError::UnknownCurrency(code.clone()));
        }
        if let Some(previous) = state.base.take() {
            if let Some(c) = state.currencies.get_mut(&previous) {
                c.set_base(false);
            }
        }
        if let Some(c) = state.currencies.get_mut(code) {
            c.set_base(true);
        }
        state.base = Some(code.clone());
        info!(currency = %code, "base currency designated");
        Ok(())
    }

    pub fn base_currency(&self) -> Result<CurrencyCode, CurrencyError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state.base.clone().ok_or(CurrencyError::NoBaseCurrency)
    }

    pub fn currency(&self, code: &CurrencyCode) -> Result<Currency, CurrencyError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .currencies
            .get(code)
            .cloned()
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.clone()))
    }

    /// Display attributes are always editable.
    pub fn update_display(
        &self,
        code: &CurrencyCode,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Result<(), CurrencyError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let currency = state
            .currencies
            .get_mut(code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.clone()))?;
        currency.set_display(name, symbol);
        Ok(())
    }

    /// Structural edit; refused once the currency is referenced by a rate or
    /// forex transaction.
    pub fn set_decimal_places(&self, code: &CurrencyCode, places: u32) -> Result<(), CurrencyError> {
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if state.referenced.contains(code) {
            return Err(CurrencyError::CurrencyInUse(code.clone()));
        }
        let currency = state
            .currencies
            .remove(code)
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.clone()))?;
        let mut rebuilt = Currency::new(code.clone(), currency.name(), currency.symbol(), places);
        if currency.is_base() {
            rebuilt.set_base(true);
        }
        state.currencies.insert(code.clone(), rebuilt);
        Ok(())
    }

    // --- rate store ---

    pub fn upsert_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        rate: Decimal,
        date: NaiveDate,
        source: RateSource,
    ) -> Result<(), CurrencyError> {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate(rate));
        }
        if from == to {
            return Err(DomainError::validation("same-currency rate is implicit").into());
        }
        let mut state = self.state.write().map_err(|_| poisoned())?;
        for code in [from, to] {
            if !state.currencies.contains_key(code) {
                return Err(CurrencyError::UnknownCurrency(code.clone()));
            }
        }
        state.referenced.insert(from.clone());
        state.referenced.insert(to.clone());
        state
            .rates
            .entry((from.clone(), to.clone()))
            .or_default()
            .insert(date, (rate, source));
        debug!(%from, %to, %rate, %date, "exchange rate upserted");
        Ok(())
    }

    /// Upsert a batch of dated rates from a JSON feed document.
    pub fn ingest_feed(&self, json: &str) -> Result<usize, CurrencyError> {
        let feed: RateFeed =
            serde_json::from_str(json).map_err(|e| CurrencyError::MalformedFeed(e.to_string()))?;
        let count = feed.rates.len();
        for row in feed.rates {
            self.upsert_rate(&row.from, &row.to, row.rate, row.date, RateSource::Feed)?;
        }
        info!(rows = count, "rate feed ingested");
        Ok(count)
    }

    /// Resolve the rate for a pair as of a date.
    ///
    /// Same-currency pairs return `1` without any lookup. Otherwise the
    /// direct pair, the inverse pair (`1/rate`), and finally triangulation
    /// through the base currency are tried, in that order.
    pub fn get_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        as_of: Option<NaiveDate>,
    ) -> Result<RateQuote, CurrencyError> {
        let as_of = as_of.unwrap_or_else(today);
        if from == to {
            return Ok(RateQuote {
                rate: Decimal::ONE,
                rate_date: as_of,
            });
        }

        let state = self.state.read().map_err(|_| poisoned())?;
        if let Some(quote) = Self::direct_or_inverse(&state, from, to, as_of) {
            return Ok(quote);
        }

        // Cross-rate triangulation: from -> base -> to. Each leg may itself
        // resolve through the inverse pair; the quote carries the earlier of
        // the two leg dates.
        if let Some(base) = state.base.as_ref() {
            if base != from && base != to {
                let leg_a = Self::direct_or_inverse(&state, from, base, as_of);
                let leg_b = Self::direct_or_inverse(&state, base, to, as_of);
                if let (Some(a), Some(b)) = (leg_a, leg_b) {
                    return Ok(RateQuote {
                        rate: a.rate * b.rate,
                        rate_date: a.rate_date.min(b.rate_date),
                    });
                }
            }
        }

        Err(CurrencyError::RateNotFound {
            from: from.clone(),
            to: to.clone(),
            as_of,
        })
    }

    fn direct_or_inverse(
        state: &State,
        from: &CurrencyCode,
        to: &CurrencyCode,
        as_of: NaiveDate,
    ) -> Option<RateQuote> {
        if let Some((date, (rate, _))) = state
            .rates
            .get(&(from.clone(), to.clone()))
            .and_then(|series| series.range(..=as_of).next_back())
        {
            return Some(RateQuote {
                rate: *rate,
                rate_date: *date,
            });
        }
        if let Some((date, (rate, _))) = state
            .rates
            .get(&(to.clone(), from.clone()))
            .and_then(|series| series.range(..=as_of).next_back())
        {
            return Some(RateQuote {
                rate: Decimal::ONE / *rate,
                rate_date: *date,
            });
        }
        None
    }

    /// Convert an amount between currencies; the result is money (rounded
    /// half-up to 2 places), not currency-native precision.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
        as_of: Option<NaiveDate>,
    ) -> Result<Conversion, CurrencyError> {
        let quote = self.get_rate(from, to, as_of)?;
        Ok(Conversion {
            amount: round_money(amount * quote.rate),
            rate: quote.rate,
            rate_date: quote.rate_date,
        })
    }

    // --- forex book ---

    pub fn open_forex_transaction(
        &self,
        reference_type: impl Into<String>,
        reference_id: Uuid,
        currency: &CurrencyCode,
        amount: Decimal,
        rate: Decimal,
    ) -> Result<ForexTransaction, CurrencyError> {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate(rate));
        }
        let mut state = self.state.write().map_err(|_| poisoned())?;
        if !state.currencies.contains_key(currency) {
            return Err(CurrencyError::UnknownCurrency(currency.clone()));
        }
        state.referenced.insert(currency.clone());
        let txn =
            ForexTransaction::open(reference_type, reference_id, currency.clone(), amount, rate);
        state.forex.insert(txn.id_typed(), txn.clone());
        Ok(txn)
    }

    /// Settle an open forex transaction, persisting the realized gain/loss.
    /// Re-settling is refused; the caller owns settlement idempotency.
    pub fn settle_forex_transaction(
        &self,
        id: ForexTransactionId,
        date: NaiveDate,
        rate: Decimal,
    ) -> Result<ForexTransaction, CurrencyError> {
        if rate <= Decimal::ZERO {
            return Err(CurrencyError::InvalidRate(rate));
        }
        let mut state = self.state.write().map_err(|_| poisoned())?;
        let txn = state
            .forex
            .get_mut(&id)
            .ok_or(CurrencyError::TransactionNotFound(id))?;
        if txn.is_settled() {
            return Err(CurrencyError::AlreadySettled(id));
        }
        let gain_loss = txn.settle(date, rate);
        info!(txn = %id, %gain_loss, "forex transaction settled");
        Ok(txn.clone())
    }

    pub fn forex_transaction(
        &self,
        id: ForexTransactionId,
    ) -> Result<ForexTransaction, CurrencyError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        state
            .forex
            .get(&id)
            .cloned()
            .ok_or(CurrencyError::TransactionNotFound(id))
    }

    /// Full dated history for a pair (direct rows only), oldest first.
    pub fn rate_history(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Vec<ExchangeRate>, CurrencyError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state
            .rates
            .get(&(from.clone(), to.clone()))
            .map(|series| {
                series
                    .iter()
                    .map(|(date, (rate, source))| ExchangeRate {
                        from: from.clone(),
                        to: to.clone(),
                        rate: *rate,
                        rate_date: *date,
                        source: *source,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Mark-to-market gain/loss over all open transactions as of a date.
    pub fn unrealized_forex(&self, as_of: Option<NaiveDate>) -> Result<Decimal, CurrencyError> {
        let base = self.base_currency()?;
        let open: Vec<ForexTransaction> = {
            let state = self.state.read().map_err(|_| poisoned())?;
            state
                .forex
                .values()
                .filter(|t| !t.is_settled())
                .cloned()
                .collect()
        };
        let mut total = Decimal::ZERO;
        for txn in open {
            let marked = self.convert(txn.amount(), txn.currency(), &base, as_of)?;
            total += marked.amount - txn.original_base_amount();
        }
        Ok(total)
    }

    /// Sum of persisted gains/losses over transactions settled in the window
    /// (inclusive on both ends).
    pub fn realized_forex(&self, from: NaiveDate, to: NaiveDate) -> Result<Decimal, CurrencyError> {
        let state = self.state.read().map_err(|_| poisoned())?;
        Ok(state
            .forex
            .values()
            .filter(|t| {
                t.settlement_date()
                    .map(|d| d >= from && d <= to)
                    .unwrap_or(false)
            })
            .filter_map(|t| t.forex_gain_loss())
            .sum())
    }
}
