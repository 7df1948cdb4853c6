use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use artha_core::{round_money, CurrencyCode, Entity, ForexTransactionId};

/// A foreign-currency transaction tracked for gain/loss.
///
/// Snapshots the original amount, rate and base-currency equivalent at
/// creation. Settlement snapshots the settlement side and **persists**
/// `forex_gain_loss = settlement_base_amount - original_base_amount`.
/// Before settlement the transaction is open and contributes to the
/// unrealized figure computed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForexTransaction {
    id: ForexTransactionId,
    /// Source document kind in the calling module ("invoice", "vendor_bill", ...).
    reference_type: String,
    reference_id: Uuid,
    currency: CurrencyCode,
    amount: Decimal,
    original_rate: Decimal,
    original_base_amount: Decimal,
    settlement_date: Option<NaiveDate>,
    settlement_rate: Option<Decimal>,
    settlement_base_amount: Option<Decimal>,
    forex_gain_loss: Option<Decimal>,
}

impl ForexTransaction {
    pub(crate) fn open(
        reference_type: impl Into<String>,
        reference_id: Uuid,
        currency: CurrencyCode,
        amount: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            id: ForexTransactionId::new(),
            reference_type: reference_type.into(),
            reference_id,
            currency,
            amount,
            original_rate: rate,
            original_base_amount: round_money(amount * rate),
            settlement_date: None,
            settlement_rate: None,
            settlement_base_amount: None,
            forex_gain_loss: None,
        }
    }

    pub(crate) fn settle(&mut self, date: NaiveDate, rate: Decimal) -> Decimal {
        let settlement_base = round_money(self.amount * rate);
        let gain_loss = settlement_base - self.original_base_amount;
        self.settlement_date = Some(date);
        self.settlement_rate = Some(rate);
        self.settlement_base_amount = Some(settlement_base);
        self.forex_gain_loss = Some(gain_loss);
        gain_loss
    }

    pub fn id_typed(&self) -> ForexTransactionId {
        self.id
    }

    pub fn reference_type(&self) -> &str {
        &self.reference_type
    }

    pub fn reference_id(&self) -> Uuid {
        self.reference_id
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn original_rate(&self) -> Decimal {
        self.original_rate
    }

    pub fn original_base_amount(&self) -> Decimal {
        self.original_base_amount
    }

    pub fn settlement_date(&self) -> Option<NaiveDate> {
        self.settlement_date
    }

    pub fn settlement_rate(&self) -> Option<Decimal> {
        self.settlement_rate
    }

    pub fn settlement_base_amount(&self) -> Option<Decimal> {
        self.settlement_base_amount
    }

    pub fn forex_gain_loss(&self) -> Option<Decimal> {
        self.forex_gain_loss
    }

    pub fn is_settled(&self) -> bool {
        self.settlement_date.is_some()
    }
}

impl Entity for ForexTransaction {
    type Id = ForexTransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
