use serde::{Deserialize, Serialize};

use artha_core::{CurrencyCode, Entity};

/// A currency in the system-wide currency master.
///
/// Exactly one currency carries `is_base = true`. Structural fields (code,
/// precision, base flag) are immutable once the currency is referenced by a
/// rate or a forex transaction; display attributes stay editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    code: CurrencyCode,
    name: String,
    symbol: String,
    decimal_places: u32,
    is_base: bool,
}

impl Currency {
    pub fn new(code: CurrencyCode, name: impl Into<String>, symbol: impl Into<String>, decimal_places: u32) -> Self {
        Self {
            code,
            name: name.into(),
            symbol: symbol.into(),
            decimal_places,
            is_base: false,
        }
    }

    pub fn code(&self) -> &CurrencyCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    pub fn is_base(&self) -> bool {
        self.is_base
    }

    pub(crate) fn set_base(&mut self, is_base: bool) {
        self.is_base = is_base;
    }

    /// Update display attributes only (always allowed).
    pub(crate) fn set_display(&mut self, name: impl Into<String>, symbol: impl Into<String>) {
        self.name = name.into();
        self.symbol = symbol.into();
    }
}

impl Entity for Currency {
    type Id = CurrencyCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}
