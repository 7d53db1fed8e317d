//! Pre-built Test Fixtures
//!
//! The reference date is 2024-04-01; the standard applicant was born on
//! 1990/04/01 and is therefore 34 on that day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use core_kernel::FixedClock;
use domain_quote::memory::{
    InMemoryCatalog, InMemoryOrderStore, InMemoryRateTable, RecordingNotifier,
};
use domain_quote::{OrderMailer, WizardController};

/// Fixture for dates used across the suite
pub struct DateFixtures;

impl DateFixtures {
    /// The pinned "today"
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()
    }

    /// Clock fixed at [`DateFixtures::today`]
    pub fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(Self::today()))
    }

    /// Birth date of someone exactly 20 today
    pub fn youngest_eligible_birth() -> &'static str {
        "2004/04/01"
    }

    /// Birth date of someone turning 20 tomorrow
    pub fn too_young_birth() -> &'static str {
        "2004/04/02"
    }
}

/// Field values of the standard applicant
pub struct ApplicantFixtures;

impl ApplicantFixtures {
    pub const INSURANCE_TYPE: &'static str = "1";
    pub const INSURANCE_NAME: &'static str = "医療保険";
    pub const KANJI_NAME: &'static str = "山田太郎";
    pub const KANA_NAME: &'static str = "ヤマダ\u{3000}タロウ";
    pub const DATE_OF_BIRTH: &'static str = "1990/04/01";
    pub const ADDRESS: &'static str = "東京都江東区豊洲2-2-1";
    pub const PHONE: &'static str = "0312345678";
    pub const EMAIL: &'static str = "taro@example.com";
    pub const MARITAL_STATUS: &'static str = "1";
    pub const OCCUPATION: &'static str = "2";
    pub const INCOME: &'static str = "500";
    pub const TREATMENT_HISTORY: &'static str = "0";

    /// Age of the standard applicant on [`DateFixtures::today`]
    pub const AGE: i32 = 34;

    /// Sample rate for ages 30 to 39
    pub fn adjustment_rate() -> Decimal {
        dec!(0.95)
    }

    /// 3000 × 12 × 0.95
    pub fn annual_fee() -> i64 {
        34_200
    }
}

/// In-memory backends with handles kept for inspection
#[derive(Clone)]
pub struct MemoryBackends {
    pub catalog: Arc<InMemoryCatalog>,
    pub rates: Arc<InMemoryRateTable>,
    pub orders: Arc<InMemoryOrderStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Default for MemoryBackends {
    fn default() -> Self {
        Self::sample()
    }
}

impl MemoryBackends {
    /// Sample catalog and rate table, empty order store and mailbox
    pub fn sample() -> Self {
        Self {
            catalog: Arc::new(InMemoryCatalog::sample()),
            rates: Arc::new(InMemoryRateTable::sample()),
            orders: Arc::new(InMemoryOrderStore::new()),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    /// Controller over these backends with the pinned clock
    pub fn controller(&self) -> WizardController {
        WizardController::new(
            self.catalog.clone(),
            self.rates.clone(),
            self.orders.clone(),
            DateFixtures::clock(),
        )
    }

    /// Mailer writing into the recording notifier
    pub fn mailer(&self) -> OrderMailer {
        OrderMailer::new(self.notifier.clone())
    }
}
