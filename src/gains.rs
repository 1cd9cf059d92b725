//! Holding-period classification and per-asset gain aggregation.
//!
//! Every disposal lands in exactly one of two buckets, short term or long
//! term, keyed by asset name. Amounts accumulate at full precision and are
//! rounded to whole dollars only once, when a bucket is finalized.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;
use std::fmt;

use crate::records::DisposalRecord;

/// Disposals held for at least this many days are long term.
pub const LONG_TERM_THRESHOLD_DAYS: i64 = 365;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GainsError {
    #[error("{asset}: disposed {disposed} before acquired {acquired}")]
    DisposedBeforeAcquired {
        asset: String,
        acquired: NaiveDate,
        disposed: NaiveDate,
    },
    #[error("{column} overflow for {asset}")]
    AmountOverflow {
        asset: String,
        column: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Short,
    Long,
}

impl Term {
    pub fn heading(&self) -> &'static str {
        match self {
            Term::Short => "Short Term",
            Term::Long => "Long Term",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.heading())
    }
}

/// Classify a disposal by how long the asset was held.
///
/// The holding period is the calendar-day difference between acquisition and
/// disposition. A same-day disposal is short term; a disposal dated before
/// its acquisition is an error rather than a very short hold.
pub fn classify(record: &DisposalRecord) -> Result<Term, GainsError> {
    let held = (record.disposed - record.acquired).num_days();
    if held < 0 {
        return Err(GainsError::DisposedBeforeAcquired {
            asset: record.asset.clone(),
            acquired: record.acquired,
            disposed: record.disposed,
        });
    }

    if held < LONG_TERM_THRESHOLD_DAYS {
        Ok(Term::Short)
    } else {
        Ok(Term::Long)
    }
}

/// Accumulated amounts for one asset within one term bucket.
///
/// `gain` is zero until the bucket is finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetTotals {
    pub proceeds: Decimal,
    pub cost_basis: Decimal,
    pub gain: Decimal,
}

pub type AssetMap = BTreeMap<String, AssetTotals>;

/// One finalized term bucket: per-asset rows plus their grand totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermReport {
    pub assets: AssetMap,
    pub totals: AssetTotals,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GainsReport {
    pub short_term: TermReport,
    pub long_term: TermReport,
}

/// Split disposals into short and long term buckets, accumulating proceeds
/// and cost basis per asset at full precision. A running sum outside the
/// `Decimal` range is an error, not a panic.
pub fn accumulate(records: &[DisposalRecord]) -> Result<(AssetMap, AssetMap), GainsError> {
    let mut short_term = AssetMap::new();
    let mut long_term = AssetMap::new();

    for record in records {
        let term = classify(record)?;
        log::debug!(
            "{}: {} disposal, proceeds {} cost basis {}",
            record.asset,
            term,
            record.proceeds,
            record.cost_basis
        );

        let totals = match term {
            Term::Short => &mut short_term,
            Term::Long => &mut long_term,
        }
        .entry(record.asset.clone())
        .or_default();
        totals.proceeds = add_amount(totals.proceeds, record.proceeds, &record.asset, "proceeds")?;
        totals.cost_basis = add_amount(
            totals.cost_basis,
            record.cost_basis,
            &record.asset,
            "cost basis",
        )?;
    }

    Ok((short_term, long_term))
}

/// Round each asset's amounts to whole dollars, derive its gain and return
/// the grand totals. Totals are sums of the rounded per-asset amounts, so
/// every column in the finished report adds up exactly.
pub fn finalize(assets: &mut AssetMap) -> Result<AssetTotals, GainsError> {
    let mut totals = AssetTotals::default();
    for (asset, amounts) in assets.iter_mut() {
        amounts.proceeds = round_usd(amounts.proceeds);
        amounts.cost_basis = round_usd(amounts.cost_basis);
        amounts.gain = amounts
            .proceeds
            .checked_sub(amounts.cost_basis)
            .ok_or_else(|| GainsError::AmountOverflow {
                asset: asset.clone(),
                column: "gain",
            })?;

        totals.proceeds = add_amount(totals.proceeds, amounts.proceeds, asset, "proceeds")?;
        totals.cost_basis = add_amount(totals.cost_basis, amounts.cost_basis, asset, "cost basis")?;
        totals.gain = add_amount(totals.gain, amounts.gain, asset, "gain")?;
    }
    Ok(totals)
}

/// Aggregate disposals into a finalized report, short and long term.
pub fn calculate_gains(records: &[DisposalRecord]) -> Result<GainsReport, GainsError> {
    let (mut short_term, mut long_term) = accumulate(records)?;
    let short_totals = finalize(&mut short_term)?;
    let long_totals = finalize(&mut long_term)?;

    Ok(GainsReport {
        short_term: TermReport {
            assets: short_term,
            totals: short_totals,
        },
        long_term: TermReport {
            assets: long_term,
            totals: long_totals,
        },
    })
}

/// Round to whole dollars with ties going to the even dollar.
fn round_usd(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

fn add_amount(
    total: Decimal,
    amount: Decimal,
    asset: &str,
    column: &'static str,
) -> Result<Decimal, GainsError> {
    total
        .checked_add(amount)
        .ok_or_else(|| GainsError::AmountOverflow {
            asset: asset.to_string(),
            column,
        })
}
