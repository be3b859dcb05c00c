//! Stateless tax calculations: VAT (forward and reverse), corporate tax,
//! late-payment penalties, and VAT return aggregation.
//!
//! Every function is a pure computation over its inputs plus the static
//! reference tables; unknown country codes are reported as errors, never
//! silently defaulted.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    errors::{AccountingError, Result},
    ledger::{Transaction, TransactionCategory},
    reference::{self, TaxRates},
};

/// Which of the three published VAT rates applies.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VatType {
    Standard,
    Reduced,
    Zero,
}

impl VatType {
    fn rate_from(self, rates: &TaxRates) -> f64 {
        match self {
            VatType::Standard => rates.vat_standard,
            VatType::Reduced => rates.vat_reduced,
            VatType::Zero => rates.vat_zero,
        }
    }
}

/// Net/gross breakdown of a single VAT computation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VatBreakdown {
    pub net_amount: f64,
    pub vat_rate: f64,
    pub vat_amount: f64,
    pub gross_amount: f64,
    pub country: &'static str,
    pub vat_type: VatType,
}

/// Corporate tax liability derived from gross profit and deductions.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CorporateTaxAssessment {
    pub gross_profit: f64,
    pub allowable_deductions: f64,
    pub taxable_profit: f64,
    pub corporate_rate: f64,
    pub tax_amount: f64,
    pub net_profit: f64,
    pub country: &'static str,
    pub effective_rate: f64,
}

/// Penalty accrued on a tax amount paid after its due date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatePenalty {
    pub days_late: i64,
    pub months_late: i64,
    pub penalty_amount: f64,
    pub total_amount: f64,
}

/// Output/input VAT totals for a filing period.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct VatReturn {
    pub total_sales: f64,
    pub total_purchases: f64,
    pub output_vat: f64,
    pub input_vat: f64,
    pub net_vat_due: f64,
}

fn rates_for(country_code: &str) -> Result<&'static TaxRates> {
    reference::tax_rates(country_code)
        .ok_or_else(|| AccountingError::UnknownCountry(country_code.to_string()))
}

/// Computes VAT on top of a net amount.
pub fn calculate_vat(net_amount: f64, country_code: &str, vat_type: VatType) -> Result<VatBreakdown> {
    let rates = rates_for(country_code)?;
    let vat_rate = vat_type.rate_from(rates);
    let vat_amount = net_amount * vat_rate / 100.0;
    Ok(VatBreakdown {
        net_amount,
        vat_rate,
        vat_amount,
        gross_amount: net_amount + vat_amount,
        country: rates.country,
        vat_type,
    })
}

/// Extracts the VAT portion out of a gross amount (reverse calculation).
pub fn calculate_vat_from_gross(
    gross_amount: f64,
    country_code: &str,
    vat_type: VatType,
) -> Result<VatBreakdown> {
    let rates = rates_for(country_code)?;
    let vat_rate = vat_type.rate_from(rates);
    let net_amount = gross_amount / (1.0 + vat_rate / 100.0);
    Ok(VatBreakdown {
        net_amount,
        vat_rate,
        vat_amount: gross_amount - net_amount,
        gross_amount,
        country: rates.country,
        vat_type,
    })
}

/// Computes corporate tax on profit after allowable deductions.
///
/// Taxable profit never goes negative when deductions exceed gross profit,
/// and the effective rate is zero (not a division by zero) when there is no
/// gross profit.
pub fn calculate_corporate_tax(
    gross_profit: f64,
    allowable_deductions: f64,
    country_code: &str,
) -> Result<CorporateTaxAssessment> {
    let rates = rates_for(country_code)?;
    let taxable_profit = (gross_profit - allowable_deductions).max(0.0);
    let tax_amount = taxable_profit * rates.corporate_rate / 100.0;
    let effective_rate = if gross_profit > 0.0 {
        tax_amount / gross_profit * 100.0
    } else {
        0.0
    };
    Ok(CorporateTaxAssessment {
        gross_profit,
        allowable_deductions,
        taxable_profit,
        corporate_rate: rates.corporate_rate,
        tax_amount,
        net_profit: gross_profit - tax_amount,
        country: rates.country,
        effective_rate,
    })
}

/// Computes the penalty on a late tax payment at `monthly_rate` percent per
/// elapsed-or-partial month. Payment on or before the due date accrues
/// nothing; `days_late` is floored at zero.
pub fn calculate_late_penalty(
    tax_amount: f64,
    due_date: NaiveDate,
    payment_date: NaiveDate,
    monthly_rate: f64,
) -> LatePenalty {
    let days_late = (payment_date - due_date).num_days().max(0);
    let months_late = (days_late + 29) / 30;
    let penalty_amount = tax_amount * monthly_rate * months_late as f64 / 100.0;
    LatePenalty {
        days_late,
        months_late,
        penalty_amount,
        total_amount: tax_amount + penalty_amount,
    }
}

/// Aggregates sales and purchase figures into a VAT return. Each entry is
/// `(amount, vat_amount)`. Net VAT due is floored at zero; excess input VAT
/// is a reclaim, not a negative liability.
pub fn vat_return(sales: &[(f64, f64)], purchases: &[(f64, f64)]) -> VatReturn {
    let total_sales: f64 = sales.iter().map(|(amount, _)| amount).sum();
    let total_purchases: f64 = purchases.iter().map(|(amount, _)| amount).sum();
    let output_vat: f64 = sales.iter().map(|(_, vat)| vat).sum();
    let input_vat: f64 = purchases.iter().map(|(_, vat)| vat).sum();
    VatReturn {
        total_sales,
        total_purchases,
        output_vat,
        input_vat,
        net_vat_due: (output_vat - input_vat).max(0.0),
    }
}

/// Builds a VAT return from the ledger transactions falling inside the
/// inclusive period. Sales provide output VAT, purchases input VAT;
/// transactions without a VAT rate contribute amount only.
pub fn vat_return_for_period(
    transactions: &[Transaction],
    from: NaiveDate,
    to: NaiveDate,
) -> VatReturn {
    let mut sales = Vec::new();
    let mut purchases = Vec::new();
    for txn in transactions {
        if txn.date < from || txn.date > to {
            continue;
        }
        let entry = (txn.amount, txn.tax_amount.unwrap_or(0.0));
        match txn.category {
            TransactionCategory::Sales => sales.push(entry),
            TransactionCategory::Purchase => purchases.push(entry),
            _ => {}
        }
    }
    vat_return(&sales, &purchases)
}

/// Validates tax calculation inputs, returning every problem found.
pub fn validate_tax_inputs(amount: f64, country_code: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if amount < 0.0 {
        problems.push("Amount cannot be negative".to_string());
    }
    if !amount.is_finite() {
        problems.push("Amount is not a finite number".to_string());
    }
    if country_code.len() != 2 {
        problems.push("Invalid country code (must be 2 characters)".to_string());
    }
    if reference::tax_rates(country_code).is_none() {
        problems.push(format!(
            "Tax rates not available for country: {country_code}"
        ));
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gb_standard_vat_on_1000() {
        let breakdown = calculate_vat(1000.0, "GB", VatType::Standard).unwrap();
        assert_eq!(breakdown.vat_rate, 20.0);
        assert_eq!(breakdown.vat_amount, 200.0);
        assert_eq!(breakdown.gross_amount, 1200.0);
        assert_eq!(breakdown.country, "United Kingdom");
    }

    #[test]
    fn reverse_calculation_round_trips() {
        for country in ["GB", "DE", "CH", "HU", "US"] {
            for vat_type in [VatType::Standard, VatType::Reduced, VatType::Zero] {
                let forward = calculate_vat(250.75, country, vat_type).unwrap();
                let reverse =
                    calculate_vat_from_gross(forward.gross_amount, country, vat_type).unwrap();
                assert!(
                    (reverse.net_amount - 250.75).abs() / 250.75 < 1e-6,
                    "round trip drifted for {country} {vat_type:?}"
                );
            }
        }
    }

    #[test]
    fn unknown_country_errors() {
        let err = calculate_vat(100.0, "ZZ", VatType::Standard).unwrap_err();
        assert!(matches!(err, AccountingError::UnknownCountry(ref code) if code == "ZZ"));
    }

    #[test]
    fn deductions_never_push_taxable_profit_negative() {
        let assessment = calculate_corporate_tax(1000.0, 5000.0, "GB").unwrap();
        assert_eq!(assessment.taxable_profit, 0.0);
        assert_eq!(assessment.tax_amount, 0.0);
        assert_eq!(assessment.net_profit, 1000.0);
    }

    #[test]
    fn zero_gross_profit_has_zero_effective_rate() {
        let assessment = calculate_corporate_tax(0.0, 0.0, "DE").unwrap();
        assert_eq!(assessment.effective_rate, 0.0);
    }

    #[test]
    fn penalty_accrues_per_partial_month() {
        let due = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let paid = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let penalty = calculate_late_penalty(1000.0, due, paid, 5.0);
        assert_eq!(penalty.days_late, 44);
        assert_eq!(penalty.months_late, 2);
        assert_eq!(penalty.penalty_amount, 100.0);
        assert_eq!(penalty.total_amount, 1100.0);
    }

    #[test]
    fn on_time_payment_accrues_nothing() {
        let due = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let paid = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let penalty = calculate_late_penalty(1000.0, due, paid, 5.0);
        assert_eq!(penalty.days_late, 0);
        assert_eq!(penalty.months_late, 0);
        assert_eq!(penalty.total_amount, 1000.0);
    }

    #[test]
    fn net_vat_due_is_floored_at_zero() {
        let filing = vat_return(&[(100.0, 20.0)], &[(400.0, 80.0)]);
        assert_eq!(filing.output_vat, 20.0);
        assert_eq!(filing.input_vat, 80.0);
        assert_eq!(filing.net_vat_due, 0.0);
    }

    #[test]
    fn validation_collects_every_problem() {
        let problems = validate_tax_inputs(-5.0, "XYZ");
        assert_eq!(problems.len(), 3);
        assert!(validate_tax_inputs(10.0, "GB").is_empty());
    }
}
