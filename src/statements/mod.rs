//! Read-only financial statement projections over current account balances.
//!
//! Nothing here holds state: every call recomputes from the accounts passed
//! in. Grouping goes by each account's explicit `StatementBucket` tag, not
//! by name matching. Liability, equity, and revenue lines report absolute
//! balances; asset and expense lines report signed balances as posted.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    config::CompanySettings,
    ledger::{Account, StatementBucket},
};

/// Reporting window a statement was derived for.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub name: String,
    pub is_closed: bool,
}

impl FinancialPeriod {
    /// Year-to-date window ending today.
    pub fn year_to_date() -> Self {
        let today = Utc::now().date_naive();
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
            .unwrap_or(today);
        Self {
            start_date: start,
            end_date: today,
            name: format!("Year {}", today.year()),
            is_closed: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CurrentAssets {
    pub cash: f64,
    pub accounts_receivable: f64,
    pub inventory: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FixedAssets {
    pub property_plant_equipment: f64,
    pub intangible_assets: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Assets {
    pub current_assets: CurrentAssets,
    pub fixed_assets: FixedAssets,
    pub total_assets: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CurrentLiabilities {
    pub accounts_payable: f64,
    pub short_term_debt: f64,
    pub accrued_expenses: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct LongTermLiabilities {
    pub long_term_debt: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Liabilities {
    pub current_liabilities: CurrentLiabilities,
    pub long_term_liabilities: LongTermLiabilities,
    pub total_liabilities: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Equity {
    pub share_capital: f64,
    pub retained_earnings: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BalanceSheetData {
    pub period: FinancialPeriod,
    pub currency: String,
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: Equity,
}

impl BalanceSheetData {
    /// Signed gap in the fundamental equation
    /// `assets - (liabilities + equity)`. A nonzero gap is a data-quality
    /// signal for the caller, not an error; the statement is still valid
    /// output.
    pub fn equation_gap(&self) -> f64 {
        self.assets.total_assets - (self.liabilities.total_liabilities + self.equity.total)
    }

    pub fn is_balanced(&self, epsilon: f64) -> bool {
        self.equation_gap().abs() <= epsilon
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Revenue {
    pub sales: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Expenses {
    pub cost_of_goods_sold: f64,
    pub salaries: f64,
    pub rent: f64,
    pub utilities: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfitLossData {
    pub period: FinancialPeriod,
    pub currency: String,
    pub revenue: Revenue,
    pub expenses: Expenses,
    pub gross_profit: f64,
    pub profit_before_tax: f64,
    pub tax_expense: f64,
    pub net_profit: f64,
}

/// Headline figures for a dashboard view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardKpis {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub cash_balance: f64,
    pub accounts_receivable: f64,
    pub accounts_payable: f64,
    pub current_ratio: f64,
    pub currency: String,
    pub period: String,
}

fn sum_raw(accounts: &[Account], bucket: StatementBucket) -> f64 {
    accounts
        .iter()
        .filter(|account| account.bucket == bucket)
        .map(|account| account.balance)
        .sum()
}

fn sum_abs(accounts: &[Account], bucket: StatementBucket) -> f64 {
    accounts
        .iter()
        .filter(|account| account.bucket == bucket)
        .map(|account| account.balance.abs())
        .sum()
}

/// Derives a balance sheet snapshot from current account balances.
pub fn balance_sheet(accounts: &[Account], settings: &CompanySettings) -> BalanceSheetData {
    use StatementBucket::*;

    let current_assets = {
        let cash = sum_raw(accounts, Cash);
        let accounts_receivable = sum_raw(accounts, Receivables);
        let inventory = sum_raw(accounts, Inventory);
        let other = sum_raw(accounts, OtherCurrentAsset);
        CurrentAssets {
            cash,
            accounts_receivable,
            inventory,
            other,
            total: cash + accounts_receivable + inventory + other,
        }
    };

    let fixed_assets = {
        let property_plant_equipment = sum_raw(accounts, PropertyPlantEquipment);
        let intangible_assets = sum_raw(accounts, IntangibleAssets);
        let other = sum_raw(accounts, OtherFixedAsset);
        FixedAssets {
            property_plant_equipment,
            intangible_assets,
            other,
            total: property_plant_equipment + intangible_assets + other,
        }
    };

    let current_liabilities = {
        let accounts_payable = sum_abs(accounts, Payables);
        let short_term_debt = sum_abs(accounts, ShortTermDebt);
        let accrued_expenses = sum_abs(accounts, AccruedExpenses);
        let other = sum_abs(accounts, OtherCurrentLiability);
        CurrentLiabilities {
            accounts_payable,
            short_term_debt,
            accrued_expenses,
            other,
            total: accounts_payable + short_term_debt + accrued_expenses + other,
        }
    };

    let long_term_liabilities = {
        let long_term_debt = sum_abs(accounts, LongTermDebt);
        let other = sum_abs(accounts, OtherLongTermLiability);
        LongTermLiabilities {
            long_term_debt,
            other,
            total: long_term_debt + other,
        }
    };

    let equity = {
        let share_capital = sum_abs(accounts, ShareCapital);
        let retained_earnings = sum_abs(accounts, RetainedEarnings);
        let other = sum_abs(accounts, OtherEquity);
        Equity {
            share_capital,
            retained_earnings,
            other,
            total: share_capital + retained_earnings + other,
        }
    };

    BalanceSheetData {
        period: FinancialPeriod::year_to_date(),
        currency: settings.currency.clone(),
        assets: Assets {
            total_assets: current_assets.total + fixed_assets.total,
            current_assets,
            fixed_assets,
        },
        liabilities: Liabilities {
            total_liabilities: current_liabilities.total + long_term_liabilities.total,
            current_liabilities,
            long_term_liabilities,
        },
        equity,
    }
}

/// Derives a profit & loss statement from current account balances.
///
/// The tax line is a flat estimate at the company's default corporate rate,
/// not a full jurisdiction-aware corporate tax computation.
pub fn profit_and_loss(accounts: &[Account], settings: &CompanySettings) -> ProfitLossData {
    use StatementBucket::*;

    let revenue = {
        let sales = sum_abs(accounts, SalesRevenue);
        let other = sum_abs(accounts, OtherRevenue);
        Revenue {
            sales,
            other,
            total: sales + other,
        }
    };

    let expenses = {
        let cost_of_goods_sold = sum_raw(accounts, CostOfGoodsSold);
        let salaries = sum_raw(accounts, Salaries);
        let rent = sum_raw(accounts, Rent);
        let utilities = sum_raw(accounts, Utilities);
        let other = sum_raw(accounts, OtherExpense);
        Expenses {
            cost_of_goods_sold,
            salaries,
            rent,
            utilities,
            other,
            total: cost_of_goods_sold + salaries + rent + utilities + other,
        }
    };

    let gross_profit = revenue.total - expenses.cost_of_goods_sold;
    let profit_before_tax = revenue.total - expenses.total;
    let tax_expense = (profit_before_tax * settings.default_corporate_tax_rate / 100.0).max(0.0);
    let net_profit = profit_before_tax - tax_expense;

    ProfitLossData {
        period: FinancialPeriod::year_to_date(),
        currency: settings.currency.clone(),
        revenue,
        expenses,
        gross_profit,
        profit_before_tax,
        tax_expense,
        net_profit,
    }
}

/// Derives dashboard headline figures from current account balances.
pub fn dashboard_kpis(accounts: &[Account], settings: &CompanySettings) -> DashboardKpis {
    use crate::ledger::AccountType;
    use StatementBucket::*;

    let total_revenue: f64 = accounts
        .iter()
        .filter(|account| account.account_type == AccountType::Revenue)
        .map(|account| account.balance.abs())
        .sum();
    let total_expenses: f64 = accounts
        .iter()
        .filter(|account| account.account_type == AccountType::Expense)
        .map(|account| account.balance)
        .sum();
    let cash_balance = sum_raw(accounts, Cash);
    let accounts_receivable = sum_raw(accounts, Receivables);
    let accounts_payable = sum_abs(accounts, Payables);

    let current_assets = cash_balance + accounts_receivable;
    let current_ratio = if accounts_payable > 0.0 {
        current_assets / accounts_payable
    } else {
        0.0
    };

    let period = FinancialPeriod::year_to_date();
    DashboardKpis {
        total_revenue,
        total_expenses,
        net_profit: total_revenue - total_expenses,
        cash_balance,
        accounts_receivable,
        accounts_payable,
        current_ratio,
        currency: settings.currency.clone(),
        period: format!("{} - {}", period.start_date, period.end_date),
    }
}
