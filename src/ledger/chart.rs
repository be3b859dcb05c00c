//! Default chart of accounts seeded when no persisted chart exists.

use super::account::{Account, AccountType, StatementBucket};

const BASE_CURRENCY: &str = "USD";

/// Builds the standard small-company chart: current and fixed assets,
/// liabilities, equity, revenue, and operating expense accounts with
/// conventional 4-digit codes.
pub fn default_chart() -> Vec<Account> {
    use AccountType::*;
    use StatementBucket::*;

    let entries: [(&str, &str, AccountType, &str, StatementBucket); 16] = [
        ("1000", "Cash", Asset, "Current Assets", Cash),
        ("1100", "Accounts Receivable", Asset, "Current Assets", Receivables),
        ("1200", "Inventory", Asset, "Current Assets", Inventory),
        ("1500", "Equipment", Asset, "Fixed Assets", PropertyPlantEquipment),
        ("2000", "Accounts Payable", Liability, "Current Liabilities", Payables),
        ("2100", "VAT Payable", Liability, "Current Liabilities", AccruedExpenses),
        ("2500", "Long-term Debt", Liability, "Long-term Liabilities", LongTermDebt),
        ("3000", "Share Capital", Equity, "Equity", ShareCapital),
        ("3100", "Retained Earnings", Equity, "Equity", RetainedEarnings),
        ("4000", "Sales Revenue", Revenue, "Revenue", SalesRevenue),
        ("4100", "Service Revenue", Revenue, "Revenue", OtherRevenue),
        ("5000", "Cost of Goods Sold", Expense, "Cost of Sales", CostOfGoodsSold),
        ("6000", "Salaries Expense", Expense, "Operating Expenses", Salaries),
        ("6100", "Rent Expense", Expense, "Operating Expenses", Rent),
        ("6200", "Utilities Expense", Expense, "Operating Expenses", Utilities),
        ("6300", "Office Supplies", Expense, "Operating Expenses", OtherExpense),
    ];

    entries
        .into_iter()
        .map(|(code, name, account_type, category, bucket)| {
            Account::new(name, code, account_type, category, bucket, BASE_CURRENCY)
        })
        .collect()
}
