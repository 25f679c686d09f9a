//! Types that represent the core data model, such as `Expense`, `Sale` and `Category`.
mod amount;
mod category;
mod expense;
mod sale;

pub use amount::{Amount, AmountError, AmountFormat};
pub use category::Category;
pub(crate) use expense::ExpenseRow;
pub use expense::{Expense, EXPENSE_COLUMNS};
pub use sale::{Sale, SALE_COLUMNS};
