//! Types that represent the core data model, such as `Table`, `Amount` and `MonthKey`.
mod amount;
mod bucket;
mod month;
mod table;

pub use amount::{is_placeholder, Amount, AmountError, CURRENCY};
pub use bucket::{
    assignment, normalize_category, Assignment, Bucket, CATEGORY_BUCKETS, INCOME_CATEGORY,
};
pub use month::{month_number, MonthKey};
pub use table::{Row, Table, UNNAMED};
