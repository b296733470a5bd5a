//! Derived views over a transaction snapshot.
//!
//! Everything in this module is a stateless, synchronous function of
//! `(snapshot, criteria, now)`. Nothing here performs I/O or holds state, so
//! callers recompute freely whenever the store or a selection changes. The
//! current instant is always an explicit argument; commands pass the local
//! wall clock and tests pass fixed values.

mod buckets;
mod categories;
mod period;
mod query;
mod totals;

pub use buckets::{bucketize, Bucket};
pub use categories::{expenses_by_category, CategoryTotal};
pub use period::{filter_by_period, Period};
pub use query::{run_query, DateRange, ListQuery, SortOrder, TypeFilter};
pub use totals::{totals, Totals};
