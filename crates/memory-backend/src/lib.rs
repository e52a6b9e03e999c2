//! In-memory backend for tests.
//!
//! Tables live entirely in memory and every call made against them is
//! appended to a [`CallLog`], so tests can assert on what a script asked
//! the backend to do as well as on the resulting data.
//!
//! ```ignore
//! let mut base = MemoryBase::new("appTest").with_table(
//!     MemoryTable::new("Tasks").with_record("rec1", fields),
//! );
//! run_script(base.get_table("Tasks")?).await?;
//! assert_eq!(base.get_table("Tasks")?.calls().updates().len(), 1);
//! ```

mod base;
mod call_log;
mod table;

pub use base::MemoryBase;
pub use call_log::{CallLog, RecordedCall};
pub use table::{MemoryRecord, MemoryTable};
