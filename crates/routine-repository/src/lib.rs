//! # Routine Repository
//!
//! SQLite persistence for companies and employees.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn CompanyRepository> / Arc<dyn EmployeeRepository>
//! SqliteCompanyRepository / SqliteEmployeeRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! DatabasePool (SQLx, migrations, seed data)
//!   ↓
//! SQLite
//! ```
//!
//! Filters, ordering and the page window are all pushed into SQL; nothing is
//! sorted or sliced in memory.

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::*;
pub use traits::*;
