//! # Roster Repository
//!
//! The employee store: the system of record behind the cache.
//!
//! ```text
//! EmployeeService
//!   ↓  Arc<dyn EmployeeStore>
//! MySqlEmployeeStore            (SQLx, parameter-bound QueryBuilder)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! DatabasePool                  (pool, health check, migrations)
//!   ↓
//! MySQL
//! ```
//!
//! [`InMemoryEmployeeStore`] implements the same contract over a map and is
//! used by tests and by local runs without a database.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::InMemoryEmployeeStore;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
