/// Database Module
///
/// The database layer is split into focused submodules:
/// - **Connection Management** (`connection.rs`): the `SqliteAdapter` session and its transactions
/// - **Process-wide Access** (`global.rs`): connect/disconnect facade over one shared adapter
/// - **Parameter Binding** (`params.rs`): positional parameter values
/// - **Query Execution** (`query.rs`): statement execution and result materialization
/// - **Schema Introspection** (`schema.rs`): table metadata
///
/// All operations return the crate-wide `AdapterError`.
pub mod connection;
pub mod global;
pub mod params;
pub mod query;
pub mod schema;

pub use connection::*;
pub use params::*;
pub use query::*;
