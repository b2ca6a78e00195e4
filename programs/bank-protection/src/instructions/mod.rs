pub mod deposit;
pub mod initialize_admin;
pub mod initialize_pool;
pub mod issue;
pub mod pool_admin;
pub mod query;
pub mod redeem;
pub mod transfer_authority;
pub mod withdraw;

pub use deposit::*;
pub use initialize_admin::*;
pub use initialize_pool::*;
pub use issue::*;
pub use pool_admin::*;
pub use query::*;
pub use redeem::*;
pub use transfer_authority::*;
pub use withdraw::*;
