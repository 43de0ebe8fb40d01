pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod tally;

pub use app::router;
pub use config::Config;
pub use ledger::apply_vote;
pub use models::{Poll, PollOption, Snapshot};
pub use session::{SessionProvider, TokenSessions};
pub use state::AppState;
pub use storage::load_data;
