//! Telegram module for RedeemBot
//!
//! Bot lifecycle, command handling, and notification sending:
//!
//! ```text
//! telegram/
//! ├── mod.rs           # public API
//! ├── bot.rs           # bot creation and token validation
//! ├── service.rs       # dispatcher wiring and polling loop
//! ├── notifier.rs      # best-effort creator/admin notifications
//! ├── proof.rs         # pending proof requests (screenshot flow)
//! ├── keyboards.rs     # inline keyboards
//! ├── formatters.rs    # HTML message builders
//! └── commands/        # command handlers
//!     ├── mod.rs       # Command enum + routing
//!     ├── codes.rs     # generate/redeem/list/delete
//!     ├── status.rs    # start/ping
//!     └── callbacks.rs # button click handlers
//! ```

pub mod bot;
pub mod commands;
pub mod formatters;
pub mod keyboards;
pub mod notifier;
pub mod proof;
pub mod service;

pub use bot::init_bot;
pub use notifier::{init_notifier, queue_notification, Notification};
pub use proof::ProofTracker;
pub use service::run_dispatcher;
