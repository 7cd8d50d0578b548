//! In-process async lock with FIFO fairness and bounded waits.
//!
//! The client uses this to serialize critical sections across concurrent
//! callers, like the request dispatch on a single broker connection.  Callers
//! are granted the lock strictly in the order they asked for it, and a
//! configured timeout bounds how long any one of them will wait.
//!
//! ```rust,ignore
//! use kclient_lock::{Lock, LockConfig};
//!
//! let lock = Lock::new(
//!     LockConfig::default()
//!         .with_timeout(Duration::from_secs(30))
//!         .with_description("broker 1 dispatch"),
//! );
//!
//! let guard = lock.acquire().await?;
//! send_request(&conn, req).await?; // guard releases on the error path too
//! guard.release();
//! ```

mod config;
mod errors;
mod lock;

pub use config::LockConfig;
pub use errors::LockError;
pub use lock::{Lock, LockGuard, OwnedLockGuard};
