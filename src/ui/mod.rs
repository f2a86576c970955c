//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** — application state, keyboard event loop, autoplay polling, pane focus
//! - **[`live`]** — the structure session behind structure mode and its operation keys
//! - **[`panes`]** — stateless render functions for each visible pane (array, info,
//!   structure, history, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with
//! [`App::for_algorithm`] or [`App::for_structure`] and call [`App::run`] to
//! start the event loop.
//!
//! [`App::run`]: app::App::run
//! [`App::for_algorithm`]: app::App::for_algorithm
//! [`App::for_structure`]: app::App::for_structure

pub mod app;
pub mod live;
pub mod panes;
pub mod theme;

pub use app::{AlgorithmSession, App};
