//! Contract between the runtime (platform loop) and the application.
//!
//! The runtime owns the window and GPU; the application only sees a
//! per-frame [`FrameCtx`] and answers with an [`AppControl`].

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
