//! Interactive reaction-driven pagination for command output.
//!
//! A `Pages` session renders one page of entries into a message, attaches
//! navigation reactions, and runs a loop that applies each qualifying
//! reaction from the session owner until the session is stopped, idles out,
//! or its message disappears.

/// Seconds without a qualifying reaction before a session gives up.
pub const IDLE_TIMEOUT_SECS: u64 = 120;
/// Seconds the jump prompt waits for a page-number reply.
pub const JUMP_REPLY_TIMEOUT_SECS: u64 = 30;
/// Seconds the help view stays up before flipping back to the page it replaced.
pub const HELP_RETURN_SECS: u64 = 60;
/// Seconds a transient error notice stays visible before cleanup.
pub const TRANSIENT_NOTICE_SECS: u64 = 5;
/// Default number of entries per page.
pub const DEFAULT_PER_PAGE: usize = 12;

mod error;
mod gateway;
mod page;
mod session;
mod view;

pub use error::{GatewayError, PageError};
pub use gateway::{ChannelRef, DiscordGateway, Gateway, MessageRef, UserRef};
pub use page::PageStore;
pub use session::{ActionBinding, PageAction, Pages, default_action_table};
pub use view::{FieldRenderer, ListRenderer, PageView, RenderContext, Renderer, TextRenderer, chunk_text};
