//! The pagination session controller.
//!
//! One `Pages` value owns one rendered message and runs one sequential loop
//! over the owner's reactions until stopped, idle, or orphaned.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::constants::MESSAGE_MAX_LENGTH;

use super::error::{GatewayError, PageError};
use super::gateway::{ChannelRef, Gateway, MessageRef, UserRef};
use super::page::PageStore;
use super::view::{PageView, RenderContext, Renderer, TextRenderer, chunk_text};
use super::{
    DEFAULT_PER_PAGE, HELP_RETURN_SECS, IDLE_TIMEOUT_SECS, JUMP_REPLY_TIMEOUT_SECS,
    TRANSIENT_NOTICE_SECS,
};

/// What a navigation token does when the owner reacts with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    First,
    Previous,
    Next,
    Last,
    Jump,
    Stop,
    Help,
}

/// One entry of a session's action table.
///
/// The table is an ordered list: reactions are attached to the message in
/// table order and the help view lists them in table order.
#[derive(Debug, Clone, Copy)]
pub struct ActionBinding {
    pub token: &'static str,
    pub description: &'static str,
    pub action: PageAction,
}

/// The standard navigation set.
pub fn default_action_table() -> Vec<ActionBinding> {
    vec![
        ActionBinding {
            token: "⏮",
            description: "goes to the first page",
            action: PageAction::First,
        },
        ActionBinding {
            token: "◀",
            description: "goes to the previous page",
            action: PageAction::Previous,
        },
        ActionBinding {
            token: "▶",
            description: "goes to the next page",
            action: PageAction::Next,
        },
        ActionBinding {
            token: "⏭",
            description: "goes to the last page",
            action: PageAction::Last,
        },
        ActionBinding {
            token: "🔢",
            description: "lets you type a page number to go to",
            action: PageAction::Jump,
        },
        ActionBinding {
            token: "🛑",
            description: "stops the pagination session",
            action: PageAction::Stop,
        },
        ActionBinding {
            token: "ℹ️",
            description: "shows this message",
            action: PageAction::Help,
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Active,
    Terminated,
}

enum Control {
    ReturnFromHelp { page: usize, generation: u64 },
}

enum LoopEvent {
    Control(Option<Control>),
    Reaction(Result<Option<String>, GatewayError>),
}

/// One interactive pagination session.
pub struct Pages<T, R, G> {
    gateway: G,
    channel: ChannelRef,
    owner: UserRef,
    store: PageStore<T>,
    renderer: R,
    actions: Vec<ActionBinding>,
    show_entry_count: bool,
    current_page: usize,
    paginating: bool,
    state: SessionState,
    message: Option<MessageRef>,
    // Bumped on every render; lets deferred continuations detect staleness.
    generation: u64,
    control_tx: mpsc::UnboundedSender<Control>,
    control_rx: mpsc::UnboundedReceiver<Control>,
}

impl<T, R, G> Pages<T, R, G>
where
    R: Renderer<T>,
    G: Gateway,
{
    pub fn new(
        gateway: G,
        channel: ChannelRef,
        owner: UserRef,
        entries: Vec<T>,
        renderer: R,
    ) -> Self {
        Self::with_page_size(gateway, channel, owner, entries, renderer, DEFAULT_PER_PAGE)
    }

    pub fn with_page_size(
        gateway: G,
        channel: ChannelRef,
        owner: UserRef,
        entries: Vec<T>,
        renderer: R,
        per_page: usize,
    ) -> Self {
        let store = PageStore::new(entries, per_page);
        let paginating = store.is_paginating();
        let (control_tx, control_rx) = mpsc::unbounded_channel();

        Self {
            gateway,
            channel,
            owner,
            store,
            renderer,
            actions: default_action_table(),
            show_entry_count: true,
            current_page: 1,
            paginating,
            state: SessionState::Idle,
            message: None,
            generation: 0,
            control_tx,
            control_rx,
        }
    }

    pub fn show_entry_count(mut self, show: bool) -> Self {
        self.show_entry_count = show;
        self
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Render the first page and, when more than one page exists, run the
    /// interactive loop until the session stops, idles out, or loses its
    /// message.
    pub async fn paginate(&mut self) -> Result<(), PageError> {
        self.state = SessionState::Active;
        let result = self.run().await;
        self.state = SessionState::Terminated;

        // An externally deleted message ends the session quietly.
        match result {
            Err(PageError::Gateway(GatewayError::NotFound)) => Ok(()),
            other => other,
        }
    }

    async fn run(&mut self) -> Result<(), PageError> {
        self.show_page(1, true).await?;

        if !self.paginating {
            return Ok(());
        }

        let Some(message) = self.message else {
            return Ok(());
        };
        self.attach_affordances(message).await;

        let idle = Duration::from_secs(IDLE_TIMEOUT_SECS);
        let tokens: Vec<&'static str> = self.actions.iter().map(|b| b.token).collect();

        while self.paginating {
            let owner = self.owner;
            let event = {
                let gateway = &self.gateway;
                let control_rx = &mut self.control_rx;
                tokio::select! {
                    biased;
                    control = control_rx.recv() => LoopEvent::Control(control),
                    reaction = gateway.await_interaction(message, owner, &tokens, idle) => {
                        LoopEvent::Reaction(reaction)
                    }
                }
            };

            match event {
                LoopEvent::Control(Some(Control::ReturnFromHelp { page, generation })) => {
                    // Stale once anything else has rendered since the help view.
                    if generation == self.generation {
                        self.show_page(page, false).await?;
                    }
                }
                // The session holds its own sender, so this arm is unreachable
                // while the loop runs; bail out rather than spin.
                LoopEvent::Control(None) => break,
                LoopEvent::Reaction(reaction) => match reaction? {
                    None => {
                        if let Err(err) = self.gateway.clear_affordances(message).await {
                            debug!(%err, "failed to clear reactions after idle timeout");
                        }
                        break;
                    }
                    Some(token) => {
                        if let Err(err) =
                            self.gateway.remove_affordance(message, &token, owner).await
                        {
                            debug!(%token, %err, "failed to remove reaction");
                        }
                        self.dispatch(&token).await?;
                    }
                },
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, token: &str) -> Result<(), PageError> {
        let Some(action) = self
            .actions
            .iter()
            .find(|b| b.token == token)
            .map(|b| b.action)
        else {
            return Ok(());
        };

        match action {
            PageAction::First => self.show_page(1, false).await,
            PageAction::Previous => self.checked_show_page(self.current_page.saturating_sub(1)).await,
            PageAction::Next => self.checked_show_page(self.current_page + 1).await,
            PageAction::Last => self.show_page(self.store.total_pages(), false).await,
            PageAction::Jump => self.prompt_jump().await,
            PageAction::Help => self.show_help().await,
            PageAction::Stop => self.stop().await,
        }
    }

    fn render_view(&self, page: usize, first: bool) -> Result<PageView, PageError> {
        let slice = self.store.slice(page)?;
        let ctx = RenderContext {
            page,
            total_pages: self.store.total_pages(),
            total_entries: self.store.len(),
            start_index: (page - 1) * self.store.per_page(),
            show_entry_count: self.show_entry_count,
            paginating: self.paginating,
            first,
        };
        Ok(self.renderer.render(slice, &ctx))
    }

    async fn show_page(&mut self, page: usize, first: bool) -> Result<(), PageError> {
        self.current_page = page;
        self.generation += 1;
        let view = self.render_view(page, first)?;

        match self.message {
            Some(message) if !first => self.gateway.edit_page(message, &view).await?,
            _ => {
                let message = self.gateway.send_page(self.channel, &view).await?;
                self.message = Some(message);
            }
        }

        Ok(())
    }

    /// Navigate only when the target is a real page; anything else is a no-op.
    async fn checked_show_page(&mut self, page: usize) -> Result<(), PageError> {
        if page >= 1 && page <= self.store.total_pages() {
            self.show_page(page, false).await?;
        }
        Ok(())
    }

    async fn attach_affordances(&self, message: MessageRef) {
        let two_pages = self.store.total_pages() == 2;

        for binding in &self.actions {
            // no ⏮ or ⏭ reactions if we only have two pages
            if two_pages && matches!(binding.action, PageAction::First | PageAction::Last) {
                continue;
            }
            if let Err(err) = self.gateway.attach_affordance(message, binding.token).await {
                debug!(token = binding.token, %err, "failed to attach reaction");
            }
        }
    }

    async fn prompt_jump(&mut self) -> Result<(), PageError> {
        let mut to_delete: Vec<MessageRef> = Vec::new();

        let prompt = self
            .gateway
            .send_message(self.channel, "What page do you want to go to?")
            .await?;
        to_delete.push(prompt);

        let reply = self
            .gateway
            .await_reply(
                self.channel,
                self.owner,
                |content| content.trim().parse::<usize>().is_ok(),
                Duration::from_secs(JUMP_REPLY_TIMEOUT_SECS),
            )
            .await?;

        match reply {
            None => {
                let notice = self.gateway.send_message(self.channel, "Took too long.").await?;
                to_delete.push(notice);
                tokio::time::sleep(Duration::from_secs(TRANSIENT_NOTICE_SECS)).await;
            }
            Some((reply_message, content)) => {
                to_delete.push(reply_message);
                let total_pages = self.store.total_pages();

                match content.trim().parse::<usize>() {
                    Ok(page) if page >= 1 && page <= total_pages => {
                        self.show_page(page, false).await?;
                    }
                    Ok(page) => {
                        let text = format!("Invalid page given. ({page}/{total_pages})");
                        let notice = self.gateway.send_message(self.channel, &text).await?;
                        to_delete.push(notice);
                        tokio::time::sleep(Duration::from_secs(TRANSIENT_NOTICE_SECS)).await;
                    }
                    // The reply wait only matches digit-only messages.
                    Err(_) => {}
                }
            }
        }

        self.cleanup_messages(&to_delete).await;
        Ok(())
    }

    async fn show_help(&mut self) -> Result<(), PageError> {
        let Some(message) = self.message else {
            return Ok(());
        };

        let mut lines = vec![
            "Welcome to the interactive paginator!\n".to_owned(),
            "This interactively allows you to see pages of text by navigating with reactions. They are as follows:\n"
                .to_owned(),
        ];
        for binding in &self.actions {
            lines.push(format!("{} {}", binding.token, binding.description));
        }

        let view = PageView {
            description: Some(lines.join("\n")),
            footer: Some(format!(
                "We were on page {} before this message.",
                self.current_page
            )),
            ..Default::default()
        };
        self.gateway.edit_page(message, &view).await?;

        let page = self.current_page;
        let generation = self.generation;
        let control = self.control_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(HELP_RETURN_SECS)).await;
            // A dropped receiver (session over) or stale generation makes
            // this a no-op on the other side.
            let _ = control.send(Control::ReturnFromHelp { page, generation });
        });

        Ok(())
    }

    async fn stop(&mut self) -> Result<(), PageError> {
        if let Some(message) = self.message {
            if let Err(err) = self.gateway.delete_message(message).await {
                debug!(%err, "failed to delete paginated message on stop");
            }
        }
        self.paginating = false;
        Ok(())
    }

    async fn cleanup_messages(&self, messages: &[MessageRef]) {
        let deletes = messages.iter().map(|m| self.gateway.delete_message(*m));
        for result in futures::future::join_all(deletes).await {
            if let Err(err) = result {
                debug!(%err, "failed to delete pagination bookkeeping message");
            }
        }
    }
}

impl<G: Gateway> Pages<String, TextRenderer, G> {
    /// Paginate a long block of raw text, one fenced chunk per page.
    pub fn for_text(gateway: G, channel: ChannelRef, owner: UserRef, text: &str) -> Self {
        let chunks = chunk_text(text, "```", "```", MESSAGE_MAX_LENGTH - 200);
        Pages::with_page_size(gateway, channel, owner, chunks, TextRenderer, 1)
            .show_entry_count(false)
    }
}
