//! The messaging capabilities a pagination session needs, and the one
//! production implementation over the Serenity context.

use std::time::Duration;

use poise::serenity_prelude as serenity;

use serenity::{
    ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage, HttpError,
    MessageCollector, MessageId, ReactionCollector, ReactionType, UserId,
};

use crate::constants::EMBED_COLOUR;

use super::error::GatewayError;
use super::view::PageView;

/// Channel a session posts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRef(pub u64);

/// User allowed to drive a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRef(pub u64);

/// One message under a session's control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel: ChannelRef,
    pub id: u64,
}

/// Abstract messaging backend for pagination sessions.
///
/// Sessions only ever talk to the backend through this trait, which keeps the
/// control loop testable against a scripted implementation.
#[serenity::async_trait]
pub trait Gateway: Send + Sync {
    /// Post a rendered page and return a handle to the new message.
    async fn send_page(&self, channel: ChannelRef, view: &PageView)
    -> Result<MessageRef, GatewayError>;

    /// Replace a message's content in place. `NotFound` means the message was
    /// deleted out from under the session.
    async fn edit_page(&self, message: MessageRef, view: &PageView) -> Result<(), GatewayError>;

    /// Post a plain text message (jump prompts, transient notices).
    async fn send_message(
        &self,
        channel: ChannelRef,
        text: &str,
    ) -> Result<MessageRef, GatewayError>;

    async fn delete_message(&self, message: MessageRef) -> Result<(), GatewayError>;

    /// Add a navigation reaction to the message.
    async fn attach_affordance(
        &self,
        message: MessageRef,
        token: &str,
    ) -> Result<(), GatewayError>;

    /// Remove one user's instance of a navigation reaction.
    async fn remove_affordance(
        &self,
        message: MessageRef,
        token: &str,
        actor: UserRef,
    ) -> Result<(), GatewayError>;

    /// Strip every reaction from the message.
    async fn clear_affordances(&self, message: MessageRef) -> Result<(), GatewayError>;

    /// Wait for the owner's next reaction on the message matching one of
    /// `tokens`. `None` on timeout.
    async fn await_interaction(
        &self,
        message: MessageRef,
        owner: UserRef,
        tokens: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>, GatewayError>;

    /// Wait for the owner's next message in the channel whose content passes
    /// `predicate`. `None` on timeout.
    async fn await_reply(
        &self,
        channel: ChannelRef,
        owner: UserRef,
        predicate: for<'a> fn(&'a str) -> bool,
        timeout: Duration,
    ) -> Result<Option<(MessageRef, String)>, GatewayError>;
}

/// `Gateway` over a live Serenity context (HTTP + shard collectors).
pub struct DiscordGateway {
    ctx: serenity::Context,
}

impl DiscordGateway {
    pub fn new(ctx: &serenity::Context) -> Self {
        Self { ctx: ctx.clone() }
    }
}

fn embed_from_view(view: &PageView) -> Option<CreateEmbed> {
    if view.title.is_none()
        && view.description.is_none()
        && view.fields.is_empty()
        && view.footer.is_none()
    {
        return None;
    }

    let mut embed = CreateEmbed::new().colour(EMBED_COLOUR);
    if let Some(title) = &view.title {
        embed = embed.title(title);
    }
    if let Some(description) = &view.description {
        embed = embed.description(description);
    }
    for (name, value) in &view.fields {
        embed = embed.field(name, value, false);
    }
    if let Some(footer) = &view.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    Some(embed)
}

fn map_serenity_err(err: serenity::Error) -> GatewayError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
        if response.status_code.as_u16() == 404 {
            return GatewayError::NotFound;
        }
    }
    GatewayError::Unavailable(err.into())
}

#[serenity::async_trait]
impl Gateway for DiscordGateway {
    async fn send_page(
        &self,
        channel: ChannelRef,
        view: &PageView,
    ) -> Result<MessageRef, GatewayError> {
        let mut builder = CreateMessage::new();
        if let Some(content) = &view.content {
            builder = builder.content(content);
        }
        if let Some(embed) = embed_from_view(view) {
            builder = builder.embed(embed);
        }

        let message = ChannelId::new(channel.0)
            .send_message(&self.ctx.http, builder)
            .await
            .map_err(map_serenity_err)?;

        Ok(MessageRef {
            channel,
            id: message.id.get(),
        })
    }

    async fn edit_page(&self, message: MessageRef, view: &PageView) -> Result<(), GatewayError> {
        // Always set both parts so a plain-content page fully replaces an
        // embed page and vice versa.
        let builder = EditMessage::new()
            .content(view.content.clone().unwrap_or_default())
            .embeds(embed_from_view(view).into_iter().collect());

        ChannelId::new(message.channel.0)
            .edit_message(&self.ctx.http, MessageId::new(message.id), builder)
            .await
            .map_err(map_serenity_err)?;

        Ok(())
    }

    async fn send_message(
        &self,
        channel: ChannelRef,
        text: &str,
    ) -> Result<MessageRef, GatewayError> {
        let message = ChannelId::new(channel.0)
            .say(&self.ctx.http, text)
            .await
            .map_err(map_serenity_err)?;

        Ok(MessageRef {
            channel,
            id: message.id.get(),
        })
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), GatewayError> {
        self.ctx
            .http
            .delete_message(
                ChannelId::new(message.channel.0),
                MessageId::new(message.id),
                None,
            )
            .await
            .map_err(map_serenity_err)
    }

    async fn attach_affordance(
        &self,
        message: MessageRef,
        token: &str,
    ) -> Result<(), GatewayError> {
        self.ctx
            .http
            .create_reaction(
                ChannelId::new(message.channel.0),
                MessageId::new(message.id),
                &ReactionType::Unicode(token.to_owned()),
            )
            .await
            .map_err(map_serenity_err)
    }

    async fn remove_affordance(
        &self,
        message: MessageRef,
        token: &str,
        actor: UserRef,
    ) -> Result<(), GatewayError> {
        self.ctx
            .http
            .delete_reaction(
                ChannelId::new(message.channel.0),
                MessageId::new(message.id),
                UserId::new(actor.0),
                &ReactionType::Unicode(token.to_owned()),
            )
            .await
            .map_err(map_serenity_err)
    }

    async fn clear_affordances(&self, message: MessageRef) -> Result<(), GatewayError> {
        self.ctx
            .http
            .delete_message_reactions(
                ChannelId::new(message.channel.0),
                MessageId::new(message.id),
            )
            .await
            .map_err(map_serenity_err)
    }

    async fn await_interaction(
        &self,
        message: MessageRef,
        owner: UserRef,
        tokens: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>, GatewayError> {
        let wanted: Vec<String> = tokens.iter().map(|t| (*t).to_owned()).collect();

        let reaction = ReactionCollector::new(&self.ctx.shard)
            .message_id(MessageId::new(message.id))
            .author_id(UserId::new(owner.0))
            .filter(move |reaction| wanted.iter().any(|t| reaction.emoji.unicode_eq(t)))
            .timeout(timeout)
            .await;

        Ok(reaction.map(|r| r.emoji.to_string()))
    }

    async fn await_reply(
        &self,
        channel: ChannelRef,
        owner: UserRef,
        predicate: for<'a> fn(&'a str) -> bool,
        timeout: Duration,
    ) -> Result<Option<(MessageRef, String)>, GatewayError> {
        let message = MessageCollector::new(&self.ctx.shard)
            .channel_id(ChannelId::new(channel.0))
            .author_id(UserId::new(owner.0))
            .filter(move |m| predicate(&m.content))
            .timeout(timeout)
            .await;

        Ok(message.map(|m| {
            (
                MessageRef {
                    channel,
                    id: m.id.get(),
                },
                m.content.clone(),
            )
        }))
    }
}
