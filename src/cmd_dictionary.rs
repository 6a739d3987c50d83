use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter};

use crate::constants::{
    DEFINITIONS_FETCH_LIMIT, DEFINITIONS_PER_PAGE, ELLIPSIS, ELLIPSIS_LEN, EMBED_COLOUR,
    EMBED_FIELD_MAX_LENGTH, EXAMPLES_FETCH_LIMIT, RELATED_WORDS_LIMIT, RELATED_WORDS_PER_PAGE,
};
use crate::definitions::{Context, Error};
use crate::pages::{ChannelRef, DiscordGateway, FieldRenderer, ListRenderer, Pages, UserRef};

pub fn session_refs(ctx: &Context<'_>) -> (DiscordGateway, ChannelRef, UserRef) {
    (
        DiscordGateway::new(ctx.serenity_context()),
        ChannelRef(ctx.channel_id().get()),
        UserRef(ctx.author().id.get()),
    )
}

pub fn trim_field(mut text: String, max_width: usize) -> String {
    if max_width <= ELLIPSIS_LEN {
        return ELLIPSIS.to_string();
    }

    if text.len() > max_width {
        let cutoff = max_width - ELLIPSIS_LEN;
        let safe_cutoff = text
            .char_indices()
            .take_while(|(idx, _)| *idx <= cutoff)
            .map(|(idx, _)| idx)
            .last()
            .unwrap_or(0);

        text.truncate(safe_cutoff);
        text.push_str(ELLIPSIS);
    }

    text
}

/// Looks for the definitions of a word
#[poise::command(prefix_command, slash_command)]
pub async fn define(
    ctx: Context<'_>,
    #[description = "The word to define"] word: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let definitions = ctx
        .data()
        .wordnik
        .definitions(&word, DEFINITIONS_FETCH_LIMIT)
        .await?;

    let entries: Vec<(String, String)> = definitions
        .into_iter()
        .filter_map(|definition| {
            let text = definition.text?;
            let name = match definition.part_of_speech {
                Some(part_of_speech) => format!("{word} ({part_of_speech})"),
                None => word.clone(),
            };
            Some((name, trim_field(text, EMBED_FIELD_MAX_LENGTH)))
        })
        .collect();

    if entries.is_empty() {
        ctx.say(format!("No definitions found for `{word}`.")).await?;
        return Ok(());
    }

    ctx.say(format!("Found **{}** definitions for *{word}*:", entries.len()))
        .await?;

    let (gateway, channel, owner) = session_refs(&ctx);
    let mut session = Pages::with_page_size(
        gateway,
        channel,
        owner,
        entries,
        FieldRenderer::titled(format!("📖 Definitions for {word}")),
        DEFINITIONS_PER_PAGE,
    );
    session.paginate().await?;

    Ok(())
}

/// Lists synonyms of a word
#[poise::command(prefix_command, slash_command)]
pub async fn synonyms(
    ctx: Context<'_>,
    #[description = "The word to find synonyms for"] word: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let words = ctx.data().wordnik.synonyms(&word, RELATED_WORDS_LIMIT).await?;

    if words.is_empty() {
        ctx.say(format!("No synonyms found for `{word}`.")).await?;
        return Ok(());
    }

    ctx.say(format!("Found **{}** synonyms for *{word}*:", words.len()))
        .await?;

    let (gateway, channel, owner) = session_refs(&ctx);
    let mut session = Pages::with_page_size(
        gateway,
        channel,
        owner,
        words,
        ListRenderer::titled(format!("📖 Synonyms for {word}")),
        RELATED_WORDS_PER_PAGE,
    );
    session.paginate().await?;

    Ok(())
}

/// Lists antonyms of a word
#[poise::command(prefix_command, slash_command)]
pub async fn antonyms(
    ctx: Context<'_>,
    #[description = "The word to find antonyms for"] word: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let words = ctx.data().wordnik.antonyms(&word, RELATED_WORDS_LIMIT).await?;

    if words.is_empty() {
        ctx.say(format!("No antonyms found for `{word}`.")).await?;
        return Ok(());
    }

    ctx.say(format!("Found **{}** antonyms for *{word}*:", words.len()))
        .await?;

    let (gateway, channel, owner) = session_refs(&ctx);
    let mut session = Pages::with_page_size(
        gateway,
        channel,
        owner,
        words,
        ListRenderer::titled(format!("📖 Antonyms for {word}")),
        RELATED_WORDS_PER_PAGE,
    );
    session.paginate().await?;

    Ok(())
}

/// Shows example sentences using a word
#[poise::command(prefix_command, slash_command)]
pub async fn examples(
    ctx: Context<'_>,
    #[description = "The word to find examples for"] word: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let examples = ctx.data().wordnik.examples(&word, EXAMPLES_FETCH_LIMIT).await?;

    let text = examples
        .iter()
        .filter_map(|example| example.text.as_deref())
        .enumerate()
        .map(|(index, sentence)| format!("{}. {}", index + 1, sentence))
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        ctx.say(format!("No examples found for `{word}`.")).await?;
        return Ok(());
    }

    ctx.say(format!("Examples for *{word}*:")).await?;

    let (gateway, channel, owner) = session_refs(&ctx);
    let mut session = Pages::for_text(gateway, channel, owner, &text);
    session.paginate().await?;

    Ok(())
}

/// Shows Wordnik's word of the day
#[poise::command(prefix_command, slash_command)]
pub async fn wotd(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let wotd = ctx.data().wordnik.word_of_the_day().await?;

    let mut lines: Vec<String> = wotd
        .definitions
        .iter()
        .filter_map(|definition| {
            let text = definition.text.as_deref()?;
            Some(match definition.part_of_speech.as_deref() {
                Some(part_of_speech) => format!("*{part_of_speech}* {text}"),
                None => text.to_owned(),
            })
        })
        .collect();

    if lines.is_empty() {
        lines.push("No definitions available today.".to_owned());
    }

    let mut embed = CreateEmbed::new()
        .colour(EMBED_COLOUR)
        .title(format!("📖 Word of the day: {}", wotd.word))
        .description(lines.join("\n"));
    if let Some(note) = &wotd.note {
        embed = embed.footer(CreateEmbedFooter::new(note));
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_field_leaves_short_text_alone() {
        assert_eq!(trim_field("short".to_owned(), 100), "short");
    }

    #[test]
    fn trim_field_cuts_at_width_and_appends_ellipsis() {
        let trimmed = trim_field("x".repeat(100), 20);
        assert!(trimmed.len() <= 20 + ELLIPSIS_LEN);
        assert!(trimmed.ends_with(ELLIPSIS));
    }

    #[test]
    fn trim_field_respects_char_boundaries() {
        let trimmed = trim_field("héllö wörld à la carte".repeat(10), 30);
        assert!(trimmed.ends_with(ELLIPSIS));
    }
}
