use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter};

use crate::cmd_dictionary::{session_refs, trim_field};
use crate::constants::{EMBED_COLOUR, EMBED_FIELD_MAX_LENGTH, LANGUAGES_PER_PAGE};
use crate::definitions::{Context, Error};
use crate::pages::{ListRenderer, Pages};

/// Translate a word or phrase
#[poise::command(prefix_command, slash_command)]
pub async fn translate(
    ctx: Context<'_>,
    #[description = "Target language code (ISO 639-1, e.g. `fr`)"] target_language: String,
    #[description = "The text to translate"]
    #[rest]
    text: String,
) -> Result<(), Error> {
    ctx.defer().await?;

    let translation = ctx
        .data()
        .translator
        .translate(&text, &target_language)
        .await?;

    let mut embed = CreateEmbed::new()
        .colour(EMBED_COLOUR)
        .title("🌐 Translation")
        .field("Input", trim_field(text, EMBED_FIELD_MAX_LENGTH), false)
        .field(
            format!("Translation ({target_language})"),
            trim_field(translation.translated_text, EMBED_FIELD_MAX_LENGTH),
            false,
        );
    if let Some(source) = &translation.detected_source_language {
        embed = embed.footer(CreateEmbedFooter::new(format!(
            "Detected source language: {source}"
        )));
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Lists every language the translator supports
#[poise::command(prefix_command, slash_command)]
pub async fn languages(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer().await?;

    let languages = ctx.data().translator.languages("en").await?;

    let entries: Vec<String> = languages
        .into_iter()
        .map(|language| match language.name {
            Some(name) => format!("{name} ({})", language.language),
            None => language.language,
        })
        .collect();

    if entries.is_empty() {
        ctx.say("The translation service reported no languages.").await?;
        return Ok(());
    }

    ctx.say(format!("The translator knows **{}** languages:", entries.len()))
        .await?;

    let (gateway, channel, owner) = session_refs(&ctx);
    let mut session = Pages::with_page_size(
        gateway,
        channel,
        owner,
        entries,
        ListRenderer::titled("🌐 Supported languages"),
        LANGUAGES_PER_PAGE,
    );
    session.paginate().await?;

    Ok(())
}
