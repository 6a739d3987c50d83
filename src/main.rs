////////////////////////////////////////////////////////////////////////////////
/// Imports

use poise::serenity_prelude as serenity;

// Read the bot token and API keys from a .env
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cmd_dictionary;
mod cmd_translate;
mod cmd_utility;
mod constants;
mod definitions;
mod dictionary;
mod pages;
mod translator;

use definitions::Data;
use dictionary::Wordnik;
use translator::Translator;

////////////////////////////////////////////////////////////////////////////////
/// Type and struct definitions

struct Handler;

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, _: serenity::Context, ready: serenity::all::Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

////////////////////////////////////////////////////////////////////////////////
/// Function definitions

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let token = std::env::var("DISCORD_TOKEN").expect("missing DISCORD_TOKEN in .env");
    let wordnik_key =
        std::env::var("WORDNIK_API_KEY").expect("missing WORDNIK_API_KEY in .env");
    let translate_key = std::env::var("GOOGLE_TRANSLATE_API_KEY")
        .expect("missing GOOGLE_TRANSLATE_API_KEY in .env");

    let intents =
            serenity::GatewayIntents::MESSAGE_CONTENT
        |   serenity::GatewayIntents::GUILDS
        |   serenity::GatewayIntents::GUILD_MESSAGES
        |   serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                cmd_utility::register(),
                cmd_utility::help(),
                cmd_dictionary::define(),
                cmd_dictionary::synonyms(),
                cmd_dictionary::antonyms(),
                cmd_dictionary::examples(),
                cmd_dictionary::wotd(),
                cmd_translate::translate(),
                cmd_translate::languages(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(">".to_owned()),
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                let http = reqwest::Client::new();
                Ok(Data {
                    wordnik: Wordnik::new(http.clone(), wordnik_key),
                    translator: Translator::new(http, translate_key),
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .event_handler(Handler)
        .await
        .expect("Error creating client");

    tokio::spawn(async move {
        let _ = client
            .start()
            .await
            .map_err(|why| error!("Client ended: {:?}", why));
    });

    let _signal_err = tokio::signal::ctrl_c().await;
    info!("Received Ctrl-C, shutting down.");
}
