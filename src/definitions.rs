use crate::dictionary::Wordnik;
use crate::translator::Translator;

// Defines user data; this is always available in the Serenity context of an invocation
pub struct Data {
    pub wordnik: Wordnik,
    pub translator: Translator,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
