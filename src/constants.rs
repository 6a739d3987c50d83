// Constants with Discord-imposed limitations
pub const MESSAGE_MAX_LENGTH:      usize = 2000; // max 2000
pub const EMBED_FIELD_MAX_LENGTH:  usize = 1024; // max 1024

// Embed accent colour (dark purple, same as the old bot)
pub const EMBED_COLOUR: u32 = 0x71368A;

// constants for trimming oversized field text
pub const ELLIPSIS: &str = "…";
pub const ELLIPSIS_LEN: usize = ELLIPSIS.len();

// CMD: define
pub const DEFINITIONS_PER_PAGE:    usize =  5;
pub const DEFINITIONS_FETCH_LIMIT: usize = 25;

// CMD: synonyms / antonyms
pub const RELATED_WORDS_PER_PAGE:  usize = 12;
pub const RELATED_WORDS_LIMIT:     usize = 50;

// CMD: examples
pub const EXAMPLES_FETCH_LIMIT:    usize = 10;

// CMD: languages
pub const LANGUAGES_PER_PAGE:      usize = 15;

// API endpoints
pub const WORDNIK_API_BASE:   &str = "https://api.wordnik.com/v4";
pub const TRANSLATE_API_BASE: &str = "https://translation.googleapis.com/language/translate/v2";
