//! Fixed catalog of selectable model identifiers.
//!
//! Selection is strict: identifiers outside [`MODELS`] are rejected and the
//! caller keeps whatever was selected before.

/// Selectable models. The first entry is the default selection.
pub const MODELS: &[&str] = &[
    "llama-3.1-70b-versatile",
    "llama-3.1-8b-instant",
    "mixtral-8x7b-32768",
    "llama3-groq-70b-8192-tool-use-preview",
    "llama3-groq-8b-8192-tool-use-preview",
    "llama-guard-3-8b",
    "llama3-70b-8192",
    "llama3-8b-8192",
    "gemma-7b-it",
    "gemma2-9b-it",
    "whisper-large-v3",
];

pub fn default_model() -> &'static str {
    MODELS[0]
}

/// Look up `id` in the catalog, returning the canonical entry.
pub fn find_model(id: &str) -> Option<&'static str> {
    let id = id.trim();
    MODELS.iter().copied().find(|model| *model == id)
}

/// Resolve a configured default, falling back to the first catalog entry
/// when the configured value is absent or unknown.
pub fn resolve_default(configured: Option<&str>) -> &'static str {
    match configured {
        Some(id) => match find_model(id) {
            Some(model) => model,
            None => {
                tracing::warn!(model = id, "configured default model is not in the catalog");
                default_model()
            }
        },
        None => default_model(),
    }
}
