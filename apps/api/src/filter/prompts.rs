// Prompt text sent to image-generation backends. Keep the wording stable:
// backends are tuned against it.

/// `{style}` is replaced with the user's short style description (e.g. "sepia").
pub const FILTER_PROMPT_TEMPLATE: &str = "Apply a {style} filter to this image.";

/// Longest style description forwarded to a backend, in characters.
pub const MAX_STYLE_CHARS: usize = 200;
