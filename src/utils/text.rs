/// Keep at most `word_limit` whitespace-separated words, appending `...`
/// when anything was cut.
pub fn truncate_words(text: &str, word_limit: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > word_limit {
        format!("{}...", words[..word_limit].join(" "))
    } else {
        text.to_string()
    }
}
