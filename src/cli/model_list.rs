use crate::core::models::MODELS;

pub fn format_models(default_model: &str) -> String {
    let mut listing = String::from("Available models:");
    for model in MODELS {
        if *model == default_model {
            listing.push_str(&format!("\n  {model} (default)"));
        } else {
            listing.push_str(&format!("\n  {model}"));
        }
    }
    listing
}

pub fn print_models(default_model: &str) {
    println!("{}", format_models(default_model));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_only_the_default() {
        let listing = format_models("gemma2-9b-it");
        assert!(listing.contains("\n  gemma2-9b-it (default)"));
        assert_eq!(listing.matches("(default)").count(), 1);
        assert_eq!(listing.lines().count(), MODELS.len() + 1);
    }
}
