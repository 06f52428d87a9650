use super::patterns::EMAIL;

/// First `token@token` match scanning left to right.
pub fn find_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_first_email() {
        let text = "Contact: john.smith@example.com, alt: js@work.org";
        assert_eq!(find_email(text).as_deref(), Some("john.smith@example.com"));
    }

    #[test]
    fn test_hyphens_and_subdomains() {
        assert_eq!(
            find_email("mail me at first-last@mail.uni-x.edu.").as_deref(),
            Some("first-last@mail.uni-x.edu.")
        );
    }

    #[test]
    fn test_no_email() {
        assert_eq!(find_email("John Smith\n555-1234"), None);
        assert_eq!(find_email(""), None);
    }
}
