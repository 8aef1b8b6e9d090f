use regex::Regex;

// Validate format email
pub fn is_valid_email(email: &str) -> bool {
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    email_regex.is_match(email)
}

// Validate password strength (min 6 char, ada huruf & angka)
pub fn is_strong_password(password: &str) -> bool {
    if password.len() < 6 {
        return false;
    }

    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_number = password.chars().any(|c| c.is_numeric());

    has_letter && has_number
}

// Validate username (3-50 char, alfanumerik plus underscore)
pub fn is_valid_username(username: &str) -> bool {
    (3..=50).contains(&username.len())
        && username.chars().all(|c| c.is_alphanumeric() || c == '_')
}

// Validate monetary amount (harus positif)
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name+tag@example.co.id"));
        assert!(!is_valid_email("invalid.email"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_password_strength() {
        assert!(is_strong_password("password123"));
        assert!(is_strong_password("Test12"));
        assert!(!is_strong_password("short"));
        assert!(!is_strong_password("onlyletters"));
        assert!(!is_strong_password("123456"));
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("admin_01"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("has space"));
    }

    #[test]
    fn test_amount_validation() {
        assert!(is_valid_amount(100.0));
        assert!(is_valid_amount(0.01));
        assert!(!is_valid_amount(0.0));
        assert!(!is_valid_amount(-5.0));
        assert!(!is_valid_amount(f64::NAN));
    }
}
