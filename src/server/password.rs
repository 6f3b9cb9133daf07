/// Password strength rule for newly registered players: at least one
/// lowercase letter, one uppercase letter, one digit and one other character.
pub fn verify_password(password: &str) -> bool {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());
    has_lower && has_upper && has_digit && has_symbol
}
