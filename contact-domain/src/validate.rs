//! Syntactic checks for contact form fields. Pure functions; callers decide
//! whether a blank optional field skips validation entirely.

fn is_local_part_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-')
}

/// An email is accepted iff it has the shape `local@domain.tld`, where the
/// local part is one or more of `[A-Za-z0-9._%+-]`, the domain is one or more
/// of `[A-Za-z0-9.-]` and the top-level segment is at least two letters.
/// Consecutive dots are rejected anywhere in the address.
pub fn is_valid_email(email: &str) -> bool {
    if email.contains("..") {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !local.chars().all(is_local_part_char) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty() || !host.chars().all(is_domain_char) {
        return false;
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// A phone number is exactly 6 to 14 ASCII digits, with no separators,
/// spaces or leading `+`.
pub fn is_valid_phone(phone: &str) -> bool {
    (6..=14).contains(&phone.len()) && phone.chars().all(|c| c.is_ascii_digit())
}
