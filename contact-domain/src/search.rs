use crate::contact::Contact;

/// Case-insensitive first-name substring filter. Keeps the relative order of
/// the input and never mutates it; an empty query matches every contact, so
/// callers typically skip the call entirely when the search bar is blank.
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    let query = query.to_lowercase();
    contacts
        .iter()
        .filter(|contact| contact.first_name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
