const MAX_VISIBLE_CHARS: usize = 80;

/// Renders a user-supplied file name safely for log output: control
/// characters are escaped and long names are truncated.
pub fn sanitize_file_name(name: &str) -> String {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let escaped: String = trimmed
        .chars()
        .take(MAX_VISIBLE_CHARS)
        .flat_map(|c| {
            if c.is_control() {
                c.escape_default().collect::<Vec<_>>()
            } else {
                vec![c]
            }
        })
        .collect();

    if total > MAX_VISIBLE_CHARS {
        format!("{}... ({} chars total)", escaped, total)
    } else {
        escaped
    }
}
