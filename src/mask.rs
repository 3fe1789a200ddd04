/// Replaces every character except the last `visible_count` with
/// `mask_char`. Inputs no longer than the visible suffix are returned
/// unchanged. Operates on characters, not bytes, so formatted values with
/// non-ASCII content stay well-formed.
pub fn mask_all_but_last(input: &str, visible_count: usize, mask_char: char) -> String {
    let char_count = input.chars().count();
    if char_count <= visible_count {
        return input.to_string();
    }

    let suffix_start = input
        .char_indices()
        .nth(char_count - visible_count)
        .map(|(byte_index, _)| byte_index)
        .unwrap_or(input.len());

    let mut masked = String::from(mask_char).repeat(char_count - visible_count);
    masked.push_str(&input[suffix_start..]);
    masked
}
