//! Hashtag rendering.

/// Structured-field name the rendered tag string is emitted under.
pub const TAGS_KEY: &str = "hashtags";

/// Render an ordered tag list as a single string: each tag stripped of
/// interior spaces, prefixed with `#` and suffixed with one space,
/// concatenated in insertion order. An empty list renders to `""`.
pub fn render_tags(tags: &[String]) -> String {
    let mut rendered = String::new();
    for tag in tags {
        rendered.push('#');
        rendered.extend(tag.chars().filter(|c| *c != ' '));
        rendered.push(' ');
    }
    rendered
}
