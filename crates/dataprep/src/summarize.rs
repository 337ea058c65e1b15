/// Definition keywords that open a new block.
const DEFINITION_PREFIXES: &[&str] = &["def ", "class "];

/// Coarse line grouping: each block starts at a definition-like line and
/// swallows every following non-blank line until the next one. Lines before
/// the first definition are dropped. Blocks are space-joined, one per line.
///
/// Not a parser: a `def ` inside a string or comment still starts a block.
pub fn summarize(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if DEFINITION_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            if !current.is_empty() {
                blocks.push(current.join(" "));
            }
            current = vec![trimmed];
        } else if !trimmed.is_empty() && !current.is_empty() {
            current.push(trimmed);
        }
    }

    if !current.is_empty() {
        blocks.push(current.join(" "));
    }

    blocks.join("\n")
}
