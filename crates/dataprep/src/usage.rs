//! Placeholder call examples built from parameter names.

/// Fabricate literal arguments for a comma-separated parameter list.
///
/// Defaults (`count=5`) are used verbatim; otherwise the parameter name picks
/// the placeholder: `path`/`file` → `"example/path"`, `name` → `"example_name"`,
/// `id` → `"123"`, anything else → `"example_value"`. Checks are
/// case-sensitive substring tests applied in that order.
pub fn example_args(params: &str) -> String {
    if params.trim().is_empty() {
        return String::new();
    }

    params
        .split(',')
        .map(str::trim)
        .map(|param| match param.split_once('=') {
            Some((_, default)) => default.to_string(),
            None => placeholder_for(param).to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn placeholder_for(param: &str) -> &'static str {
    if param.contains("path") || param.contains("file") {
        "\"example/path\""
    } else if param.contains("name") {
        "\"example_name\""
    } else if param.contains("id") {
        "\"123\""
    } else {
        "\"example_value\""
    }
}

/// One `result = f(...)` line per `def` in `text`, separated by blank lines.
pub fn usage_examples(text: &str) -> String {
    let mut examples = Vec::new();

    for line in text.split('\n') {
        let Some(rest) = line.trim().strip_prefix("def ") else {
            continue;
        };
        let name = rest.split('(').next().unwrap_or_default();
        let params = line
            .split_once('(')
            .map(|(_, after)| after.split(')').next().unwrap_or_default())
            .unwrap_or_default();
        examples.push(format!("result = {name}({})", example_args(params)));
    }

    examples.join("\n\n")
}
