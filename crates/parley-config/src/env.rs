use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*(?P<key>[A-Za-z0-9_.]+)\s*(?:\|\s*default\("(?P<default>[^"]*)"\)\s*)?\}\}"#)
            .expect("placeholder regex must compile")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// Comment lines are copied through untouched so that commented-out
/// settings never require their variables to exist.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in placeholder().captures_iter(line) {
            let Some(whole) = captures.get(0) else { continue };
            output.push_str(&line[last_end..whole.start()]);
            output.push_str(&resolve(&captures)?);
            last_end = whole.end();
        }
        output.push_str(&line[last_end..]);
    }

    Ok(output)
}

fn resolve(captures: &Captures<'_>) -> Result<String, String> {
    let key = &captures["key"];

    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), captures.name("default")) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}
