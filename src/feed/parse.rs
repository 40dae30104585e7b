use super::{FeedDocument, FeedError};

/// Parses a feed body. Accepts plain `alt=json` output as well as the
/// `alt=json-in-script` form, where the document is wrapped in a callback
/// invocation such as `cb({...});`.
pub fn parse_feed(body: &str) -> Result<FeedDocument, FeedError> {
    let json = unwrap_callback(body.trim());
    if json.is_empty() {
        return Err(FeedError::Parse("empty response body".to_string()));
    }
    serde_json::from_str(json).map_err(|e| FeedError::Parse(e.to_string()))
}

fn unwrap_callback(body: &str) -> &str {
    if body.starts_with('{') {
        return body;
    }
    // comment prefixes such as `// API callback` precede the call
    let mut rest = body;
    while rest.starts_with("//") {
        rest = match rest.split_once('\n') {
            Some((_, tail)) => tail.trim_start(),
            None => "",
        };
    }

    match (rest.find('('), rest.rfind(')')) {
        (Some(open), Some(close)) if open < close => rest[open + 1..close].trim(),
        _ => rest,
    }
}
