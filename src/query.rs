use crate::options::OptionValue;

#[cfg(test)]
#[path = "./query_test.rs"]
mod query_test;

/// Serialises normalized options into the canonical query string.
///
/// Key order is the caller's insertion order, never resorted. List values
/// expand to one `key=element` pair per element, in element order. The
/// output is the exact byte sequence that gets signed, so the remote
/// service can re-derive the same digest from the request line.
pub(crate) fn construct_query(params: &[(String, OptionValue)]) -> String {
    let guessed_length = params.len() * 20;
    let mut query = String::with_capacity(guessed_length);

    for (key, value) in params {
        match value {
            OptionValue::Str(s) => push_pair(&mut query, key, s),
            OptionValue::Int(n) => push_pair(&mut query, key, &n.to_string()),
            OptionValue::Float(n) => push_pair(&mut query, key, &n.to_string()),
            OptionValue::Bool(b) => push_pair(&mut query, key, if *b { "true" } else { "false" }),
            OptionValue::List(items) => {
                for item in items {
                    push_pair(&mut query, key, item);
                }
            }
            // absent values never survive normalization
            OptionValue::Null => {}
        }
    }

    query
}

fn push_pair(query: &mut String, key: &str, value: &str) {
    if !query.is_empty() {
        query.push('&');
    }

    encode_into(query, key);
    query.push('=');
    encode_into(query, value);
}

/// Strict RFC 3986 percent-encoding: every byte outside the unreserved set
/// is escaped, including `!`, `'`, `(`, `)`, `*` and space.
fn encode_into(buffer: &mut String, input: &str) {
    const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

    for b in input.as_bytes() {
        let b = *b;
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                buffer.push(b as char);
            }
            _ => {
                buffer.push('%');
                buffer.push(UPPER_HEX[(b >> 4) as usize] as char);
                buffer.push(UPPER_HEX[(b & 0x0f) as usize] as char);
            }
        }
    }
}
