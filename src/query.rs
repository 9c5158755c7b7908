//! Query-string encoding onto a reusable buffer.
//!
//! This does roughly what `url::form_urlencoded::Serializer` does, minus the
//! percent-encoding: keys and values are written verbatim, so callers must only
//! pass values that are already safe to place in a URI.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

/// Single-valued query parameters, keyed by parameter name.
pub type QueryValues<'a> = HashMap<&'static str, Cow<'a, str>>;

/// Multi-valued query parameters. Every element is rendered as its own `&key=value`.
pub type MultiQueryValues<'a> = HashMap<&'static str, &'a [String]>;

/// Appends `&key=value` for every entry of `values` and for every element of
/// every list in `multi`.
///
/// Iteration order over each map is unspecified; a key appears at most once per
/// map so the rendered parameter set is stable.
pub fn encode_values(buf: &mut String, values: &QueryValues<'_>, multi: &MultiQueryValues<'_>) {
    for (key, value) in values {
        encode_key_value(buf, key, value);
    }

    for (key, list) in multi {
        for value in list.iter() {
            encode_key_value(buf, key, value);
        }
    }
}

fn encode_key_value(buf: &mut String, key: &str, value: &str) {
    buf.push('&');
    buf.push_str(key);
    buf.push('=');
    buf.push_str(value);
}

/// Writes a coordinate with exactly six decimals and no exponent.
pub fn write_coordinate(buf: &mut String, value: f64) {
    // Writing into a String cannot fail.
    let _ = write!(buf, "{value:.6}");
}

/// Renders a list of coordinates joined by commas, e.g. a bbox or a point.
pub fn join_coordinates(values: &[f64]) -> String {
    let mut out = String::with_capacity(values.len() * 12);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_coordinate(&mut out, *value);
    }
    out
}
