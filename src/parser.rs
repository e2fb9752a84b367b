/// Characters stripped from both ends of every field.
const TRIM_CHARS: [char; 5] = [' ', '\t', '\r', '\n', '"'];

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Strips surrounding whitespace and quote characters from a raw field.
///
/// Only the ends of the field are touched; interior quotes and whitespace
/// are preserved.
pub fn trim_field(raw: &str) -> &str {
    raw.trim_matches(&TRIM_CHARS[..])
}

/// Splits a single diary line into its fields.
///
/// Every quote character flips the "inside quotes" state and is dropped
/// from the output. A delimiter inside quotes is kept as text, otherwise it
/// terminates the current field. Doubled quotes are not treated as escapes,
/// so `"a ""b"" c"` does not round-trip.
///
/// The final field is always emitted, so the result is never empty.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(trim_field(&field).to_string());
                field.clear();
            }
            _ => field.push(c),
        }
    }

    fields.push(trim_field(&field).to_string());
    fields
}

/// Converts rating text into a number, returning 0.0 for anything that is
/// not entirely a finite number.
///
/// This never fails: "unrated" and "unparsable" both read as zero.
pub fn safe_to_f64(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    match text.parse::<f64>() {
        // Normalise -0.0 so that it sorts and compares like an unrated entry.
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}
