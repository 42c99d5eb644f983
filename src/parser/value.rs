use crate::models::report::Field;

/// Lowercase an attribute name and turn spaces into underscores.
/// "Data Units Read" → "data_units_read". Everything else is kept as is.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

/// Split an attribute value into raw text, leading integer and unit.
///
/// `"1,234,567 [632 GB]"` → value 1234567, unit "632 GB" (bracket wins).
/// `"42 Celsius"`         → value 42, unit "Celsius".
/// `"0x00"`, `"Unknown"`  → raw only.
pub fn decompose(val: &str) -> Field {
    let mut field = Field::raw_only(val);

    match bracket_contents(val) {
        Some(inner) => {
            field.value = leading_integer(val).map(|(n, _)| n);
            field.unit  = non_empty(inner);
        }
        None => {
            if let Some((n, rest)) = leading_integer(val) {
                field.value = Some(n);
                field.unit  = non_empty(unit_token(rest));
            }
        }
    }
    field
}

/// Text between the first `[` and the next `]`, if both exist.
fn bracket_contents(val: &str) -> Option<&str> {
    let open  = val.find('[')?;
    let after = &val[open + 1..];
    let close = after.find(']')?;
    Some(after[..close].trim())
}

/// Parse `[-+]?digit[digit,]*` anchored at the first non-space character.
/// Returns the number and the text following it.
///
/// Hex literals (`0x..`) and fractions (`1.5`) are not decimal integers and
/// yield `None`, as does anything that overflows `i64`.
fn leading_integer(val: &str) -> Option<(i64, &str)> {
    let s = val.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let digits_start = end;
    if !bytes.get(end).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    while bytes.get(end).is_some_and(|b| b.is_ascii_digit() || *b == b',') {
        end += 1;
    }

    let token = &s[digits_start..end];
    let rest  = &s[end..];

    if token == "0" && (rest.starts_with('x') || rest.starts_with('X')) {
        return None;
    }
    let mut tail = rest.chars();
    if tail.next() == Some('.') && tail.next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }

    let cleaned: String = s[..end].chars().filter(|&c| c != ',').collect();
    let n = cleaned.parse::<i64>().ok()?;
    Some((n, rest))
}

/// Alphabetic / `%` / `.` run after the number, skipping one run of spaces.
fn unit_token(rest: &str) -> &str {
    let s = rest.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '%' || c == '.'))
        .unwrap_or(s.len());
    &s[..end]
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
