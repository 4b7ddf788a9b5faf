use std::collections::HashMap;

/// `Key=Value` tokens of one `scontrol ... --oneliner` line.
///
/// Only the first '=' of a token separates key and value, so values like
/// `CfgTRES=cpu=64,mem=512G` stay intact. Tokens without '=' (words of a
/// free-text `Reason=`) are skipped. If a key repeats, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueFields<'a> {
    fields: HashMap<&'a str, &'a str>,
}

impl<'a> KeyValueFields<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut fields = HashMap::new();
        for token in line.split_ascii_whitespace() {
            if let Some((key, value)) = token.split_once('=') {
                fields.entry(key).or_insert(value);
            }
        }
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key).copied()
    }

    /// Owned copy of a value, `None` when the key is missing.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// Leading digits of a value; a missing key or a non-numeric value gives 0.
    pub fn get_count(&self, key: &str) -> i64 {
        self.get(key).map(leading_int).unwrap_or(0)
    }

    /// Comma separated value split into its items; a missing key gives an empty list.
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(value) => value.split(',').filter(|item| !item.is_empty()).map(str::to_string).collect(),
            None => Vec::new(),
        }
    }

}

/// Integer value of the leading ASCII digits of `s` (after leading whitespace), or 0.
///
/// `"12"` -> 12, `"4(S:0-1)"` -> 4, `"N/A"` -> 0.
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_ascii_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<i64>().unwrap_or(0)
}

/// Sum of counts that sticks at the `i64` bounds instead of overflowing.
pub fn saturating_sum(counts: impl IntoIterator<Item = i64>) -> i64 {
    counts.into_iter().fold(0, i64::saturating_add)
}

/// Splits a table row on runs of ASCII whitespace into at most `limit` columns.
///
/// The last column keeps the untouched remainder of the row, inner whitespace included,
/// so a free-text column at the end of a row is not fragmented.
pub fn split_columns(line: &str, limit: usize) -> Vec<&str> {
    let mut columns = Vec::new();
    let mut rest = line.trim_ascii();

    while !rest.is_empty() && limit > 0 {
        if columns.len() + 1 == limit {
            columns.push(rest);
            break;
        }
        match rest.find(|c: char| c.is_ascii_whitespace()) {
            Some(end) => {
                columns.push(&rest[..end]);
                rest = rest[end..].trim_ascii_start();
            }
            None => {
                columns.push(rest);
                break;
            }
        }
    }

    columns
}

/// Data rows of a tool's tabular output: the first line is the header and is always dropped.
pub fn table_rows(text: &str) -> impl Iterator<Item = &str> {
    text.lines().skip(1)
}
