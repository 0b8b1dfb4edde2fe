//! Line-oriented table scripts.
//!
//! ```text
//! # comment
//! put 6 A
//! put null some value
//! get 6
//! remove 6
//! size
//! empty
//! show
//! ```
//!
//! Keys are integers or `null`. A value is the remainder of the line, with
//! `null` standing for the null value.

use ht_table::render::NULL;

use crate::error::{Error, Result};

pub(crate) type Key = Option<i64>;
pub(crate) type Value = Option<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Put(Key, Value),
    Get(Key),
    Remove(Key),
    Size,
    Empty,
    Show,
}

/// Parse a whole script, skipping blank lines and `#` comments.
pub(crate) fn parse(source: &str) -> Result<Vec<Command>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| parse_line(i + 1, line).transpose())
        .collect()
}

fn parse_line(line: usize, text: &str) -> Result<Option<Command>> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let error = |message: String| Error::Script { line, message };

    let (op, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    let rest = rest.trim_start();

    let command = match op {
        "put" => {
            let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let value = value.trim();
            if value.is_empty() {
                return Err(error("`put` needs a key and a value".to_owned()));
            }

            Command::Put(parse_key(key).map_err(error)?, parse_value(value))
        }
        "get" => Command::Get(parse_key(rest).map_err(error)?),
        "remove" => Command::Remove(parse_key(rest).map_err(error)?),
        "size" if rest.is_empty() => Command::Size,
        "empty" if rest.is_empty() => Command::Empty,
        "show" if rest.is_empty() => Command::Show,
        "size" | "empty" | "show" => return Err(error(format!("`{op}` takes no arguments"))),
        _ => return Err(error(format!("unknown command `{op}`"))),
    };

    Ok(Some(command))
}

fn parse_key(text: &str) -> std::result::Result<Key, String> {
    match text {
        "" => Err("missing key".to_owned()),
        NULL => Ok(None),
        _ => text
            .parse()
            .map(Some)
            .map_err(|_| format!("key must be an integer or `{NULL}`, got `{text}`")),
    }
}

fn parse_value(text: &str) -> Value {
    (text != NULL).then(|| text.to_owned())
}
