//! JSON text layouts used on the wire.
//!
//! Response bodies use single-line JSON with `", "` and `": "` separators
//! (`{"message": "ok", "lead_id": "42"}`), which downstream consumers of the
//! webhook already parse. Stored records and notifications are pretty-printed
//! with two-space indentation.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

/// Compact single-line formatter that puts a space after `,` and `:`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn to_spaced_string(value: &impl Serialize) -> String {
    let mut buffer = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buffer, SpacedFormatter);
    if value.serialize(&mut serializer).is_err() {
        // Only reachable for maps with non-string keys, which no pipeline type has.
        return String::from("{}");
    }
    String::from_utf8(buffer).unwrap_or_default()
}

pub fn to_pretty_string(value: &impl Serialize) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn spaced_layout_separates_keys_and_values() {
        let body = to_spaced_string(&json!({"message": "done", "lead_id": "42"}));
        assert_eq!(body, "{\"message\": \"done\", \"lead_id\": \"42\"}");
    }

    #[test]
    fn spaced_layout_handles_nested_arrays_and_empty_containers() {
        let body = to_spaced_string(&json!({"ids": ["1", "2"], "lookup": {}, "tags": []}));
        assert_eq!(body, "{\"ids\": [\"1\", \"2\"], \"lookup\": {}, \"tags\": []}");
    }

    #[test]
    fn pretty_layout_uses_two_space_indent() {
        let body = to_pretty_string(&json!({"event": {"lead_id": "1"}})).expect("should serialize");
        assert_eq!(body, "{\n  \"event\": {\n    \"lead_id\": \"1\"\n  }\n}");
    }
}
