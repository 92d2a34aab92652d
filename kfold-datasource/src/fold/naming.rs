//! Split identifiers and human-readable names.

use data_encoding::BASE32;
use rand::rngs::OsRng;
use rand::RngCore;

use super::partition::{FoldError, FoldResult, PercentRange};

/// Prefix shared by every generated split ID.
pub const SPLIT_ID_PREFIX: &str = "ds-";

/// Random bytes per split ID. 10 bytes encode to exactly 16 base32 chars.
pub const SPLIT_ID_BYTES: usize = 10;

/// Format the name shown for a split in the provider console.
pub fn build_descriptive_name(base_name: &str, range: PercentRange, is_complement: bool) -> String {
    format!(
        "{} [percentBegin={}, percentEnd={}, complement={}]",
        base_name, range.begin, range.end, is_complement
    )
}

/// Parts recovered from a descriptive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub base_name: String,
    pub range: PercentRange,
    pub is_complement: bool,
}

/// Recover the base name, range and complement flag from a name produced by
/// [`build_descriptive_name`].
pub fn parse_descriptive_name(name: &str) -> FoldResult<ParsedName> {
    let malformed = || FoldError::MalformedName(name.to_string());

    let body = name.strip_suffix(']').ok_or_else(malformed)?;
    let (base_name, fields) = body.rsplit_once(" [").ok_or_else(malformed)?;

    let mut parts = fields.split(", ");
    let begin = field(parts.next(), "percentBegin").ok_or_else(malformed)?;
    let end = field(parts.next(), "percentEnd").ok_or_else(malformed)?;
    let complement = field(parts.next(), "complement").ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    let begin: u32 = begin.parse().map_err(|_| malformed())?;
    let end: u32 = end.parse().map_err(|_| malformed())?;
    let is_complement: bool = complement.parse().map_err(|_| malformed())?;
    if begin >= end || end > 100 {
        return Err(malformed());
    }

    Ok(ParsedName {
        base_name: base_name.to_string(),
        range: PercentRange { begin, end },
        is_complement,
    })
}

fn field<'a>(part: Option<&'a str>, key: &str) -> Option<&'a str> {
    part?.strip_prefix(key)?.strip_prefix('=')
}

/// Generate a fresh split ID: `ds-` followed by 16 base32 characters.
///
/// Bytes come from the operating system's entropy source.
pub fn generate_split_id() -> FoldResult<String> {
    let mut bytes = [0u8; SPLIT_ID_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| FoldError::EntropySourceUnavailable(e.to_string()))?;

    Ok(format!("{}{}", SPLIT_ID_PREFIX, BASE32.encode(&bytes)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_descriptive_name_format() {
        let name = build_descriptive_name("banking", PercentRange { begin: 0, end: 25 }, true);
        assert_eq!(name, "banking [percentBegin=0, percentEnd=25, complement=true]");
    }

    #[test]
    fn test_descriptive_name_round_trip() {
        for (begin, end, complement) in [(0, 25, true), (33, 66, false), (75, 100, true)] {
            let range = PercentRange { begin, end };
            let name = build_descriptive_name("customer churn [v2]", range, complement);
            let parsed = parse_descriptive_name(&name).unwrap();

            assert_eq!(parsed.base_name, "customer churn [v2]");
            assert_eq!(parsed.range, range);
            assert_eq!(parsed.is_complement, complement);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "banking",
            "banking [percentBegin=0, percentEnd=25]",
            "banking [percentBegin=0, percentEnd=25, complement=True]",
            "banking [percentBegin=x, percentEnd=25, complement=true]",
            "banking [percentBegin=30, percentEnd=25, complement=true]",
            "banking [percentEnd=25, percentBegin=0, complement=true]",
        ] {
            assert!(
                matches!(parse_descriptive_name(bad), Err(FoldError::MalformedName(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_split_id_shape() {
        let id = generate_split_id().unwrap();
        let suffix = id.strip_prefix(SPLIT_ID_PREFIX).unwrap();

        assert_eq!(suffix.len(), 16);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[test]
    fn test_split_ids_do_not_collide() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_split_id().unwrap()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
