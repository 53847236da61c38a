//! Placement string parsing.
//!
//! Recognized forms, first match wins:
//!
//! 1. `"1st"`, `"2nd"`, `"3rd"`: exact podium positions.
//! 2. `"Did Not Qualify"`: no rank.
//! 3. A single ordinal token with the suffix English uses for that number
//!    (`"4th"`, `"11th"`, `"21st"`): exact position.
//! 4. Anything else must carry an unsigned integer as its second
//!    whitespace-separated token (`"Top 8"`, `"Group 16"`): bracket bound.
//!
//! Ranges such as `"5th-8th"` and stage names such as `"Group Stage"` are
//! rejected rather than guessed at.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EngineError, Result};
use crate::models::OrdinalPlacement;

pub const DID_NOT_QUALIFY: &str = "Did Not Qualify";

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([1-9][0-9]*)(st|nd|rd|th)$").unwrap());

/// Parse a free-form placement into a rank.
pub fn parse_placement(placement: &str) -> Result<OrdinalPlacement> {
    match placement {
        "1st" => return Ok(OrdinalPlacement::exact(1)),
        "2nd" => return Ok(OrdinalPlacement::exact(2)),
        "3rd" => return Ok(OrdinalPlacement::exact(3)),
        DID_NOT_QUALIFY => return Ok(OrdinalPlacement::not_qualified()),
        _ => {}
    }

    if let Some(caps) = ORDINAL.captures(placement) {
        let rank = parse_rank(placement, &caps[1])?;
        if &caps[2] != ordinal_suffix(rank) {
            return Err(EngineError::format(
                placement,
                format!("{} takes the suffix \"{}\"", rank, ordinal_suffix(rank)),
            ));
        }
        return Ok(OrdinalPlacement::exact(rank));
    }

    let token = placement
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| EngineError::format(placement, "expected a rank as the second word"))?;

    Ok(OrdinalPlacement::bracket(parse_rank(placement, token)?))
}

fn parse_rank(placement: &str, token: &str) -> Result<u32> {
    // `u32::from_str` would also take a leading '+'
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::format(
            placement,
            format!("{:?} is not a base-10 integer", token),
        ));
    }
    let rank: u32 = token.parse().map_err(|_| {
        EngineError::format(placement, format!("{:?} is not a base-10 integer", token))
    })?;
    if rank == 0 {
        return Err(EngineError::format(placement, "rank must be at least 1"));
    }
    Ok(rank)
}

/// English ordinal suffix for a number (1st, 2nd, 3rd, 4th, 11th, 21st).
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlacementForm;

    fn rank(s: &str) -> Option<u32> {
        parse_placement(s).unwrap().rank
    }

    #[test]
    fn test_podium_literals() {
        assert_eq!(rank("1st"), Some(1));
        assert_eq!(rank("2nd"), Some(2));
        assert_eq!(rank("3rd"), Some(3));
        assert_eq!(parse_placement("1st").unwrap().form, PlacementForm::Exact);
    }

    #[test]
    fn test_did_not_qualify() {
        let placement = parse_placement("Did Not Qualify").unwrap();
        assert_eq!(placement.rank, None);
        assert_eq!(placement.form, PlacementForm::NotQualified);
    }

    #[test]
    fn test_bracket_forms() {
        assert_eq!(rank("Top 8"), Some(8));
        assert_eq!(rank("Group 16"), Some(16));
        assert_eq!(rank("Top  32"), Some(32));
        assert_eq!(parse_placement("Top 8").unwrap().form, PlacementForm::Bracket);
    }

    #[test]
    fn test_bracket_ignores_trailing_words() {
        assert_eq!(rank("Top 16 (losers)"), Some(16));
    }

    #[test]
    fn test_single_token_ordinals() {
        assert_eq!(rank("4th"), Some(4));
        assert_eq!(rank("11th"), Some(11));
        assert_eq!(rank("12th"), Some(12));
        assert_eq!(rank("21st"), Some(21));
        assert_eq!(rank("22nd"), Some(22));
        assert_eq!(rank("113th"), Some(113));
        assert_eq!(parse_placement("4th").unwrap().form, PlacementForm::Exact);
    }

    #[test]
    fn test_wrong_ordinal_suffix_is_format_error() {
        for bad in ["4st", "11st", "2th", "23th"] {
            let err = parse_placement(bad).unwrap_err();
            assert_eq!(err.kind(), "FormatError", "{}", bad);
        }
    }

    #[test]
    fn test_unrecognized_forms_are_format_errors() {
        for bad in [
            "5th-8th",
            "Group Stage",
            "Top eight",
            "",
            "   ",
            "Winner",
            "Top -4",
            "Top 0",
            "Top +8",
            "01st",
            "02nd",
            "003rd",
            "did not qualify",
        ] {
            assert!(
                matches!(parse_placement(bad), Err(EngineError::Format { .. })),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_literals_match_general_ordinal_rule() {
        // The literal fast path must agree with the general ordinal grammar.
        for n in 1..=3 {
            let literal = format!("{}{}", n, ordinal_suffix(n));
            let caps = ORDINAL.captures(&literal).unwrap();
            assert_eq!(&caps[1], n.to_string());
            assert_eq!(parse_placement(&literal).unwrap(), OrdinalPlacement::exact(n));
        }

        // Zero-padded spellings are not the podium literals and must not parse as them.
        for padded in ["01st", "02nd", "03rd", "004th"] {
            assert!(ORDINAL.captures(padded).is_none(), "{}", padded);
            assert!(parse_placement(padded).is_err(), "{}", padded);
        }
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(101), "st");
        assert_eq!(ordinal_suffix(111), "th");
    }
}
