//! Identifier formats.
//!
//! Identifiers are zero-padded decimal sequence numbers behind a fixed prefix.
//! Existing consumers filter on these strings, so the widths never change.

/// Prefix of campaigns produced by a full run.
pub const CAMPAIGN_PREFIX: &str = "CMP-";
/// Prefix of campaigns added by the incremental append entry point.
pub const NEW_CAMPAIGN_PREFIX: &str = "CMP-NEW-";
pub const IMPRESSION_PREFIX: &str = "IMP-";
pub const CLICK_PREFIX: &str = "CLK-";
pub const CONVERSION_PREFIX: &str = "CNV-";

/// `CMP-######`
pub fn campaign_id(sequence: u64) -> String {
    format!("{CAMPAIGN_PREFIX}{sequence:06}")
}

/// `CMP-NEW-####`
pub fn new_campaign_id(sequence: u64) -> String {
    format!("{NEW_CAMPAIGN_PREFIX}{sequence:04}")
}

/// `IMP-##########`
pub fn impression_id(sequence: u64) -> String {
    format!("{IMPRESSION_PREFIX}{sequence:010}")
}

/// `CLK-##########`
pub fn click_id(sequence: u64) -> String {
    format!("{CLICK_PREFIX}{sequence:010}")
}

/// `CNV-##########`
pub fn conversion_id(sequence: u64) -> String {
    format!("{CONVERSION_PREFIX}{sequence:010}")
}

/// Extract the sequence number from an identifier with the given prefix.
///
/// Returns `None` when the prefix does not match or the remainder is not a
/// plain decimal number. Note that `CMP-NEW-0001` does not parse with
/// [`CAMPAIGN_PREFIX`], which keeps the two campaign sequences apart.
pub fn parse_sequence(id: &str, prefix: &str) -> Option<u64> {
    let digits = id.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// True for campaigns added through the append entry point.
pub fn is_appended_campaign(id: &str) -> bool {
    parse_sequence(id, NEW_CAMPAIGN_PREFIX).is_some()
}
