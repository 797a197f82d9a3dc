/// Random token identifying one claim of a surface id.
///
/// Two participants racing for the same id write different tokens under the
/// same key; whoever reads back a foreign token has lost the claim.
pub fn new_claim_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Short hex id, handy for naming store handles in logs.
pub fn new_short_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_token_is_valid_uuid() {
        let token = new_claim_token();
        let parsed = uuid::Uuid::parse_str(&token);
        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn claim_tokens_are_unique() {
        assert_ne!(new_claim_token(), new_claim_token());
    }

    #[test]
    fn short_id_is_eight_hex_chars() {
        let id = new_short_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
