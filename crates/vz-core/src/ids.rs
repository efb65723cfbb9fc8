use uuid::Uuid;

/// Symbols used for generated identifiers.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random part of uploaded file names.
pub const DEFAULT_ID_LEN: usize = 21;

/// Length of the random part of downloaded file names.
pub const DOWNLOAD_ID_LEN: usize = 8;

// Largest multiple of the alphabet size that fits in a byte.
const REJECT_AT: u8 = (256 - 256 % ALPHABET.len()) as u8;

/// Random alphanumeric identifier of `len` characters.
///
/// Randomness comes from v4 UUIDs. The version and variant bytes carry fixed
/// bits and are skipped; the remaining bytes are rejection-sampled so every
/// symbol of [`ALPHABET`] is equally likely.
pub fn nano_id(len: usize) -> String {
    let mut id = String::with_capacity(len);

    while id.len() < len {
        let bytes = Uuid::new_v4().into_bytes();
        for (idx, byte) in bytes.into_iter().enumerate() {
            if idx == 6 || idx == 8 || byte >= REJECT_AT {
                continue;
            }
            id.push(ALPHABET[byte as usize % ALPHABET.len()] as char);
            if id.len() == len {
                break;
            }
        }
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        assert_eq!(nano_id(DEFAULT_ID_LEN).len(), 21);
        assert_eq!(nano_id(DOWNLOAD_ID_LEN).len(), 8);
        assert!(nano_id(0).is_empty());
    }

    #[test]
    fn test_alphanumeric_only() {
        let id = nano_id(500);
        assert!(id.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_ids_differ() {
        assert_ne!(nano_id(DEFAULT_ID_LEN), nano_id(DEFAULT_ID_LEN));
    }

    #[test]
    fn test_reject_threshold() {
        assert_eq!(REJECT_AT, 248);
    }
}
