//! Shape detection for telemetry identifiers
//!
//! Cursor stores its IDs either as dashed UUIDs (`devDeviceId`, `sqmId`) or
//! as long hex digests (`machineId`, `macMachineId`). A replacement must look
//! like the value it replaces, so we record the shape before regenerating.

use serde::Serialize;

/// Marker used for fields missing from storage.json
pub const NOT_AVAILABLE: &str = "N/A";

/// Letter case of the hex digits in an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterCase {
    Lower,
    Upper,
}

impl LetterCase {
    /// Uppercase if any uppercase letter appears, lowercase otherwise
    pub fn of(s: &str) -> Self {
        if s.chars().any(|c| c.is_uppercase()) {
            LetterCase::Upper
        } else {
            LetterCase::Lower
        }
    }

    pub fn apply(self, s: &str) -> String {
        match self {
            LetterCase::Lower => s.to_lowercase(),
            LetterCase::Upper => s.to_uppercase(),
        }
    }
}

/// Inferred shape of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormatDescriptor {
    /// Five dash-separated groups
    Uuid {
        segment_lengths: [usize; 5],
        case: LetterCase,
    },
    /// Hex digits only
    Hex { length: usize, case: LetterCase },
    Unknown,
}

/// Classify an identifier string
///
/// Enclosing braces are ignored, so `{0F3C...}` classifies like `0F3C...`.
///
/// # Example
/// ```
/// use cursor_id_reset::cursor::id_format::{classify, FormatDescriptor, LetterCase};
///
/// assert_eq!(
///     classify("ABCDEF0123456789"),
///     FormatDescriptor::Hex { length: 16, case: LetterCase::Upper }
/// );
/// ```
pub fn classify(raw: &str) -> FormatDescriptor {
    if raw.is_empty() || raw == NOT_AVAILABLE {
        return FormatDescriptor::Unknown;
    }

    let id = strip_braces(raw);

    if id.contains('-') {
        let parts: Vec<&str> = id.split('-').collect();
        if let [a, b, c, d, e] = parts.as_slice() {
            let chars = |s: &str| s.chars().count();
            return FormatDescriptor::Uuid {
                segment_lengths: [chars(a), chars(b), chars(c), chars(d), chars(e)],
                case: LetterCase::of(id),
            };
        }
    }

    if !id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit()) {
        return FormatDescriptor::Hex {
            length: id.chars().count(),
            case: LetterCase::of(id),
        };
    }

    FormatDescriptor::Unknown
}

/// Remove `{` and `}` from both ends
pub fn strip_braces(raw: &str) -> &str {
    raw.trim_matches(|c| c == '{' || c == '}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_uuid() {
        assert_eq!(
            classify("a1b2c3d4-e5f6-47a8-9b2c-d3e4f5a6b7c8"),
            FormatDescriptor::Uuid {
                segment_lengths: [8, 4, 4, 4, 12],
                case: LetterCase::Lower,
            }
        );
    }

    #[test]
    fn test_braced_uppercase_uuid() {
        // sqmId is stored as {XXXXXXXX-...}
        assert_eq!(
            classify("{A1B2C3D4-E5F6-47A8-9B2C-D3E4F5A6B7C8}"),
            FormatDescriptor::Uuid {
                segment_lengths: [8, 4, 4, 4, 12],
                case: LetterCase::Upper,
            }
        );
    }

    #[test]
    fn test_uppercase_hex() {
        assert_eq!(
            classify("ABCDEF0123456789"),
            FormatDescriptor::Hex {
                length: 16,
                case: LetterCase::Upper,
            }
        );
    }

    #[test]
    fn test_sha256_style_hex() {
        let machine_id = "4f0e1d6cbb1f2a7a3a9a8c1de0f2b7d5a6e3c4b2a1f0e9d8c7b6a5f4e3d2c1b0";
        assert_eq!(
            classify(machine_id),
            FormatDescriptor::Hex {
                length: 64,
                case: LetterCase::Lower,
            }
        );
    }

    #[test]
    fn test_digits_only_is_lower() {
        assert_eq!(
            classify("0123456789"),
            FormatDescriptor::Hex {
                length: 10,
                case: LetterCase::Lower,
            }
        );
    }

    #[test]
    fn test_unknown_shapes() {
        assert_eq!(classify(""), FormatDescriptor::Unknown);
        assert_eq!(classify(NOT_AVAILABLE), FormatDescriptor::Unknown);
        assert_eq!(classify("{}"), FormatDescriptor::Unknown);
        assert_eq!(classify("not-a-hex-value"), FormatDescriptor::Unknown);
        assert_eq!(classify("xyz123"), FormatDescriptor::Unknown);
        // Dashes but only four groups, and not pure hex either
        assert_eq!(classify("aaaa-bbbb-cccc-dddd"), FormatDescriptor::Unknown);
    }

    #[test]
    fn test_non_standard_segment_lengths() {
        assert_eq!(
            classify("ab-cd-ef-01-23"),
            FormatDescriptor::Uuid {
                segment_lengths: [2, 2, 2, 2, 2],
                case: LetterCase::Lower,
            }
        );
    }

    #[test]
    fn test_segment_lengths_count_characters() {
        let cases = [
            ("é-ab-cd-ef-01", [1, 2, 2, 2, 2]),
            ("ab-ü-cd-ef-01", [2, 1, 2, 2, 2]),
            ("日本-a-b-c-d", [2, 1, 1, 1, 1]),
        ];
        for (input, lengths) in cases {
            match classify(input) {
                FormatDescriptor::Uuid {
                    segment_lengths, ..
                } => assert_eq!(segment_lengths, lengths, "{}", input),
                other => panic!("{} classified as {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_letter_case_apply() {
        assert_eq!(LetterCase::Upper.apply("ab-12"), "AB-12");
        assert_eq!(LetterCase::Lower.apply("AB-12"), "ab-12");
    }
}
