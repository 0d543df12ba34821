//! Generation of replacement identifiers

use uuid::Uuid;

use super::id_format::{classify, FormatDescriptor};
use super::storage::TelemetryField;

const STANDARD_SEGMENTS: [usize; 5] = [8, 4, 4, 4, 12];

/// Generate a random identifier with the given shape
pub fn generate(descriptor: &FormatDescriptor) -> String {
    generate_with(descriptor, Uuid::new_v4)
}

/// Generate an identifier, drawing randomness from `next_uuid`
pub fn generate_with<F>(descriptor: &FormatDescriptor, mut next_uuid: F) -> String
where
    F: FnMut() -> Uuid,
{
    match *descriptor {
        FormatDescriptor::Unknown => next_uuid().hyphenated().to_string(),

        FormatDescriptor::Uuid {
            segment_lengths,
            case,
        } => {
            if segment_lengths == STANDARD_SEGMENTS {
                return case.apply(&next_uuid().hyphenated().to_string());
            }

            let total = segment_lengths.iter().sum();
            let digits = random_hex(total, &mut next_uuid);
            let mut segments = Vec::with_capacity(5);
            let mut start = 0;
            for len in segment_lengths {
                segments.push(&digits[start..start + len]);
                start += len;
            }
            case.apply(&segments.join("-"))
        }

        FormatDescriptor::Hex { length, case } => case.apply(&random_hex(length, &mut next_uuid)),
    }
}

/// Produce a replacement for a stored field value
///
/// `sqmId` keeps its surrounding braces.
pub fn regenerate(field: TelemetryField, current: &str) -> String {
    let id = generate(&classify(current));
    if field.is_braced() {
        format!("{{{}}}", id)
    } else {
        id
    }
}

/// Concatenate undashed UUID digests until `length` hex digits are available
fn random_hex<F>(length: usize, next_uuid: &mut F) -> String
where
    F: FnMut() -> Uuid,
{
    let mut hex = String::with_capacity(length + 32);
    while hex.len() < length {
        hex.push_str(&next_uuid().simple().to_string());
    }
    hex.truncate(length);
    hex
}
