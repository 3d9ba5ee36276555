pub mod phone;

pub use phone::{normalize_phone, parse_phone, PhoneParse, PhoneParts, EXTENSION_MARKER};
