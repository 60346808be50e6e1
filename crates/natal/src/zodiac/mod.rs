pub mod meanings;
pub mod signs;

pub use meanings::house_meaning;
pub use signs::{degree_in_sign, sign_of, Locale, ZodiacSign, SIGN_WIDTH_DEG};
