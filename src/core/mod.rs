pub mod attributes;
pub mod color;
pub mod password;
pub mod score;

pub use attributes::{AnchorAttributes, parse_count, parse_int, parse_json_array};
pub use color::{Color, Palette};
pub use password::{
    MIN_PASSWORD_LENGTH, PasswordField, StrengthBucket, StrengthMeter, StrengthScore, strength,
};
pub use score::{ScoreTier, SecurityScore, score_color};
