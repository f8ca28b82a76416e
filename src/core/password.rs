use serde::{Deserialize, Serialize};

/// Count of satisfied password predicates, always in `0..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MAX: u8 = 5;

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Minimum length (in characters) that earns the length point.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Sums five independent predicates over `password`.
///
/// Character classes are ASCII: a non-ASCII letter counts as "special".
#[must_use]
pub fn strength(password: &str) -> StrengthScore {
    let checks = [
        password.chars().count() >= MIN_PASSWORD_LENGTH,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    // At most five trues.
    StrengthScore(checks.iter().filter(|&&passed| passed).count() as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthBucket {
    Empty,
    Weak,
    Medium,
    Strong,
}

impl StrengthBucket {
    /// Non-uniform mapping: 0, 1-2, 3-4, 5.
    #[must_use]
    pub fn for_score(score: StrengthScore) -> Self {
        match score.value() {
            0 => Self::Empty,
            1..=2 => Self::Weak,
            3..=4 => Self::Medium,
            _ => Self::Strong,
        }
    }
}

/// Visual state of a `.password-strength` meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthMeter {
    pub bucket: StrengthBucket,
    pub css_class: &'static str,
    pub width_percent: u8,
}

impl StrengthMeter {
    pub const BASE_CLASS: &'static str = "password-strength";

    #[must_use]
    pub fn for_score(score: StrengthScore) -> Self {
        let bucket = StrengthBucket::for_score(score);
        let (css_class, width_percent) = match bucket {
            StrengthBucket::Empty => ("bg-secondary", 0),
            StrengthBucket::Weak => ("bg-danger", 33),
            StrengthBucket::Medium => ("bg-warning", 66),
            StrengthBucket::Strong => ("bg-success", 100),
        };
        Self {
            bucket,
            css_class,
            width_percent,
        }
    }

    #[must_use]
    pub fn for_password(password: &str) -> Self {
        Self::for_score(strength(password))
    }

    /// Full class attribute after the meter is reset and re-tagged.
    #[must_use]
    pub fn class_attribute(&self) -> String {
        format!("{} {}", Self::BASE_CLASS, self.css_class)
    }

    #[must_use]
    pub fn width_style(&self) -> String {
        format!("{}%", self.width_percent)
    }
}

/// A password input, and whether a strength meter sits next to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordField {
    has_meter: bool,
}

impl PasswordField {
    #[must_use]
    pub fn new(has_meter: bool) -> Self {
        Self { has_meter }
    }

    /// Handles one input event. Returns the meter state to paint, or `None`
    /// when the field has no meter to update.
    #[must_use]
    pub fn on_input(&self, value: &str) -> Option<StrengthMeter> {
        self.has_meter.then(|| StrengthMeter::for_password(value))
    }
}
