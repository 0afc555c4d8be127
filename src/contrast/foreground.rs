use crate::foundation::color::Rgba8;
use std::fmt;

/// Luma threshold at or above which a background reads as light.
pub const LIGHT_THRESHOLD: f64 = 128.0;

/// Text color chosen for legibility over a background.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Foreground {
    /// Pure black, for light backgrounds.
    Black,
    /// Pure white, for dark backgrounds.
    #[default]
    White,
}

impl Foreground {
    pub fn rgba(self) -> Rgba8 {
        match self {
            Self::Black => Rgba8::BLACK,
            Self::White => Rgba8::WHITE,
        }
    }

    /// Foreground for a background with the given RGB channels.
    pub fn for_background(bg: Rgba8) -> Self {
        if yiq_luma(bg) >= LIGHT_THRESHOLD {
            Self::Black
        } else {
            Self::White
        }
    }
}

impl fmt::Display for Foreground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Black => "black",
            Self::White => "white",
        })
    }
}

/// Y component of YIQ: `(R*299 + G*587 + B*114) / 1000`, in `[0, 255]`. Alpha is ignored.
pub fn yiq_luma(c: Rgba8) -> f64 {
    let weighted = u32::from(c.r) * 299 + u32::from(c.g) * 587 + u32::from(c.b) * 114;
    f64::from(weighted) / 1000.0
}

/// Walk a background stack (nearest first) and decide on the first non-transparent entry.
///
/// Deeper entries are never inspected. `None` when every entry is transparent.
pub fn pick_foreground<I>(stack: I) -> Option<(Rgba8, Foreground)>
where
    I: IntoIterator<Item = Rgba8>,
{
    stack
        .into_iter()
        .find(|bg| !bg.is_transparent())
        .map(|bg| (bg, Foreground::for_background(bg)))
}
