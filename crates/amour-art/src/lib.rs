//! Text art for the amour greeting: roses in bud and bloom, the rose
//! garland along the bottom edge, and the heart glyphs floating in the
//! letter.

/// Width in columns of every rose frame.
pub const ROSE_WIDTH: u16 = 11;

/// Height in rows of every rose frame.
pub const ROSE_HEIGHT: u16 = 8;

/// Closed rose head (4 rows, 11 wide).
const BUD_PETALS: [&str; 4] = [
    "           ",
    "           ",
    "     ,     ",
    "    (@)    ",
];

/// Open rose head (4 rows, 11 wide).
const BLOOM_PETALS: [&str; 4] = [
    "   .-~-.   ",
    "  ( @@@ )  ",
    " (  @@@  ) ",
    "  '-._.-'  ",
];

/// Stem and leaves, shared by both stages (4 rows, 11 wide).
const STEM: [&str; 4] = [
    "     |     ",
    "  \\  |     ",
    "   \\ |  _  ",
    "     |/    ",
];

/// Repeating unit of the bottom garland when closed.
const GARLAND_BUD: &str = " ,-'--  ~ ";

/// Repeating unit of the bottom garland when open.
const GARLAND_BLOOM: &str = "@}-,-'-- ~";

/// Growth stage of a rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoseStage {
    #[default]
    Bud,
    Bloom,
}

/// A rose split into head and stem so each can be tinted separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoseArt {
    pub petals: Vec<String>,
    pub stem: Vec<String>,
}

/// Rose art for `stage`, optionally mirrored left-to-right.
pub fn rose(stage: RoseStage, mirrored: bool) -> RoseArt {
    let petals = match stage {
        RoseStage::Bud => &BUD_PETALS,
        RoseStage::Bloom => &BLOOM_PETALS,
    };
    let render = |line: &&str| {
        if mirrored {
            mirror(line)
        } else {
            line.to_string()
        }
    };
    RoseArt {
        petals: petals.iter().map(render).collect(),
        stem: STEM.iter().map(render).collect(),
    }
}

/// One line of garland exactly `width` columns wide.
pub fn garland(width: usize, stage: RoseStage) -> String {
    let unit = match stage {
        RoseStage::Bud => GARLAND_BUD,
        RoseStage::Bloom => GARLAND_BLOOM,
    };
    unit.chars().cycle().take(width).collect()
}

/// Heart glyph for a decorative heart drawn at `scale`.
pub fn heart_glyph(scale: f32) -> char {
    if scale >= 1.05 { '❤' } else { '♥' }
}

/// Reverse a line of art and swap direction-sensitive characters.
fn mirror(line: &str) -> String {
    line.chars()
        .rev()
        .map(|ch| match ch {
            '(' => ')',
            ')' => '(',
            '/' => '\\',
            '\\' => '/',
            '{' => '}',
            '}' => '{',
            '<' => '>',
            '>' => '<',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rose_frames_share_dimensions() {
        for stage in [RoseStage::Bud, RoseStage::Bloom] {
            for mirrored in [false, true] {
                let art = rose(stage, mirrored);
                assert_eq!((art.petals.len() + art.stem.len()) as u16, ROSE_HEIGHT);
                for line in art.petals.iter().chain(&art.stem) {
                    assert_eq!(line.chars().count() as u16, ROSE_WIDTH);
                }
            }
        }
    }

    #[test]
    fn test_mirror_swaps_slashes() {
        assert_eq!(mirror("  \\  |"), "|  /  ");
        assert_eq!(mirror("( @"), "@ )");
    }

    #[test]
    fn test_garland_fills_width() {
        assert_eq!(garland(37, RoseStage::Bloom).chars().count(), 37);
        assert!(garland(20, RoseStage::Bloom).starts_with("@}-"));
        assert_eq!(garland(0, RoseStage::Bud), "");
    }

    #[test]
    fn test_heart_glyph_by_scale() {
        assert_eq!(heart_glyph(0.8), '♥');
        assert_eq!(heart_glyph(1.2), '❤');
    }
}
