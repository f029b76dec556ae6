//! Residue colors.
//!
//! Every amino acid gets a fixed background color grouped by chemical class
//! (Clustal-style). Anything outside the 20 canonical residues, including the
//! gap placeholder, falls back to [`DEFAULT_COLOR`].

use ratatui::style::Color;

/// Color used for gaps, unknown symbols and matching bottom residues.
pub const DEFAULT_COLOR: Color = Color::Rgb(0xFF, 0xFF, 0xFF);

const HYDROPHOBIC: Color = Color::Rgb(0x80, 0xA0, 0xF0);
const POSITIVE: Color = Color::Rgb(0xF0, 0x15, 0x05);
const NEGATIVE: Color = Color::Rgb(0xC0, 0x48, 0xC0);
const POLAR: Color = Color::Rgb(0x00, 0xFF, 0x00);
const CYSTEINE: Color = Color::Rgb(0xF0, 0x80, 0x80);
const GLYCINE: Color = Color::Rgb(0xF0, 0x90, 0x48);
const PROLINE: Color = Color::Rgb(0xFF, 0xFF, 0x00);
const AROMATIC: Color = Color::Rgb(0x15, 0xA4, 0xA4);

/// The 20 canonical amino acids and their colors.
pub const AMINO_ACID_COLORS: [(char, Color); 20] = [
    ('A', HYDROPHOBIC),
    ('R', POSITIVE),
    ('N', POLAR),
    ('D', NEGATIVE),
    ('C', CYSTEINE),
    ('Q', POLAR),
    ('E', NEGATIVE),
    ('G', GLYCINE),
    ('H', AROMATIC),
    ('I', HYDROPHOBIC),
    ('L', HYDROPHOBIC),
    ('K', POSITIVE),
    ('M', HYDROPHOBIC),
    ('F', HYDROPHOBIC),
    ('P', PROLINE),
    ('S', POLAR),
    ('T', POLAR),
    ('W', HYDROPHOBIC),
    ('Y', AROMATIC),
    ('V', HYDROPHOBIC),
];

/// Color scheme for residues.
///
/// This trait allows for different color schemes to be plugged into the
/// renderer.
pub trait ColorScheme {
    fn get_color(&self, c: char) -> Color;

    fn default_color(&self) -> Color {
        DEFAULT_COLOR
    }
}

/// Amino acid color scheme backed by [`AMINO_ACID_COLORS`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AminoAcidColorScheme;

impl ColorScheme for AminoAcidColorScheme {
    fn get_color(&self, c: char) -> Color {
        color_of(c)
    }
}

/// Returns the display color of a residue symbol, case-insensitively.
///
/// Never fails: gaps, digits and anything else unknown map to
/// [`DEFAULT_COLOR`].
pub fn color_of(symbol: char) -> Color {
    let upper = symbol.to_ascii_uppercase();
    AMINO_ACID_COLORS
        .iter()
        .find(|(residue, _)| *residue == upper)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amino_acid_colors() {
        assert_eq!(color_of('A'), HYDROPHOBIC);
        assert_eq!(color_of('R'), POSITIVE);
        assert_eq!(color_of('K'), POSITIVE);
        assert_eq!(color_of('D'), NEGATIVE);
        assert_eq!(color_of('E'), NEGATIVE);
        assert_eq!(color_of('P'), PROLINE);
    }

    #[test]
    fn test_case_insensitive() {
        for (residue, color) in AMINO_ACID_COLORS {
            assert_eq!(color_of(residue.to_ascii_lowercase()), color);
            assert_eq!(color_of(residue), color);
        }
    }

    #[test]
    fn test_unknown_symbols_use_default() {
        for c in ['-', '*', 'X', 'B', 'Z', 'x', '0', '9', '.', ' ', 'é'] {
            assert_eq!(color_of(c), DEFAULT_COLOR, "symbol {:?}", c);
        }
    }

    #[test]
    fn test_table_is_complete() {
        let residues: String = AMINO_ACID_COLORS.iter().map(|(r, _)| *r).collect();
        assert_eq!(residues, "ARNDCQEGHILKMFPSTWYV");
        assert!(AMINO_ACID_COLORS.iter().all(|(_, c)| *c != DEFAULT_COLOR));
    }

    #[test]
    fn test_scheme_delegates() {
        let scheme = AminoAcidColorScheme;
        assert_eq!(scheme.get_color('w'), color_of('W'));
        assert_eq!(scheme.default_color(), DEFAULT_COLOR);
    }
}
