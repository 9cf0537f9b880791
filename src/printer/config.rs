//! # Printer Profiles
//!
//! Hardware characteristics the print session needs to validate requests:
//! printable width and the character code tables the firmware ships with.
//!
//! | Profile | Width (dots) | Code tables |
//! |---------|--------------|-------------|
//! | default | 576 | any |
//! | simple | 576 | 0 |
//! | TM-T20 | 576 | 0-5, 16-19 |
//! | SP-POS88V | 576 | 0-5, 255 |
//!
//! ## Usage
//!
//! ```
//! use thermals::printer::PrinterProfile;
//!
//! let profile = PrinterProfile::by_name("tm-t20").unwrap();
//! assert!(profile.supports_table(16));
//! assert!(!profile.supports_table(6));
//! ```

/// Which `ESC t` code tables a printer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterTables {
    /// No restriction known; every table number is passed through
    Any,
    /// Exactly these table numbers
    Only(&'static [u8]),
}

/// # Printer Profile
///
/// - **name**: Model name, also used for lookup
/// - **width_dots**: Maximum printable width in dots
/// - **character_tables**: Code tables the firmware supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterProfile {
    pub name: &'static str,
    pub width_dots: u16,
    pub character_tables: CharacterTables,
}

impl PrinterProfile {
    /// Generic 80mm ESC/POS printer, nothing restricted.
    pub const DEFAULT: Self = Self {
        name: "default",
        width_dots: 576,
        character_tables: CharacterTables::Any,
    };

    /// Minimal printer with only the PC437 table.
    pub const SIMPLE: Self = Self {
        name: "simple",
        width_dots: 576,
        character_tables: CharacterTables::Only(&[0]),
    };

    /// Epson TM-T20.
    pub const TM_T20: Self = Self {
        name: "TM-T20",
        width_dots: 576,
        character_tables: CharacterTables::Only(&[0, 1, 2, 3, 4, 5, 16, 17, 18, 19]),
    };

    /// SP-POS88V, GB18030 firmware. Table 255 is the user page.
    pub const SP_POS88V: Self = Self {
        name: "SP-POS88V",
        width_dots: 576,
        character_tables: CharacterTables::Only(&[0, 1, 2, 3, 4, 5, 255]),
    };

    /// All built-in profiles.
    pub const BUILT_IN: &'static [Self] = &[
        Self::DEFAULT,
        Self::SIMPLE,
        Self::TM_T20,
        Self::SP_POS88V,
    ];

    /// Find a built-in profile by name, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::BUILT_IN
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Does the firmware accept `ESC t table`?
    pub fn supports_table(&self, table: u8) -> bool {
        match self.character_tables {
            CharacterTables::Any => true,
            CharacterTables::Only(tables) => tables.contains(&table),
        }
    }
}

impl Default for PrinterProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_every_table() {
        let profile = PrinterProfile::default();
        assert_eq!(profile.name, "default");
        assert!((0..=255u8).all(|t| profile.supports_table(t)));
    }

    #[test]
    fn test_simple_only_table_zero() {
        assert!(PrinterProfile::SIMPLE.supports_table(0));
        assert!(!PrinterProfile::SIMPLE.supports_table(1));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(PrinterProfile::by_name("sp-pos88v"), Some(PrinterProfile::SP_POS88V));
        assert_eq!(PrinterProfile::by_name("TM-T20"), Some(PrinterProfile::TM_T20));
        assert_eq!(PrinterProfile::by_name("tsp650"), None);
    }

    #[test]
    fn test_built_in_widths() {
        assert!(PrinterProfile::BUILT_IN.iter().all(|p| p.width_dots == 576));
        assert_eq!(PrinterProfile::BUILT_IN.len(), 4);
    }
}
