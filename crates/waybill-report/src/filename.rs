use std::collections::HashSet;

/// Stem used when a group value leaves nothing after sanitizing.
pub const UNNAMED_PREFIX: &str = "未命名区域";

/// Keep alphanumerics (any script), spaces, underscores and hyphens, then
/// trim trailing whitespace.
pub fn sanitize_file_stem(value: &str) -> String {
    let kept: String = value
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    kept.trim_end().to_string()
}

/// Hands out `.xlsx` entry names that are safe and unique within one archive.
#[derive(Debug, Default)]
pub struct EntryNamer {
    used: HashSet<String>,
}

impl EntryNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for the group at 1-based `position` whose key renders as
    /// `key_text`. A stem already taken gets `_<position>` appended until it
    /// is free.
    pub fn entry_name(&mut self, key_text: &str, position: usize) -> String {
        let mut stem = sanitize_file_stem(key_text);
        if stem.is_empty() {
            stem = format!("{UNNAMED_PREFIX}_{position}");
        }
        while self.used.contains(&stem) {
            stem.push_str(&format!("_{position}"));
        }
        self.used.insert(stem.clone());
        format!("{stem}.xlsx")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_path_and_punctuation() {
        assert_eq!(sanitize_file_stem("华东/一区"), "华东一区");
        assert_eq!(sanitize_file_stem("../etc"), "etc");
        assert_eq!(sanitize_file_stem("North East-2_b"), "North East-2_b");
        assert_eq!(sanitize_file_stem("  lead "), "  lead");
        assert_eq!(sanitize_file_stem("12.5"), "125");
    }

    #[test]
    fn empty_stems_fall_back_to_position() {
        let mut namer = EntryNamer::new();
        assert_eq!(namer.entry_name("///", 3), "未命名区域_3.xlsx");
        assert_eq!(namer.entry_name("", 4), "未命名区域_4.xlsx");
    }

    #[test]
    fn collisions_get_a_position_suffix() {
        let mut namer = EntryNamer::new();
        assert_eq!(namer.entry_name("A", 1), "A.xlsx");
        assert_eq!(namer.entry_name("A/", 2), "A_2.xlsx");
        assert_eq!(namer.entry_name("A_2", 3), "A_2_3.xlsx");
    }
}
