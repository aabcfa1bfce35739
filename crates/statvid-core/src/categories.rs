//! Fixed table of video categories used to scope channel discovery.

/// A platform video category: numeric id plus display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: u32,
    pub name: &'static str,
}

pub const CATEGORIES: [Category; 11] = [
    Category { id: 1, name: "Film & Animation" },
    Category { id: 10, name: "Music" },
    Category { id: 15, name: "Pets & Animals" },
    Category { id: 17, name: "Sports" },
    Category { id: 20, name: "Gaming" },
    Category { id: 22, name: "People & Blogs" },
    Category { id: 23, name: "Comedy" },
    Category { id: 24, name: "Entertainment" },
    Category { id: 26, name: "Howto & Style" },
    Category { id: 27, name: "Education" },
    Category { id: 28, name: "Science & Technology" },
];

/// Returns the display name for a category id, or `None` if the id is not
/// part of the fixed table.
#[must_use]
pub fn category_name(id: u32) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| c.id == id).map(|c| c.name)
}

/// Looks up a category by id.
#[must_use]
pub fn category(id: u32) -> Option<Category> {
    CATEGORIES.iter().copied().find(|c| c.id == id)
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn table_has_eleven_unique_ids() {
        let ids: HashSet<u32> = CATEGORIES.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn category_name_known_and_unknown() {
        assert_eq!(category_name(20), Some("Gaming"));
        assert_eq!(category_name(17), Some("Sports"));
        assert_eq!(category_name(999), None);
    }

    #[test]
    fn display_includes_id() {
        let gaming = category(20).unwrap();
        assert_eq!(gaming.to_string(), "Gaming (20)");
    }
}
