use core::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Weights {
    pub primary: i32,
    pub secondary: i32,
}

impl Weights {
    pub const fn new(primary: i32, secondary: i32) -> Self {
        Self { primary, secondary }
    }
}

/// Outcome of a successful table load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing was fetched: the request hit the cache or named the C locale.
    Cached,
    /// A new blob was decoded and installed. Derived state should be rebuilt.
    Loaded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Collate,
    Ctype,
    Monetary,
    Numeric,
    Time,
    Messages,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Collate,
        Category::Ctype,
        Category::Monetary,
        Category::Numeric,
        Category::Time,
        Category::Messages,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Collate => "LC_COLLATE",
            Category::Ctype => "LC_CTYPE",
            Category::Monetary => "LC_MONETARY",
            Category::Numeric => "LC_NUMERIC",
            Category::Time => "LC_TIME",
            Category::Messages => "LC_MESSAGES",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.file_name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// True for the names that select the built-in rules instead of locale data.
pub fn is_default_locale(name: &str) -> bool {
    name == "C" || name == "POSIX"
}
