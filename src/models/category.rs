use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Rent,
    Entertainment,
    Shopping,
    Healthcare,
    #[default]
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Rent => "Rent",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Others => "Others",
        }
    }

    /// Lenient parse for stored rows: blank or unrecognised text falls back to `Others`.
    pub fn parse(s: &str) -> Self {
        Self::from_input(s).unwrap_or(Self::Others)
    }

    /// Strict parse for user input (case-insensitive, trimmed).
    pub fn from_input(s: &str) -> Option<Self> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Utilities,
            Self::Rent,
            Self::Entertainment,
            Self::Shopping,
            Self::Healthcare,
            Self::Others,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
