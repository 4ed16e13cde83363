use serde::{Serialize, Serializer};
use std::fmt;

/// Audience rating vocabulary shown in the snapshot view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RatingCategory {
    G,
    PG,
    PG13,
    R,
    NC17,
    #[default]
    AllAges,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 6] = [
        RatingCategory::G,
        RatingCategory::PG,
        RatingCategory::PG13,
        RatingCategory::R,
        RatingCategory::NC17,
        RatingCategory::AllAges,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingCategory::G => "G",
            RatingCategory::PG => "PG",
            RatingCategory::PG13 => "PG13",
            RatingCategory::R => "R",
            RatingCategory::NC17 => "NC17",
            RatingCategory::AllAges => "All Ages",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RatingCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
