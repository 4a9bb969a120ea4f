use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    Pothole,
    Streetlight,
    WaterLeak,
    Garbage,
    Noise,
    Electrical,
    Other,
}

impl IssueCategory {
    /// Detection order: the first category with a matching keyword wins.
    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::Pothole,
        IssueCategory::Streetlight,
        IssueCategory::WaterLeak,
        IssueCategory::Garbage,
        IssueCategory::Noise,
        IssueCategory::Electrical,
        IssueCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Pothole => "pothole",
            IssueCategory::Streetlight => "streetlight",
            IssueCategory::WaterLeak => "water leak",
            IssueCategory::Garbage => "garbage",
            IssueCategory::Noise => "noise",
            IssueCategory::Electrical => "electrical",
            IssueCategory::Other => "other",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            IssueCategory::Pothole => &["pothole", "road damage", "crater", "hole in road"],
            IssueCategory::Streetlight => &[
                "streetlight",
                "street light",
                "lamp",
                "lighting",
                "light not working",
            ],
            IssueCategory::WaterLeak => &["water leak", "pipe burst", "water", "plumbing"],
            IssueCategory::Garbage => &["garbage", "trash", "waste", "litter"],
            IssueCategory::Noise => &["noise", "loud", "sound", "disturbance"],
            IssueCategory::Electrical => &["power", "electricity", "electrical", "wire"],
            IssueCategory::Other => &[],
        }
    }

    /// Keyword match over free text. Substring based, so it is a guess, not a parse.
    pub fn detect(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| {
                category
                    .keywords()
                    .iter()
                    .any(|keyword| lowered.contains(keyword))
            })
            .unwrap_or(IssueCategory::Other)
    }
}

impl FromStr for IssueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid issue category: {}", s))
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
