// Source kind value object

/// Which scanner owns a file sync ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Advancements,
    Stats,
    PlayerData,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Advancements => "advancements",
            // versioned so rows from the old flat layout get rebuilt
            SourceKind::Stats => "stats_v2",
            SourceKind::PlayerData => "playerdata",
        }
    }
}
