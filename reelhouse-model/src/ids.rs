/// Strongly typed identifier for a catalog entry.
///
/// Identifiers come from static content configuration, so they are small
/// integers rather than generated uuids. Uniqueness is enforced per catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MediaItemId(pub u32);

impl MediaItemId {
    pub const fn new(raw: u32) -> Self {
        MediaItemId(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for MediaItemId {
    fn from(raw: u32) -> Self {
        MediaItemId(raw)
    }
}

impl std::fmt::Display for MediaItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
