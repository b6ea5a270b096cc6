use std::fmt::Display;
use std::fmt::Formatter;

/// Orientation of a showcase video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MediaKind {
    /// Portrait clips (reels, shorts). Carousel and CGI cards use these.
    #[default]
    Vertical,
    /// Landscape clips shown in the featured grid.
    Horizontal,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Vertical => "vertical",
            MediaKind::Horizontal => "horizontal",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MediaKind {
    type Err = crate::ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(MediaKind::Vertical),
            "horizontal" => Ok(MediaKind::Horizontal),
            other => Err(crate::ModelError::InvalidMedia(format!(
                "unknown media kind `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" Vertical ".parse::<MediaKind>(), Ok(MediaKind::Vertical));
        let kind = "HORIZONTAL".parse::<MediaKind>();
        assert_eq!(kind, Ok(MediaKind::Horizontal));
        assert!("square".parse::<MediaKind>().is_err());
    }
}
