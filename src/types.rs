//! Type definitions for the show-browser application.
//!
//! Core records for shows and episodes as the rest of the crate sees them.
//! Wire formats live in [`crate::api`]; these types are already normalized.

use crate::error::{AppError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|br|div|li|ul|ol|h[1-6]|blockquote|tr|td)\b[^>]*>").unwrap()
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Catalog-assigned show identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShowId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(ShowId)
            .map_err(|_| AppError::InvalidInput(format!("'{}' is not a show id", s)))
    }
}

/// A television series record.
#[derive(Clone, Debug, PartialEq)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    /// Summary markup, kept verbatim.
    pub summary: Option<String>,
    pub genres: Vec<String>,
    pub status: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Average rating.
    pub rating: Option<f64>,
    /// Image URL.
    pub image: Option<String>,
}

impl Show {
    /// Image URL, or `placeholder` when the catalog has none.
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image.as_deref().unwrap_or(placeholder)
    }

    /// Format the rating for display.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::{Show, ShowId};
    ///
    /// let mut show = Show {
    ///     id: ShowId(1),
    ///     name: "Under the Dome".to_string(),
    ///     summary: None,
    ///     genres: vec![],
    ///     status: None,
    ///     runtime: None,
    ///     rating: Some(6.5),
    ///     image: None,
    /// };
    /// assert_eq!(show.rating_label(), "6.5");
    /// show.rating = None;
    /// assert_eq!(show.rating_label(), "N/A");
    /// ```
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(r) => format!("{:.1}", r),
            None => "N/A".to_string(),
        }
    }

    pub fn genres_label(&self) -> String {
        if self.genres.is_empty() {
            "Unknown".to_string()
        } else {
            self.genres.join(", ")
        }
    }

    pub fn runtime_label(&self) -> String {
        match self.runtime {
            Some(m) => format!("{} min", m),
            None => "N/A".to_string(),
        }
    }

    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("Unknown")
    }
}

/// Per-show unique episode key.
///
/// Encoded as `season-number` in the episode selector. Both halves are
/// compared as integers, so `"01-1"` and `"1-1"` are the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpisodeKey {
    pub season: u32,
    pub number: u32,
}

impl EpisodeKey {
    pub fn new(season: u32, number: u32) -> Self {
        Self { season, number }
    }

    /// Selector value for this key.
    pub fn value(&self) -> String {
        format!("{}-{}", self.season, self.number)
    }

    /// Format as a zero-padded episode code.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::EpisodeKey;
    ///
    /// assert_eq!(EpisodeKey::new(1, 1).code(), "S01E01");
    /// assert_eq!(EpisodeKey::new(12, 104).code(), "S12E104");
    /// ```
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season, self.number)
    }
}

impl FromStr for EpisodeKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AppError::InvalidInput(format!("'{}' is not a season-number pair", s));
        let (season, number) = s.trim().split_once('-').ok_or_else(invalid)?;
        let season = season.trim().parse::<u32>().map_err(|_| invalid())?;
        let number = number.trim().parse::<u32>().map_err(|_| invalid())?;
        Ok(Self { season, number })
    }
}

/// A single installment of a show.
#[derive(Clone, Debug, PartialEq)]
pub struct Episode {
    pub id: u64,
    pub show_id: ShowId,
    pub key: EpisodeKey,
    pub name: String,
    pub summary: Option<String>,
    pub image: Option<String>,
}

impl Episode {
    pub fn code(&self) -> String {
        self.key.code()
    }

    /// Image URL, or `placeholder` when the catalog has none.
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image.as_deref().unwrap_or(placeholder)
    }

    /// Format the episode for selector menus.
    ///
    /// # Examples
    ///
    /// ```
    /// use show_browser::types::{Episode, EpisodeKey, ShowId};
    ///
    /// let ep = Episode {
    ///     id: 1,
    ///     show_id: ShowId(82),
    ///     key: EpisodeKey::new(1, 1),
    ///     name: "Winter Is Coming".to_string(),
    ///     summary: None,
    ///     image: None,
    /// };
    /// assert_eq!(ep.to_display(), "S01E01 - Winter Is Coming");
    /// ```
    pub fn to_display(&self) -> String {
        format!("{} - {}", self.code(), self.name)
    }
}

/// Strip markup from a catalog summary for plain-text display.
///
/// Block-level tags become word breaks, inline tags vanish so that
/// `<b>Dexter</b>'s` stays one word. Numeric character references and a
/// handful of named entities are decoded, and runs of whitespace collapse
/// to a single space.
///
/// # Examples
///
/// ```
/// use show_browser::types::plain_text;
///
/// assert_eq!(plain_text("<p>Tom &amp; <b>Jerry</b></p>"), "Tom & Jerry");
/// assert_eq!(plain_text("<p><i>Dexter</i>&#8217;s</p>"), "Dexter\u{2019}s");
/// ```
pub fn plain_text(html: &str) -> String {
    let blocks = BLOCK_TAG_RE.replace_all(html, " ");
    let stripped = TAG_RE.replace_all(&blocks, "");
    let numeric = NUMERIC_ENTITY_RE.replace_all(&stripped, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            _ => None,
        };
        // Out-of-range references stay as written
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });
    let decoded = numeric
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    SPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show() -> Show {
        Show {
            id: ShowId(7),
            name: "Test Show".to_string(),
            summary: None,
            genres: vec![],
            status: None,
            runtime: None,
            rating: None,
            image: None,
        }
    }

    #[test]
    fn test_show_id_parse() {
        assert_eq!("42".parse::<ShowId>().unwrap(), ShowId(42));
        assert_eq!(" 42 ".parse::<ShowId>().unwrap(), ShowId(42));
        assert!("abc".parse::<ShowId>().is_err());
        assert!("".parse::<ShowId>().is_err());
    }

    #[test]
    fn test_show_labels_degrade() {
        let s = show();
        assert_eq!(s.genres_label(), "Unknown");
        assert_eq!(s.runtime_label(), "N/A");
        assert_eq!(s.rating_label(), "N/A");
        assert_eq!(s.status_label(), "Unknown");
        assert_eq!(s.image_or("placeholder.jpg"), "placeholder.jpg");
    }

    #[test]
    fn test_show_labels_present() {
        let s = Show {
            genres: vec!["Drama".to_string(), "Thriller".to_string()],
            runtime: Some(60),
            rating: Some(8.3),
            status: Some("Ended".to_string()),
            image: Some("https://example.com/a.jpg".to_string()),
            ..show()
        };
        assert_eq!(s.genres_label(), "Drama, Thriller");
        assert_eq!(s.runtime_label(), "60 min");
        assert_eq!(s.rating_label(), "8.3");
        assert_eq!(s.status_label(), "Ended");
        assert_eq!(s.image_or("placeholder.jpg"), "https://example.com/a.jpg");
    }

    #[test]
    fn test_episode_key_parse_compares_integers() {
        let a: EpisodeKey = "01-1".parse().unwrap();
        let b: EpisodeKey = "1-01".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, EpisodeKey::new(1, 1));
    }

    #[test]
    fn test_episode_key_parse_rejects_garbage() {
        assert!("1".parse::<EpisodeKey>().is_err());
        assert!("a-b".parse::<EpisodeKey>().is_err());
        assert!("1-".parse::<EpisodeKey>().is_err());
        assert!("-1-2".parse::<EpisodeKey>().is_err());
    }

    #[test]
    fn test_episode_key_value() {
        assert_eq!(EpisodeKey::new(3, 10).value(), "3-10");
    }

    #[test]
    fn test_plain_text_without_markup() {
        assert_eq!(plain_text("just words"), "just words");
        assert_eq!(plain_text(""), "");
    }

    #[test]
    fn test_plain_text_collapses_whitespace() {
        assert_eq!(plain_text("<p>One</p>\n<p>Two</p>"), "One Two");
        assert_eq!(plain_text("<p>One</p><p>Two</p>"), "One Two");
        assert_eq!(plain_text("line<br/>break"), "line break");
    }

    #[test]
    fn test_plain_text_inline_tags_keep_words_whole() {
        assert_eq!(
            plain_text("<p><b>Dexter</b>'s second life</p>"),
            "Dexter's second life"
        );
        assert_eq!(
            plain_text("<p>An <em>un</em><strong>usual</strong> <a href=\"x\">town</a></p>"),
            "An unusual town"
        );
    }

    #[test]
    fn test_plain_text_decodes_numeric_references() {
        assert_eq!(plain_text("Dexter&#8217;s"), "Dexter\u{2019}s");
        assert_eq!(plain_text("Caf&#233; &#xE9;t&#XE9;"), "Caf\u{e9} \u{e9}t\u{e9}");
        assert_eq!(plain_text("it&#39;s"), "it's");
        // Not a valid scalar value
        assert_eq!(plain_text("&#xD800;"), "&#xD800;");
        // Escaped references are decoded once only
        assert_eq!(plain_text("&amp;#233;"), "&#233;");
    }
}
