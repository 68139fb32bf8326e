//! Scene naming conventions used to phrase queries.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static DOTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.+").expect("dots pattern compiles"));

/// Characters dropped from show names before searching.
const BAD_NAME_CHARS: &[char] = &[',', ':', '(', ')', '\'', '!', '?', '\u{2019}'];

/// Naming helpers supplied to the query builder.
pub trait EpisodeNaming: Send + Sync {
    /// Make a show name safe to use as a search term.
    fn sanitize_show_name(&self, name: &str) -> String;

    /// Three alternative spellings of an episode code, joined with OR in queries.
    fn episode_codes(&self, season: u32, episode: u32) -> [String; 3];
}

/// The usual scene conventions: `S01E02`, `1x02` and `01x02`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneNaming;

impl EpisodeNaming for SceneNaming {
    fn sanitize_show_name(&self, name: &str) -> String {
        let name: String = name.chars().filter(|c| !BAD_NAME_CHARS.contains(c)).collect();
        let name = name
            .replace("- ", ".")
            .replace(' ', ".")
            .replace('&', "and")
            .replace('/', ".");
        let name = DOTS_RE.replace_all(&name, ".").into_owned();
        name.strip_suffix('.').unwrap_or(name.as_str()).to_string()
    }

    fn episode_codes(&self, season: u32, episode: u32) -> [String; 3] {
        [
            format!("S{:02}E{:02}", season, episode),
            format!("{}x{:02}", season, episode),
            format!("{:02}x{:02}", season, episode),
        ]
    }
}
