// "My Clippings.txt" as written by Kindle devices:
//
//   <title> (<author>)
//   - Your <Highlight|Note|Bookmark> on Location <n>[-<m>] | [page <p> |] Added on <date>
//
//   <content>
//   ==========
//
// The format is loose in practice. Nothing here fails on malformed input:
// - entries with fewer than 2 non-blank lines are skipped
// - missing author, kind, location or page fall back to defaults
// - unparseable dates become the current time
// - a byte order mark may precede any title line, not only the first

pub mod metadata;
pub mod parser;
pub mod query;
pub mod record;
pub mod splitter;
pub mod title_author;
pub mod title_cleaner;
