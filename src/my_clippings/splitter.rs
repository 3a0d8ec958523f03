pub const ENTRY_DELIMITER: &str = "==========";

// Document order is kept. Entries that are blank after trimming are dropped;
// everything else is left for the entry parser to accept or reject.
pub fn split_entries(txt: &str) -> Vec<&str> {
    txt.split(ENTRY_DELIMITER)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}
