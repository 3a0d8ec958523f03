// Value of the first run of digits in `s`, or 0 when there is none.
// Full-width digits count as digits too; some regional firmware emits them.
pub fn first_number(s: &str) -> usize {
    let mut chars = s.chars().skip_while(|&c| digit_value(c).is_none()).peekable();

    let mut ret: usize = 0;
    while let Some(d) = chars.peek().and_then(|&c| digit_value(c)) {
        ret = ret.saturating_mul(10).saturating_add(d);
        chars.next();
    }
    ret
}

fn digit_value(c: char) -> Option<usize> {
    let zero = match c {
        '0'..='9' => '0',
        '０'..='９' => '０',
        _ => return None,
    } as usize;

    Some((c as usize) - zero)
}

// Runs of whitespace become a single space; leading and trailing whitespace is dropped.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Uppercases the first character and lowercases the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_number_takes_the_first_run_only() {
        assert_eq!(first_number("150-152"), 150);
        assert_eq!(first_number("abc"), 0);
        assert_eq!(first_number(""), 0);
        assert_eq!(first_number("loc ３２ and 7"), 32);
    }

    #[test]
    fn capitalize_lowercases_the_tail() {
        assert_eq!(capitalize("gREAT"), "Great");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }
}
