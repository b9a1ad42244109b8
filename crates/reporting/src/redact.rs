/// Shortens a mint address for display: first and last four characters.
pub fn short_mint(mint: &str) -> String {
    let chars: Vec<char> = mint.trim().chars().collect();
    if chars.len() <= 12 {
        return chars.into_iter().collect();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_mint() {
        assert_eq!(
            short_mint("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            "EPjF...Dt1v"
        );
        assert_eq!(short_mint("short-mint"), "short-mint");
    }
}
