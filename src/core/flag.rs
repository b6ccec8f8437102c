//! Flag image lookup for currency codes.

/// Codes that do not map onto a single country's two-letter code.
const SPECIAL_FLAGS: &[(&str, &str)] = &[
    ("XAF", "https://flagcdn.com/w40/cm.png"),
    ("XCD", "https://flagcdn.com/w40/ag.png"),
    ("XDR", "https://static.currencyrate.today/f/flags/xdr.svg"),
    ("XOF", "https://currency.world/img/flags/tg.png"),
    ("XPF", "https://flagpedia.net/data/flags/w580/pf.webp"),
];

/// Best-effort flag image URL for a currency code.
///
/// Outside the override table the first two letters of the code are taken as
/// the country code, which is only a guess.
pub fn flag_url(code: &str) -> String {
    let code = code.trim().to_uppercase();
    if let Some((_, url)) = SPECIAL_FLAGS.iter().find(|(special, _)| *special == code) {
        return (*url).to_string();
    }

    let country: String = code.chars().take(2).collect::<String>().to_lowercase();
    format!("https://flagcdn.com/w40/{country}.png")
}
