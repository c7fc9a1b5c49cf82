//! Bundled currency metadata
//!
//! The converter only offers currencies from this table. Decimal digit counts
//! drive result formatting; the remaining fields are display metadata.

use super::Currency;

/// Every currency the converter offers, in picker order
pub static CURRENCIES: [Currency; 34] = [
    Currency {
        code: "USD",
        name: "US Dollar",
        name_plural: "US dollars",
        symbol: "$",
        symbol_native: "$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "US",
        flag_src: "https://flagcdn.com/h40/us.png",
    },
    Currency {
        code: "CAD",
        name: "Canadian Dollar",
        name_plural: "Canadian dollars",
        symbol: "CA$",
        symbol_native: "$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "CA",
        flag_src: "https://flagcdn.com/h40/ca.png",
    },
    Currency {
        code: "EUR",
        name: "Euro",
        name_plural: "euros",
        symbol: "€",
        symbol_native: "€",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "IE",
        flag_src: "https://flagcdn.com/h40/ie.png",
    },
    Currency {
        code: "AED",
        name: "United Arab Emirates Dirham",
        name_plural: "UAE dirhams",
        symbol: "AED",
        symbol_native: "د.إ.\u{200f}",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "AE",
        flag_src: "https://flagcdn.com/h40/ae.png",
    },
    Currency {
        code: "AFN",
        name: "Afghan Afghani",
        name_plural: "Afghan Afghanis",
        symbol: "Af",
        symbol_native: "؋",
        decimal_digits: 0,
        rounding: 0.0,
        country_code: "AF",
        flag_src: "https://flagcdn.com/h40/af.png",
    },
    Currency {
        code: "ALL",
        name: "Albanian Lek",
        name_plural: "Albanian lekë",
        symbol: "ALL",
        symbol_native: "Lek",
        decimal_digits: 0,
        rounding: 0.0,
        country_code: "AL",
        flag_src: "https://flagcdn.com/h40/al.png",
    },
    Currency {
        code: "AUD",
        name: "Australian Dollar",
        name_plural: "Australian dollars",
        symbol: "AU$",
        symbol_native: "$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "AU",
        flag_src: "https://flagcdn.com/h40/au.png",
    },
    Currency {
        code: "BGN",
        name: "Bulgarian Lev",
        name_plural: "Bulgarian leva",
        symbol: "BGN",
        symbol_native: "лв.",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "BG",
        flag_src: "https://flagcdn.com/h40/bg.png",
    },
    Currency {
        code: "BRL",
        name: "Brazilian Real",
        name_plural: "Brazilian reals",
        symbol: "R$",
        symbol_native: "R$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "BR",
        flag_src: "https://flagcdn.com/h40/br.png",
    },
    Currency {
        code: "CHF",
        name: "Swiss Franc",
        name_plural: "Swiss francs",
        symbol: "CHF",
        symbol_native: "CHF",
        decimal_digits: 2,
        rounding: 0.05,
        country_code: "CH",
        flag_src: "https://flagcdn.com/h40/ch.png",
    },
    Currency {
        code: "CNY",
        name: "Chinese Yuan",
        name_plural: "Chinese yuan",
        symbol: "CN¥",
        symbol_native: "CN¥",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "CN",
        flag_src: "https://flagcdn.com/h40/cn.png",
    },
    Currency {
        code: "CZK",
        name: "Czech Republic Koruna",
        name_plural: "Czech Republic korunas",
        symbol: "Kč",
        symbol_native: "Kč",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "CZ",
        flag_src: "https://flagcdn.com/h40/cz.png",
    },
    Currency {
        code: "DKK",
        name: "Danish Krone",
        name_plural: "Danish kroner",
        symbol: "Dkr",
        symbol_native: "kr",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "DK",
        flag_src: "https://flagcdn.com/h40/dk.png",
    },
    Currency {
        code: "GBP",
        name: "British Pound Sterling",
        name_plural: "British pounds sterling",
        symbol: "£",
        symbol_native: "£",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "GB",
        flag_src: "https://flagcdn.com/h40/gb.png",
    },
    Currency {
        code: "HKD",
        name: "Hong Kong Dollar",
        name_plural: "Hong Kong dollars",
        symbol: "HK$",
        symbol_native: "$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "HK",
        flag_src: "https://flagcdn.com/h40/hk.png",
    },
    Currency {
        code: "HUF",
        name: "Hungarian Forint",
        name_plural: "Hungarian forints",
        symbol: "Ft",
        symbol_native: "Ft",
        decimal_digits: 0,
        rounding: 0.0,
        country_code: "HU",
        flag_src: "https://flagcdn.com/h40/hu.png",
    },
    Currency {
        code: "IDR",
        name: "Indonesian Rupiah",
        name_plural: "Indonesian rupiahs",
        symbol: "Rp",
        symbol_native: "Rp",
        decimal_digits: 0,
        rounding: 0.0,
        country_code: "ID",
        flag_src: "https://flagcdn.com/h40/id.png",
    },
    Currency {
        code: "ILS",
        name: "Israeli New Sheqel",
        name_plural: "Israeli new sheqels",
        symbol: "₪",
        symbol_native: "₪",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "IL",
        flag_src: "https://flagcdn.com/h40/il.png",
    },
    Currency {
        code: "INR",
        name: "Indian Rupee",
        name_plural: "Indian rupees",
        symbol: "Rs",
        symbol_native: "₹",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "IN",
        flag_src: "https://flagcdn.com/h40/in.png",
    },
    Currency {
        code: "ISK",
        name: "Icelandic Króna",
        name_plural: "Icelandic krónur",
        symbol: "Ikr",
        symbol_native: "kr",
        decimal_digits: 0,
        rounding: 0.0,
        country_code: "IS",
        flag_src: "https://flagcdn.com/h40/is.png",
    },
    Currency {
        code: "JPY",
        name: "Japanese Yen",
        name_plural: "Japanese yen",
        symbol: "¥",
        symbol_native: "￥",
        decimal_digits: 0,
        rounding: 0.0,
        country_code: "JP",
        flag_src: "https://flagcdn.com/h40/jp.png",
    },
    Currency {
        code: "KRW",
        name: "South Korean Won",
        name_plural: "South Korean won",
        symbol: "₩",
        symbol_native: "₩",
        decimal_digits: 0,
        rounding: 0.0,
        country_code: "KR",
        flag_src: "https://flagcdn.com/h40/kr.png",
    },
    Currency {
        code: "MXN",
        name: "Mexican Peso",
        name_plural: "Mexican pesos",
        symbol: "MX$",
        symbol_native: "$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "MX",
        flag_src: "https://flagcdn.com/h40/mx.png",
    },
    Currency {
        code: "MYR",
        name: "Malaysian Ringgit",
        name_plural: "Malaysian ringgits",
        symbol: "RM",
        symbol_native: "RM",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "MY",
        flag_src: "https://flagcdn.com/h40/my.png",
    },
    Currency {
        code: "NOK",
        name: "Norwegian Krone",
        name_plural: "Norwegian kroner",
        symbol: "Nkr",
        symbol_native: "kr",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "NO",
        flag_src: "https://flagcdn.com/h40/no.png",
    },
    Currency {
        code: "NZD",
        name: "New Zealand Dollar",
        name_plural: "New Zealand dollars",
        symbol: "NZ$",
        symbol_native: "$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "NZ",
        flag_src: "https://flagcdn.com/h40/nz.png",
    },
    Currency {
        code: "PHP",
        name: "Philippine Peso",
        name_plural: "Philippine pesos",
        symbol: "₱",
        symbol_native: "₱",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "PH",
        flag_src: "https://flagcdn.com/h40/ph.png",
    },
    Currency {
        code: "PLN",
        name: "Polish Zloty",
        name_plural: "Polish zlotys",
        symbol: "zł",
        symbol_native: "zł",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "PL",
        flag_src: "https://flagcdn.com/h40/pl.png",
    },
    Currency {
        code: "RON",
        name: "Romanian Leu",
        name_plural: "Romanian lei",
        symbol: "RON",
        symbol_native: "RON",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "RO",
        flag_src: "https://flagcdn.com/h40/ro.png",
    },
    Currency {
        code: "SEK",
        name: "Swedish Krona",
        name_plural: "Swedish kronor",
        symbol: "Skr",
        symbol_native: "kr",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "SE",
        flag_src: "https://flagcdn.com/h40/se.png",
    },
    Currency {
        code: "SGD",
        name: "Singapore Dollar",
        name_plural: "Singapore dollars",
        symbol: "S$",
        symbol_native: "$",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "SG",
        flag_src: "https://flagcdn.com/h40/sg.png",
    },
    Currency {
        code: "THB",
        name: "Thai Baht",
        name_plural: "Thai baht",
        symbol: "฿",
        symbol_native: "฿",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "TH",
        flag_src: "https://flagcdn.com/h40/th.png",
    },
    Currency {
        code: "TRY",
        name: "Turkish Lira",
        name_plural: "Turkish Lira",
        symbol: "TL",
        symbol_native: "TL",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "TR",
        flag_src: "https://flagcdn.com/h40/tr.png",
    },
    Currency {
        code: "ZAR",
        name: "South African Rand",
        name_plural: "South African rand",
        symbol: "R",
        symbol_native: "R",
        decimal_digits: 2,
        rounding: 0.0,
        country_code: "ZA",
        flag_src: "https://flagcdn.com/h40/za.png",
    },
];

/// Get a currency by its ISO 4217 code
///
/// Matching is exact; callers normalize case first (see [`normalize_code`]).
pub fn get_currency(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|currency| currency.code == code)
}

/// Get all bundled currencies
pub fn all_currencies() -> &'static [Currency] {
    &CURRENCIES
}

/// Uppercases and trims a user-supplied currency code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Filters the table by a search query
///
/// A currency matches when its code or name contains the query,
/// case-insensitively. An empty query returns every currency.
pub fn search_currencies(query: &str) -> Vec<&'static Currency> {
    let needle = query.trim().to_lowercase();
    CURRENCIES
        .iter()
        .filter(|currency| {
            needle.is_empty()
                || currency.code.to_lowercase().contains(&needle)
                || currency.name.to_lowercase().contains(&needle)
        })
        .collect()
}
