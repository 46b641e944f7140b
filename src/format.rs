// ============================================================================
// Format - Affichage des montants en devise native
// ============================================================================
// Conversion montant brut on-chain → valeur en devise native, et formatage
// des prix et variations pour l'affichage
//
// CONCEPTS RUST :
// 1. FromStr : parser une devise depuis son code ("usd", "EUR", ...)
// 2. Serde avec try_from : la config contient le code en texte
// 3. Fonctions pures : testables sans terminal ni réseau
// ============================================================================

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Décimales maximum affichées pour un montant inférieur à 1
const MAX_DISPLAY_DECIMALS: usize = 8;

/// Chiffres significatifs gardés après les zéros de tête (montants < 1)
const DEFAULT_BUFFER: usize = 3;

/// Devises natives supportées
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NativeCurrency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Aud,
    Cad,
    Cny,
    Inr,
    Jpy,
    Krw,
    Rub,
    Try,
    Eth,
}

impl NativeCurrency {
    /// Code ISO (ou ETH)
    pub fn code(&self) -> &'static str {
        match self {
            NativeCurrency::Usd => "USD",
            NativeCurrency::Eur => "EUR",
            NativeCurrency::Gbp => "GBP",
            NativeCurrency::Aud => "AUD",
            NativeCurrency::Cad => "CAD",
            NativeCurrency::Cny => "CNY",
            NativeCurrency::Inr => "INR",
            NativeCurrency::Jpy => "JPY",
            NativeCurrency::Krw => "KRW",
            NativeCurrency::Rub => "RUB",
            NativeCurrency::Try => "TRY",
            NativeCurrency::Eth => "ETH",
        }
    }

    /// Symbole préfixé aux montants
    pub fn symbol(&self) -> &'static str {
        match self {
            NativeCurrency::Usd => "$",
            NativeCurrency::Eur => "€",
            NativeCurrency::Gbp => "£",
            NativeCurrency::Aud => "A$",
            NativeCurrency::Cad => "CA$",
            NativeCurrency::Cny => "¥",
            NativeCurrency::Inr => "₹",
            NativeCurrency::Jpy => "¥",
            NativeCurrency::Krw => "₩",
            NativeCurrency::Rub => "₽",
            NativeCurrency::Try => "₺",
            NativeCurrency::Eth => "Ξ",
        }
    }

    /// Décimales d'affichage pour les montants >= 1
    pub fn decimals(&self) -> usize {
        match self {
            NativeCurrency::Jpy | NativeCurrency::Krw => 0,
            NativeCurrency::Eth => 4,
            _ => 2,
        }
    }

    pub fn all() -> Vec<NativeCurrency> {
        vec![
            NativeCurrency::Usd,
            NativeCurrency::Eur,
            NativeCurrency::Gbp,
            NativeCurrency::Aud,
            NativeCurrency::Cad,
            NativeCurrency::Cny,
            NativeCurrency::Inr,
            NativeCurrency::Jpy,
            NativeCurrency::Krw,
            NativeCurrency::Rub,
            NativeCurrency::Try,
            NativeCurrency::Eth,
        ]
    }

    /// Devise suivante (cycle), utilisée avec la touche 'c'
    pub fn next(&self) -> NativeCurrency {
        let all = Self::all();
        let index = all.iter().position(|c| c == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

impl fmt::Display for NativeCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for NativeCurrency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        match Self::all().into_iter().find(|c| c.code() == code) {
            Some(currency) => Ok(currency),
            None => bail!("Devise inconnue : {}", s),
        }
    }
}

impl TryFrom<String> for NativeCurrency {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NativeCurrency> for String {
    fn from(value: NativeCurrency) -> Self {
        value.code().to_string()
    }
}

/// Montant converti en devise native
#[derive(Debug, Clone, PartialEq)]
pub struct NativeDisplay {
    /// Valeur numérique
    pub amount: f64,
    /// Valeur formatée avec symbole (ex: "$141.39")
    pub display: String,
}

/// Convertit un montant brut (unités minimales) en unités du token
///
/// None si le montant n'est pas un nombre fini positif
pub fn raw_to_units(raw: &str, decimals: u8) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value / 10f64.powi(i32::from(decimals)))
}

/// `raw / 10^decimals * price`, formaté dans la devise native
pub fn convert_raw_amount_to_native_display(
    raw: &str,
    decimals: u8,
    price: f64,
    currency: NativeCurrency,
) -> Option<NativeDisplay> {
    let amount = raw_to_units(raw, decimals)? * price;
    Some(NativeDisplay {
        amount,
        display: format_native_amount(amount, currency),
    })
}

/// Formate un montant avec le symbole et les décimales de la devise
pub fn format_native_amount(amount: f64, currency: NativeCurrency) -> String {
    format!(
        "{}{}",
        currency.symbol(),
        handle_significant_decimals(amount, currency.decimals(), DEFAULT_BUFFER)
    )
}

/// Formate un prix unitaire (toujours 2 décimales de base)
pub fn format_price(value: f64, currency: NativeCurrency) -> String {
    format!(
        "{}{}",
        currency.symbol(),
        handle_significant_decimals(value, 2, DEFAULT_BUFFER)
    )
}

/// Formate une valeur en gardant des chiffres significatifs
///
/// - |valeur| < 1 : zéros de tête + `buffer` chiffres (max 8 décimales)
/// - sinon : `decimals` décimales
/// - au moins 2 décimales, les zéros de fin au-delà de 2 sont retirés
/// - séparateur de milliers ","
pub fn handle_significant_decimals(value: f64, decimals: usize, buffer: usize) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0.00".to_string();
    }

    let abs = value.abs();
    let precision = if abs < 1.0 {
        // "0.000123" → 3 zéros de tête après la virgule
        let fixed = format!("{:.18}", abs);
        let leading_zeros = fixed[2..].find(|c: char| c != '0').unwrap_or(0);
        (leading_zeros + buffer).min(MAX_DISPLAY_DECIMALS)
    } else {
        decimals
    };

    let fixed = format!("{:.*}", precision, abs);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i.to_string(), f.trim_end_matches('0').to_string()),
        None => (fixed.clone(), String::new()),
    };

    let frac = if frac_part.len() < 2 {
        format!("{:0<2}", frac_part)
    } else {
        frac_part
    };

    let sign = if value < 0.0 && (int_part != "0" || frac.chars().any(|c| c != '0')) {
        "-"
    } else {
        ""
    };

    format!("{}{}.{}", sign, group_thousands(&int_part), frac)
}

/// Insère des séparateurs de milliers : "1234567" → "1,234,567"
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formate la variation 24h : valeur absolue, 2 décimales, suffixe "%"
///
/// Les zéros de fin sont retirés ("2.50" → "2.5%", "0.00" → "0%").
/// Une variation absente compte comme 0.
pub fn format_price_change(relative_change_24h: Option<f64>) -> String {
    let change = relative_change_24h.filter(|c| c.is_finite()).unwrap_or(0.0);
    let fixed = format!("{:.2}", change.abs());
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", trimmed)
}

/// Vrai seulement pour une variation strictement positive (0 n'est pas "up")
pub fn is_price_up(relative_change_24h: Option<f64>) -> bool {
    relative_change_24h.map_or(false, |c| c > 0.0)
}
