//! Numeric digest of a snapshot and the prompt built from it.

use std::fmt::Write;

use rust_decimal::Decimal;

use crate::models::{OptionChain, OptionSide, Symbol};

/// The handful of figures the analyst prompt is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSummary {
    pub symbol: Symbol,
    pub spot: Decimal,
    /// Total put OI over total call OI; `None` when call OI sums to zero.
    pub pcr: Option<f64>,
    pub atm_strike: Decimal,
    pub atm_ce_iv: f64,
    pub atm_pe_iv: f64,
    pub atm_ce_price: Decimal,
    pub atm_pe_price: Decimal,
    pub max_ce_oi_strike: Decimal,
    pub max_pe_oi_strike: Decimal,
}

impl ChainSummary {
    /// Summarizes `chain`. Returns `None` for a chain with no rows.
    pub fn from_chain(chain: &OptionChain) -> Option<Self> {
        let atm = chain.atm_row()?;
        let ce_oi = chain.total_open_interest(OptionSide::Call);
        let pe_oi = chain.total_open_interest(OptionSide::Put);
        let pcr = (ce_oi != 0).then(|| pe_oi as f64 / ce_oi as f64);

        Some(Self {
            symbol: chain.symbol,
            spot: chain.underlying_value,
            pcr,
            atm_strike: atm.strike_price,
            atm_ce_iv: atm.ce.implied_volatility,
            atm_pe_iv: atm.pe.implied_volatility,
            atm_ce_price: atm.ce.last_price,
            atm_pe_price: atm.pe.last_price,
            max_ce_oi_strike: chain.max_open_interest_strike(OptionSide::Call)?,
            max_pe_oi_strike: chain.max_open_interest_strike(OptionSide::Put)?,
        })
    }

    /// PCR formatted to 2 dp, or `N/A`.
    pub fn pcr_label(&self) -> String {
        match self.pcr {
            Some(pcr) => format!("{pcr:.2}"),
            None => "N/A".to_string(),
        }
    }
}

/// Builds the analyst prompt sent to the completion service.
pub fn build_prompt(summary: &ChainSummary) -> String {
    let mut prompt = String::from(
        "Act as a financial market analyst. Analyze the following option chain \
         summary for the Indian NSE market.\n\nData Summary:\n",
    );
    // Writing to a String cannot fail.
    let _ = writeln!(prompt, "Symbol: {}", summary.symbol);
    let _ = writeln!(prompt, "Current Spot Price: {}", summary.spot);
    let _ = writeln!(prompt, "PCR (Put Call Ratio): {}", summary.pcr_label());
    let _ = writeln!(prompt, "ATM Strike: {}", summary.atm_strike);
    let _ = writeln!(prompt, "ATM CE IV: {:.2}", summary.atm_ce_iv);
    let _ = writeln!(prompt, "ATM PE IV: {:.2}", summary.atm_pe_iv);
    let _ = writeln!(prompt, "ATM CE Price: {}", summary.atm_ce_price);
    let _ = writeln!(prompt, "ATM PE Price: {}", summary.atm_pe_price);
    let _ = writeln!(prompt, "Max CE OI Strike: {}", summary.max_ce_oi_strike);
    let _ = writeln!(prompt, "Max PE OI Strike: {}", summary.max_pe_oi_strike);
    prompt.push_str(
        "\nProvide a concise analysis (max 150 words) covering:\n\
         1. Market Sentiment (Bullish/Bearish/Neutral) based on PCR and Price Action.\n\
         2. Key Support and Resistance levels based on Open Interest (Max OI).\n\
         3. Implied Volatility interpretation.\n\n\
         Output formatted in Markdown.\n",
    );
    prompt
}
